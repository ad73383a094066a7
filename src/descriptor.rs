use tracing::debug;

use crate::env::EnvSource;
use crate::types::FieldMeta;

/// A field's metadata with the environment override applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub name: &'static str,
    /// The resolved default: the environment value if non-empty, else the
    /// declared one. Not yet converted.
    pub default: String,
    pub usage: &'static str,
}

/// Resolve `meta` against `env`.
///
/// A non-empty value for `meta.env_var` replaces the declared default
/// entirely. An unset or empty variable is not an override.
pub fn extract<E: EnvSource + ?Sized>(meta: &FieldMeta, env: &E) -> Descriptor {
    let default = match lookup_override(meta.env_var, env) {
        Some(value) => {
            debug!(flag = meta.name, env_var = meta.env_var, "default overridden from environment");
            value
        }
        None => meta.value.to_string(),
    };

    Descriptor {
        name: meta.name,
        default,
        usage: meta.usage,
    }
}

fn lookup_override<E: EnvSource + ?Sized>(env_var: &str, env: &E) -> Option<String> {
    if env_var.is_empty() {
        return None;
    }
    env.var(env_var).filter(|value| !value.is_empty())
}
