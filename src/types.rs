use std::fmt;

use serde::Serialize;

/// The closed set of field types the binder knows how to convert and register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    /// `bool`
    Bool,
    /// `String`
    Text,
    /// `i32`
    Int32,
    /// `i64`
    Int64,
    /// `std::time::Duration`
    Duration,
}

impl FlagKind {
    /// Placeholder shown for the flag's value in help output.
    pub fn value_name(self) -> &'static str {
        match self {
            FlagKind::Bool => "BOOL",
            FlagKind::Text => "STRING",
            FlagKind::Int32 | FlagKind::Int64 => "INT",
            FlagKind::Duration => "DURATION",
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlagKind::Bool => "bool",
            FlagKind::Text => "string",
            FlagKind::Int32 => "int32",
            FlagKind::Int64 => "int64",
            FlagKind::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// Declarative metadata attached to one config field.
///
/// Every attribute defaults to the empty string. With the `derive` feature
/// these come from `#[flag(name = "...", value = "...", usage = "...",
/// env_var = "...")]`; hand-written impls use the builder methods:
///
/// ```
/// # use confbind::FieldMeta;
/// const ADDR: FieldMeta = FieldMeta::new("addr")
///     .value(":8000")
///     .usage("Listen and serve address")
///     .env_var("ADDR");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// Flag identifier. An empty name means the field is never exposed on
    /// the command line.
    pub name: &'static str,
    /// Default value, string-encoded. Empty means the type's zero value.
    pub value: &'static str,
    /// Help text.
    pub usage: &'static str,
    /// Environment variable whose non-empty value replaces `value`.
    pub env_var: &'static str,
}

impl FieldMeta {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            value: "",
            usage: "",
            env_var: "",
        }
    }

    pub const fn value(mut self, value: &'static str) -> Self {
        self.value = value;
        self
    }

    pub const fn usage(mut self, usage: &'static str) -> Self {
        self.usage = usage;
        self
    }

    pub const fn env_var(mut self, env_var: &'static str) -> Self {
        self.env_var = env_var;
        self
    }
}

/// A registered flag as reported by [`Binder::flags`](crate::Binder::flags).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagInfo {
    pub name: String,
    pub kind: FlagKind,
    pub usage: String,
    /// The resolved default (environment override or declared value).
    pub default: String,
}

/// Outcome of a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    /// Flags explicitly given on the command line, in registration order.
    pub set: Vec<String>,
    /// Positional arguments remaining after the flags.
    pub args: Vec<String>,
}

impl Parsed {
    /// Whether the flag `name` was given on the command line.
    pub fn is_set(&self, name: &str) -> bool {
        self.set.iter().any(|s| s == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_builder_sets_every_attribute() {
        let meta = FieldMeta::new("apiKey")
            .value("none")
            .usage("API key")
            .env_var("API_KEY");
        assert_eq!(meta.name, "apiKey");
        assert_eq!(meta.value, "none");
        assert_eq!(meta.usage, "API key");
        assert_eq!(meta.env_var, "API_KEY");
    }

    #[test]
    fn meta_defaults_to_empty() {
        let meta = FieldMeta::default();
        assert_eq!(meta, FieldMeta::new(""));
    }

    #[test]
    fn kind_display_names() {
        assert_eq!(FlagKind::Bool.to_string(), "bool");
        assert_eq!(FlagKind::Text.to_string(), "string");
        assert_eq!(FlagKind::Int32.to_string(), "int32");
        assert_eq!(FlagKind::Int64.to_string(), "int64");
        assert_eq!(FlagKind::Duration.to_string(), "duration");
    }

    #[test]
    fn flag_info_serializes_kind_lowercase() {
        let info = FlagInfo {
            name: "timeout".into(),
            kind: FlagKind::Duration,
            usage: "Timeout value".into(),
            default: "200ms".into(),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["kind"], "duration");
        assert_eq!(json["default"], "200ms");
    }

    #[test]
    fn parsed_is_set() {
        let parsed = Parsed {
            set: vec!["addr".into()],
            args: vec![],
        };
        assert!(parsed.is_set("addr"));
        assert!(!parsed.is_set("timeout"));
    }
}
