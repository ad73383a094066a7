use std::ffi::OsString;

use tracing::trace;

use crate::descriptor;
use crate::env::{EnvSource, ProcessEnv};
use crate::error::BindError;
use crate::field::{Configurable, Target};
use crate::registry::{self, FlagSet};
use crate::types::{FlagInfo, Parsed};

/// Bind `config` to the process's command line and environment.
///
/// Every supported field receives its resolved default (environment value if
/// non-empty, else the declared `value`, else zero) and is then overwritten by
/// its flag if that flag appears in `std::env::args_os()`.
///
/// The process command line can be bound once; a second call returns
/// [`BindError::AlreadyParsed`] until [`reset_command_line`] is called.
/// Command-line errors (unknown flags, bad values, `-h`) print clap's message
/// and exit the process, exactly like `clap::Command::get_matches`.
///
/// [`reset_command_line`]: crate::reset_command_line
pub fn bind<C: Configurable + ?Sized>(config: &mut C) -> Result<(), BindError> {
    registry::claim_command_line()?;

    let mut args = std::env::args_os().peekable();
    let program = args
        .peek()
        .and_then(|arg| std::path::Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match Binder::new(program).bind_from(config, args) {
        Ok(_) => Ok(()),
        Err(BindError::Arguments(err)) => err.exit(),
        Err(err) => Err(err),
    }
}

/// Builder for binding config structs against an explicit argument vector
/// and environment.
///
/// Each call uses a fresh [`FlagSet`], so a `Binder` can bind any number of
/// times in one process.
///
/// ```
/// # use std::time::Duration;
/// # use confbind::{Binder, Configurable, env};
/// #[derive(Configurable, Default)]
/// struct Config {
///     #[flag(name = "addr", value = ":8000")]
///     addr: String,
///     #[flag(name = "timeout", value = "200ms", env_var = "TIMEOUT")]
///     timeout: Duration,
/// }
///
/// let mut config = Config::default();
/// Binder::new("serve")
///     .env(env::vars([("TIMEOUT", "5s")]))
///     .bind_from(&mut config, ["serve", "-addr", "localhost:9000"])?;
///
/// assert_eq!(config.addr, "localhost:9000");
/// assert_eq!(config.timeout, Duration::from_secs(5));
/// # Ok::<(), confbind::BindError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Binder<E = ProcessEnv> {
    program: String,
    about: Option<String>,
    env: E,
}

impl Binder<ProcessEnv> {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            env: ProcessEnv,
        }
    }
}

impl<E: EnvSource> Binder<E> {
    /// Set the description shown in help output.
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Replace the environment used for `env_var` lookups.
    pub fn env<F: EnvSource>(self, env: F) -> Binder<F> {
        Binder {
            program: self.program,
            about: self.about,
            env,
        }
    }

    /// Bind `config` and parse `args` (program name first).
    ///
    /// Fails with [`BindError::DefaultConversion`] on the first field whose
    /// resolved default does not convert, before any parsing. Fields before
    /// it already hold their defaults. Command-line problems come back as
    /// [`BindError::Arguments`].
    pub fn bind_from<C, I, T>(&self, config: &mut C, args: I) -> Result<Parsed, BindError>
    where
        C: Configurable + ?Sized,
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let flags = self.register(config)?;
        Ok(flags.parse(args)?)
    }

    /// Apply defaults to `config` and report the flags it would register,
    /// without parsing a command line.
    pub fn flags<C: Configurable + ?Sized>(&self, config: &mut C) -> Result<Vec<FlagInfo>, BindError> {
        Ok(self.register(config)?.info())
    }

    /// Walk the fields in order: resolve, convert, store, register.
    fn register<'a, C: Configurable + ?Sized>(
        &self,
        config: &'a mut C,
    ) -> Result<FlagSet<'a>, BindError> {
        let mut flags = FlagSet::new(self.program.clone());
        if let Some(about) = &self.about {
            flags = flags.about(about.clone());
        }

        for field in config.fields() {
            let mut slot = match field.target {
                Target::Slot(slot) => slot,
                Target::Unsupported { type_name } => {
                    trace!(flag = field.meta.name, type_name, "unsupported field type, skipped");
                    continue;
                }
            };

            let descriptor = descriptor::extract(&field.meta, &self.env);
            slot.assign(&descriptor.default)
                .map_err(|e| BindError::default_conversion(descriptor.name, e))?;
            flags.register(descriptor, slot);
        }

        Ok(flags)
    }
}
