//! Bind an annotated config struct to command-line flags, with environment
//! overrides and typed defaults.
//!
//! Small service binaries usually want one struct that describes all of their
//! runtime configuration. confbind turns that struct into a flag set: every
//! field gets a flag, a default, a help line, and optionally an environment
//! variable that overrides the default.
//!
//! ```ignore
//! #[derive(Configurable, Default)]
//! struct Config {
//!     #[flag(name = "addr", value = ":8000", usage = "Listen and serve address")]
//!     addr: String,
//!     #[flag(name = "timeout", value = "200ms", usage = "Request timeout")]
//!     timeout: Duration,
//!     #[flag(name = "apiKey", env_var = "API_KEY", usage = "API key")]
//!     api_key: String,
//! }
//!
//! let mut config = Config::default();
//! confbind::bind(&mut config)?;
//! ```
//!
//! Run as `serve -addr localhost:9000 -timeout 30s` and `config` holds those
//! values; run with no arguments and it holds `":8000"` and 200ms, with
//! `api_key` taken from `$API_KEY`.
//!
//! # Field metadata
//!
//! Each field carries four string attributes, all optional:
//!
//! | Attribute | Meaning |
//! |-----------|---------|
//! | `name`    | Flag identifier. Empty means the field is never exposed. |
//! | `value`   | Default, written as a string. Empty means the zero value. |
//! | `usage`   | One line of help text. |
//! | `env_var` | Environment variable that overrides `value` when non-empty. |
//!
//! With the `derive` feature (on by default) they are written as
//! `#[flag(...)]` attributes. Without it, implement [`Configurable`] by hand
//! and describe each field with [`FieldMeta`].
//!
//! # Supported types
//!
//! `bool`, `String`, `i32`, `i64` and [`std::time::Duration`]. The set is
//! closed; see [`Slot`]. A field of any other type is skipped: it gets no
//! flag, raises no error, and keeps whatever value it had.
//!
//! Defaults and command-line values share one grammar per type (see
//! [`convert`]): boolean literals `1 t T TRUE true True 0 f F FALSE false
//! False`, base-10 integers, and duration literals such as `200ms`, `30s` or
//! `1h 30m`. The empty string always converts to the zero value.
//!
//! # Precedence
//!
//! ```text
//! Zero value          ""
//!        ↑ overridden by
//! Declared default    value = "..."
//!        ↑ overridden by
//! Environment         env_var = "..." (non-empty values only)
//!        ↑ overridden by
//! Command line        -name value
//! ```
//!
//! # Failing fast
//!
//! A default that does not convert (a typo in a declared `value` or a bad
//! environment value) stops binding at that field with
//! [`BindError::DefaultConversion`], naming the flag, the offending text and
//! the expected type. Nothing is parsed. Fields earlier in the struct keep the
//! defaults already written into them.
//!
//! # Command-line syntax
//!
//! `-name value`, `-name=value`, and the double-dash forms. Boolean flags are
//! set with a bare `-name` and cleared with `-name=false`. Flag parsing stops
//! at the first positional argument or `--`; the rest is available from
//! [`Parsed::args`] when binding through a [`Binder`]. A value given on the
//! command line may be empty only for text flags.
//!
//! `-h` and `--help` print help, unless a field claims `h` or `help` as its
//! flag name, in which case that spelling sets the field instead.
//!
//! # One command line per process
//!
//! [`bind`] reads the process's own arguments and may run once. Calling it
//! again returns [`BindError::AlreadyParsed`] unless [`reset_command_line`]
//! was called in between. [`Binder`] takes an explicit argument vector and
//! environment and uses a fresh flag set on every call, which is what tests
//! and embedders should use.
//!
//! # Logging
//!
//! Binding emits [`tracing`] events: `debug` for environment overrides and
//! registrations, `trace` for skipped fields, `warn` for a flag name
//! registered twice. No subscriber is installed.

extern crate self as confbind;

pub mod convert;
pub mod env;
pub mod error;
pub mod types;

mod binder;
mod descriptor;
mod field;
mod registry;

#[cfg(all(test, feature = "derive"))]
mod fixtures;

pub use binder::{Binder, bind};
pub use descriptor::{Descriptor, extract};
pub use env::{EnvSource, ProcessEnv};
pub use error::BindError;
pub use field::{Configurable, Field, Slot, Target};
pub use registry::{FlagSet, reset_command_line};
pub use types::{FieldMeta, FlagInfo, FlagKind, Parsed};

#[cfg(feature = "derive")]
pub use confbind_derive::Configurable;
