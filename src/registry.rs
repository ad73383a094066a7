//! The flag registry: records bound fields and parses the argument vector once.
//!
//! Registration is backed by [`clap`]. A [`FlagSet`] collects one entry per
//! bound field, builds a `clap::Command` from them when asked to parse, and
//! copies every explicitly passed value back into the field it came from.
//!
//! Arguments follow the classic single-dash convention: `-name value`,
//! `-name=value`, and `-name` alone for booleans. Double-dash spellings are
//! accepted too. Flag parsing stops at the first positional argument or at
//! `--`; everything after it is returned in [`Parsed::args`].
//!
//! # Process-wide registry
//!
//! [`bind`](crate::bind) parses the process's own command line and may do so
//! once. The guard behind that rule lives here; [`reset_command_line`] clears
//! it for test suites that need to bind more than once per process.

use std::ffi::OsString;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{debug, warn};

use crate::convert;
use crate::descriptor::Descriptor;
use crate::error::BindError;
use crate::field::Slot;
use crate::types::{FlagInfo, FlagKind, Parsed};

const POSITIONAL_ID: &str = "__confbind_args";
const HELP_ID: &str = "__confbind_help";

static COMMAND_LINE_USED: AtomicBool = AtomicBool::new(false);

/// Mark the process-wide command line as used, failing if it already was.
pub(crate) fn claim_command_line() -> Result<(), BindError> {
    if COMMAND_LINE_USED.swap(true, Ordering::SeqCst) {
        return Err(BindError::AlreadyParsed);
    }
    Ok(())
}

/// Allow [`bind`](crate::bind) to run again in this process.
pub fn reset_command_line() {
    COMMAND_LINE_USED.store(false, Ordering::SeqCst);
}

struct Registered<'a> {
    name: &'static str,
    usage: &'static str,
    default: String,
    slot: Slot<'a>,
}

impl Registered<'_> {
    fn kind(&self) -> FlagKind {
        self.slot.kind()
    }

    fn arg(&self) -> Arg {
        let kind = self.kind();
        let mut arg = Arg::new(self.name)
            .long(self.name)
            .help(self.usage)
            .value_parser(convert::value_parser(kind))
            .action(ArgAction::Set);

        if !self.default.is_empty() {
            arg = arg.default_value(self.default.clone());
        }

        match kind {
            FlagKind::Bool => arg
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true"),
            _ => arg
                .num_args(1)
                .allow_hyphen_values(true)
                .value_name(kind.value_name()),
        }
    }
}

/// A set of bound flags, borrowing each field's storage for `'a`.
pub struct FlagSet<'a> {
    program: String,
    about: Option<String>,
    flags: Vec<Registered<'a>>,
}

impl<'a> FlagSet<'a> {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            flags: Vec::new(),
        }
    }

    /// Text shown above the flag list in help output.
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Register a field whose storage already holds its converted default.
    ///
    /// A field with an empty name is not exposed. A name that is already
    /// registered is taken over by the later field; the earlier one keeps its
    /// default but can no longer be set from the command line.
    pub fn register(&mut self, descriptor: Descriptor, slot: Slot<'a>) {
        if descriptor.name.is_empty() {
            debug!(kind = %slot.kind(), "field has no flag name, default applied only");
            return;
        }

        if let Some(pos) = self.flags.iter().position(|f| f.name == descriptor.name) {
            warn!(flag = descriptor.name, "flag registered twice, earlier field shadowed");
            self.flags.remove(pos);
        }

        debug!(flag = descriptor.name, kind = %slot.kind(), default = %descriptor.default, "flag registered");
        self.flags.push(Registered {
            name: descriptor.name,
            usage: descriptor.usage,
            default: descriptor.default,
            slot,
        });
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// The registered flags, in registration order.
    pub fn info(&self) -> Vec<FlagInfo> {
        self.flags
            .iter()
            .map(|f| FlagInfo {
                name: f.name.to_string(),
                kind: f.kind(),
                usage: f.usage.to_string(),
                default: f.default.clone(),
            })
            .collect()
    }

    /// The `clap::Command` these flags parse with.
    ///
    /// Help is offered on `-h` and `--help` unless a registered flag owns
    /// that name.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(self.program.clone())
            .args_override_self(true)
            .disable_help_flag(true)
            .arg(
                Arg::new(POSITIONAL_ID)
                    .value_name("ARGS")
                    .num_args(0..)
                    .action(ArgAction::Append),
            );
        if let Some(about) = &self.about {
            cmd = cmd.about(about.clone());
        }
        if let Some(help) = self.help_arg() {
            cmd = cmd.arg(help);
        }
        for flag in &self.flags {
            cmd = cmd.arg(flag.arg());
        }
        cmd
    }

    /// Parse `args` (program name first) and write every explicitly passed
    /// flag into its field.
    pub fn parse<I, T>(mut self, args: I) -> Result<Parsed, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = self.normalize(args.into_iter().map(Into::into));
        let matches = self.command().try_get_matches_from(args)?;

        let mut set = Vec::new();
        for flag in &mut self.flags {
            if matches.value_source(flag.name) == Some(ValueSource::CommandLine) {
                flag.slot.store_match(&matches, flag.name);
                set.push(flag.name.to_string());
            }
        }

        Ok(Parsed {
            set,
            args: positional(&matches),
        })
    }

    fn is_registered(&self, name: &str) -> bool {
        self.flags.iter().any(|f| f.name == name)
    }

    /// clap's help switch on whichever of `-h` and `--help` is still free.
    fn help_arg(&self) -> Option<Arg> {
        let short = !self.is_registered("h");
        let long = !self.is_registered("help");
        if !short && !long {
            return None;
        }
        let mut arg = Arg::new(HELP_ID)
            .help("Print help")
            .action(ArgAction::Help);
        if short {
            arg = arg.short('h');
        }
        if long {
            arg = arg.long("help");
        }
        Some(arg)
    }

    fn takes_value(&self, name: &str) -> bool {
        self.flags
            .iter()
            .any(|f| f.name == name && f.kind() != FlagKind::Bool)
    }

    /// Rewrite single-dash flags into clap's double-dash form and fence off
    /// the positional tail with `--`.
    fn normalize(&self, mut args: impl Iterator<Item = OsString>) -> Vec<OsString> {
        let mut out = Vec::new();
        out.extend(args.next());

        while let Some(arg) = args.next() {
            let Some(text) = arg.to_str() else {
                out.push("--".into());
                out.push(arg);
                break;
            };

            if text == "--" {
                out.push(arg);
                break;
            }
            if text == "-" || !text.starts_with('-') {
                out.push("--".into());
                out.push(arg);
                break;
            }
            if text == "-h" && !self.is_registered("h") {
                out.push(arg);
                continue;
            }

            let bare = text
                .strip_prefix("--")
                .or_else(|| text.strip_prefix('-'))
                .unwrap_or(text);
            let has_inline_value = bare.contains('=');
            let name = bare.split('=').next().unwrap_or(bare);
            let takes_value = !has_inline_value && self.takes_value(name);

            out.push(format!("--{bare}").into());
            if takes_value && let Some(value) = args.next() {
                out.push(value);
            }
        }

        out.extend(args);
        out
    }
}

fn positional(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>(POSITIONAL_ID)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}
