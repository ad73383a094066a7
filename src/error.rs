use thiserror::Error;

use crate::convert::ConversionError;
use crate::types::FlagKind;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("Invalid default for flag '{flag}': cannot parse \"{value}\" as {kind}: {reason}")]
    DefaultConversion {
        flag: String,
        value: String,
        kind: FlagKind,
        reason: String,
    },

    #[error("Command-line flags were already parsed in this process; call reset_command_line() first")]
    AlreadyParsed,

    #[error(transparent)]
    Arguments(#[from] clap::Error),
}

impl BindError {
    pub(crate) fn default_conversion(flag: &str, err: ConversionError) -> Self {
        BindError::DefaultConversion {
            flag: flag.to_string(),
            value: err.value,
            kind: err.kind,
            reason: err.reason,
        }
    }
}
