//! String-to-value conversion for the supported field types.
//!
//! Each routine treats the empty string as the type's zero value. The clap
//! value parsers wrap the same routines, so a value given on the command line
//! obeys the grammar of a declared or environment default, except that an
//! empty command-line value is rejected for every type but text.

use std::time::Duration;

use clap::builder::ValueParser;
use thiserror::Error;

use crate::types::FlagKind;

const BOOL_LITERALS: &str = "1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False";

/// A string that could not be converted into a field's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse \"{value}\" as {kind}: {reason}")]
pub struct ConversionError {
    pub value: String,
    pub kind: FlagKind,
    pub reason: String,
}

impl ConversionError {
    fn new(value: &str, kind: FlagKind, reason: impl ToString) -> Self {
        Self {
            value: value.to_string(),
            kind,
            reason: reason.to_string(),
        }
    }
}

/// Parse a boolean literal.
pub fn to_bool(value: &str) -> Result<bool, ConversionError> {
    match value {
        "" => Ok(false),
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ConversionError::new(
            value,
            FlagKind::Bool,
            format!("expected one of {BOOL_LITERALS}"),
        )),
    }
}

/// Text passes through unchanged.
pub fn to_text(value: &str) -> String {
    value.to_string()
}

/// Parse a base-10 32-bit signed integer.
pub fn to_i32(value: &str) -> Result<i32, ConversionError> {
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|e| ConversionError::new(value, FlagKind::Int32, e))
}

/// Parse a base-10 64-bit signed integer.
pub fn to_i64(value: &str) -> Result<i64, ConversionError> {
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|e| ConversionError::new(value, FlagKind::Int64, e))
}

/// Parse a duration literal such as `200ms`, `30s` or `1h 30m`.
pub fn to_duration(value: &str) -> Result<Duration, ConversionError> {
    if value.is_empty() {
        return Ok(Duration::ZERO);
    }
    humantime::parse_duration(value)
        .map_err(|e| ConversionError::new(value, FlagKind::Duration, e))
}

/// Check that `value` converts into `kind`, without keeping the result.
pub fn validate(kind: FlagKind, value: &str) -> Result<(), ConversionError> {
    match kind {
        FlagKind::Bool => to_bool(value).map(drop),
        FlagKind::Text => Ok(()),
        FlagKind::Int32 => to_i32(value).map(drop),
        FlagKind::Int64 => to_i64(value).map(drop),
        FlagKind::Duration => to_duration(value).map(drop),
    }
}

fn required(value: &str, kind: FlagKind) -> Result<(), ConversionError> {
    if value.is_empty() {
        return Err(ConversionError::new(value, kind, "a value is required"));
    }
    Ok(())
}

fn bool_arg(value: &str) -> Result<bool, ConversionError> {
    required(value, FlagKind::Bool)?;
    to_bool(value)
}

fn i32_arg(value: &str) -> Result<i32, ConversionError> {
    required(value, FlagKind::Int32)?;
    to_i32(value)
}

fn i64_arg(value: &str) -> Result<i64, ConversionError> {
    required(value, FlagKind::Int64)?;
    to_i64(value)
}

fn duration_arg(value: &str) -> Result<Duration, ConversionError> {
    required(value, FlagKind::Duration)?;
    to_duration(value)
}

/// The clap value parser that produces `kind`'s native type.
pub(crate) fn value_parser(kind: FlagKind) -> ValueParser {
    match kind {
        FlagKind::Bool => ValueParser::new(bool_arg),
        FlagKind::Text => ValueParser::string(),
        FlagKind::Int32 => ValueParser::new(i32_arg),
        FlagKind::Int64 => ValueParser::new(i64_arg),
        FlagKind::Duration => ValueParser::new(duration_arg),
    }
}
