//! Error types for malformed trade input

use serde_json::Value;

/// Raised when the decoded input does not have the trade-record shape.
///
/// Any of these aborts the whole conversion; no rows are produced for the
/// offending trade or any other trade.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedInputError {
    #[error("malformed input: root must be an array of trade records, found {found}")]
    RootNotArray { found: &'static str },

    #[error("malformed input: trade {index} must be an object, found {found}")]
    TradeNotObject { index: usize, found: &'static str },

    #[error("malformed input: trade {index} field group '{group}' must be an object, found {found}")]
    GroupNotObject {
        index: usize,
        group: String,
        found: &'static str,
    },

    #[error("malformed input: trade {index} leg '{leg}' must be an object, found {found}")]
    LegNotObject {
        index: usize,
        leg: String,
        found: &'static str,
    },
}

impl MalformedInputError {
    /// Index of the offending trade, if the error is tied to one
    pub fn trade_index(&self) -> Option<usize> {
        match self {
            Self::RootNotArray { .. } => None,
            Self::TradeNotObject { index, .. }
            | Self::GroupNotObject { index, .. }
            | Self::LegNotObject { index, .. } => Some(*index),
        }
    }

    /// Key of the offending leg, if the error is tied to one
    pub fn leg(&self) -> Option<&str> {
        match self {
            Self::LegNotObject { leg, .. } => Some(leg),
            _ => None,
        }
    }
}

/// Human-readable JSON type name used in error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
