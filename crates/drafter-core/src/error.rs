//! Errors raised when parsing style names and color values.

use thiserror::Error;

/// A style value that is not part of the supported vocabulary.
///
/// Every style option has a closed set of legal names; anything else is
/// rejected instead of falling back to a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("unknown color `{0}`")]
    UnknownColor(String),

    #[error("invalid color `{value}`: {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("unknown shape `{0}`, valid values: rectangle, ellipse, diamond")]
    UnknownShape(String),

    #[error("unknown side `{0}`, valid values: auto, top, bottom, left, right")]
    UnknownSide(String),

    #[error("unknown {kind} `{value}`")]
    UnknownStyle { kind: &'static str, value: String },
}
