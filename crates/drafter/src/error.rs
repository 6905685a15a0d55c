//! Error types for Drafter operations.
//!
//! This module provides the main error type [`DrafterError`]. Every builder
//! call validates its input before touching the document, so a returned
//! error means nothing was added.

use std::io;

use thiserror::Error;

use drafter_core::{error::StyleError, identifier::ElementId};

/// The main error type for Drafter operations.
#[derive(Debug, Error)]
pub enum DrafterError {
    #[error("unknown color `{0}`")]
    UnknownColor(String),

    #[error("unknown shape `{0}`, valid values: rectangle, ellipse, diamond")]
    UnknownShape(String),

    #[error("unknown side `{0}`, valid values: auto, top, bottom, left, right")]
    UnknownSide(String),

    #[error("invalid style: {0}")]
    InvalidStyle(String),

    #[error("element `{0}` does not belong to this document")]
    DanglingReference(ElementId),

    #[error("identifier `{0}` is already registered")]
    DuplicateIdentifier(String),

    #[error("identifier `{0}` was never registered")]
    UnknownIdentifier(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<StyleError> for DrafterError {
    fn from(error: StyleError) -> Self {
        match error {
            StyleError::UnknownColor(name) => Self::UnknownColor(name),
            StyleError::UnknownShape(name) => Self::UnknownShape(name),
            StyleError::UnknownSide(name) => Self::UnknownSide(name),
            err @ (StyleError::InvalidColor { .. } | StyleError::UnknownStyle { .. }) => {
                Self::InvalidStyle(err.to_string())
            }
        }
    }
}
