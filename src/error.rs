//! # Error Types
//!
//! Error types used throughout the label engine. Layout and field lookups
//! never fail (they fall back or report advisories); errors come from
//! parsing, field selection, model checks, I/O and image encoding. Search
//! itself never fails: its errors end in the fuzzy fallback.

use thiserror::Error;

use crate::fields::SelectionError;
use crate::search::SearchError;

/// Main error type for label operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// Unknown template name
    #[error("Unknown template '{0}' (expected basic, professional or extended)")]
    UnknownTemplate(String),

    /// Unknown label size
    #[error("Unknown label size '{0}' (expected 58x30, 58x40 or 58x60)")]
    UnknownSize(String),

    /// Unknown field id
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Field could not be activated in a selection
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Embedding model unusable
    #[error(transparent)]
    Search(#[from] SearchError),

    /// JSON input error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
