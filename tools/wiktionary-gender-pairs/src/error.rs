//! Error types for the gender-pair extractor.

use thiserror::Error;

use crate::table::Direction;

/// Fatal failures. Cross-direction mismatches are not errors; see `reconcile::Mismatch`.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The same key was assigned two different counterpart sequences.
    #[error("conflicting entries found for {table}['{key}']: {existing:?}/{new:?}")]
    Contradiction {
        table: Direction,
        key: String,
        existing: Vec<String>,
        new: Vec<String>,
    },

    #[error("malformed page XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("page has no <title> element")]
    MissingTitle,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize mismatch report: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
