//! Error taxonomy for the column extraction and row assembly stages.

use thiserror::Error;

/// Failure raised by the sentiment scorer for a single text.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct ScorerError(pub String);

/// Fatal extraction errors. Every variant aborts the run: a partial column
/// would desynchronize the rows, so nothing is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    /// A field documented as always present is missing.
    #[error("column `{column}`: record {index} is missing required field `{path}`")]
    Structural {
        column: &'static str,
        index: usize,
        path: String,
    },

    /// A field exists but does not have the expected JSON type.
    #[error("column `{column}`: record {index} field `{path}` is not {expected}")]
    TypeMismatch {
        column: &'static str,
        index: usize,
        path: String,
        expected: &'static str,
    },

    /// The sentiment scorer rejected a text.
    #[error("column `{column}`: sentiment scoring failed on record {index}: {source}")]
    Scorer {
        column: &'static str,
        index: usize,
        #[source]
        source: ScorerError,
    },

    /// An extractor produced a column whose length differs from the record count.
    #[error("column `{column}` has {actual} values, expected {expected}")]
    LengthMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl ExtractError {
    /// Name of the column (extractor) that failed.
    pub fn column(&self) -> &'static str {
        match self {
            ExtractError::Structural { column, .. }
            | ExtractError::TypeMismatch { column, .. }
            | ExtractError::Scorer { column, .. }
            | ExtractError::LengthMismatch { column, .. } => column,
        }
    }

    /// Record index that failed, when the failure is tied to one record.
    pub fn index(&self) -> Option<usize> {
        match self {
            ExtractError::Structural { index, .. }
            | ExtractError::TypeMismatch { index, .. }
            | ExtractError::Scorer { index, .. } => Some(*index),
            ExtractError::LengthMismatch { .. } => None,
        }
    }
}

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
