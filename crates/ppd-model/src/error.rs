//! Error taxonomy shared by the encoding, validation, and scoring layers.

use thiserror::Error;

use crate::feature::Feature;
use crate::validation::ValidationOutcome;

/// Errors raised while turning survey answers into scored feature rows.
///
/// Input problems (`UnknownOption`, `MissingColumns`, `InvalidType`,
/// `OutOfRange`) are reported to the user with full detail. Classifier
/// contract violations (`ScoreShapeMismatch`, `RowCountMismatch`) are
/// integrity faults and are rendered generically by [`user_message`].
///
/// [`user_message`]: FeatureError::user_message
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// A field name that is not one of the classifier columns.
    #[error("unknown field '{name}'")]
    UnknownField { name: String },

    /// An answer that is not registered for its field.
    #[error("unknown option '{value}' for {field}{}", at_row(.row))]
    UnknownOption {
        field: Feature,
        value: String,
        row: Option<usize>,
    },

    /// Batch input lacks required columns. Lists every absent column.
    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// A column holds values of the wrong type.
    #[error("{column} column must contain {expected} values{}", samples_suffix(.samples))]
    InvalidType {
        column: String,
        expected: &'static str,
        samples: Vec<String>,
    },

    /// A numeric value outside its accepted bounds.
    #[error("{column} value {value} is outside {min}..={max}{}", at_row(.row))]
    OutOfRange {
        column: String,
        value: f64,
        min: f64,
        max: f64,
        row: Option<usize>,
    },

    /// Several validation issues found in one stage.
    #[error("{0}")]
    Rejected(ValidationOutcome),

    /// The classifier returned a score count that differs from its input rows.
    #[error("classifier returned {actual} scores for {expected} rows")]
    ScoreShapeMismatch { expected: usize, actual: usize },

    /// Encoded or labelled output lost rows relative to the input table.
    #[error("expected {expected} rows, found {actual}")]
    RowCountMismatch { expected: usize, actual: usize },

    /// The predictor could not be loaded at startup.
    #[error("{model} model unavailable: {reason}")]
    ModelUnavailable { model: String, reason: String },
}

impl FeatureError {
    /// True for classifier/adapter contract violations rather than bad input.
    pub fn is_integrity_fault(&self) -> bool {
        matches!(
            self,
            Self::ScoreShapeMismatch { .. } | Self::RowCountMismatch { .. }
        )
    }

    /// Message suitable for end users.
    pub fn user_message(&self) -> String {
        if self.is_integrity_fault() {
            "the prediction model returned an unexpected result; please verify the model".to_string()
        } else {
            self.to_string()
        }
    }
}

fn at_row(row: &Option<usize>) -> String {
    // Rows are reported 1-based, counting data rows below the header.
    match row {
        Some(idx) => format!(" (row {})", idx + 1),
        None => String::new(),
    }
}

fn samples_suffix(samples: &[String]) -> String {
    if samples.is_empty() {
        String::new()
    } else {
        format!(" (found: {})", samples.join(", "))
    }
}

/// Result type for feature operations.
pub type Result<T> = std::result::Result<T, FeatureError>;
