//! Error types for feature building.

use ppd_model::FeatureError;
use thiserror::Error;

/// Errors raised while building feature rows.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Input failed validation or encoding.
    #[error(transparent)]
    Feature(#[from] FeatureError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl TransformError {
    /// The feature error, if this is one.
    pub fn as_feature(&self) -> Option<&FeatureError> {
        match self {
            Self::Feature(err) => Some(err),
            Self::DataFrame { .. } => None,
        }
    }
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for feature building.
pub type Result<T> = std::result::Result<T, TransformError>;
