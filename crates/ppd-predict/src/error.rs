//! Error types for model loading and scoring.

use std::path::PathBuf;

use ppd_model::FeatureError;
use thiserror::Error;

use crate::slot::ModelKind;

/// Errors raised while loading or running a classifier.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Model file does not exist.
    #[error("model file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the model file.
    #[error("failed to read model file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Model file parsed but its content is unusable.
    #[error("invalid {kind} model: {message}")]
    InvalidModel { kind: ModelKind, message: String },

    /// Network model JSON is malformed.
    #[error("failed to parse {kind} model: {source}")]
    Json {
        kind: ModelKind,
        #[source]
        source: serde_json::Error,
    },

    /// The model was trained on different columns.
    #[error(
        "{kind} model expects features [{}], survey columns are [{}]",
        .found.join(", "),
        .expected.join(", ")
    )]
    FeatureNames {
        kind: ModelKind,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Adapter contract failures and unavailable models.
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

impl PredictError {
    pub(crate) fn invalid(kind: ModelKind, message: impl Into<String>) -> Self {
        Self::InvalidModel {
            kind,
            message: message.into(),
        }
    }

    /// The feature error, if this is one.
    pub fn as_feature(&self) -> Option<&FeatureError> {
        match self {
            Self::Feature(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for prediction operations.
pub type Result<T> = std::result::Result<T, PredictError>;
