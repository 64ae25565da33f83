//! Risk scoring.
//!
//! - [`Predictor`]: the trait a loaded classifier implements
//! - [`RiskClassifier`]: routes rows to a classifier, normalizes its output
//!   to one score per row, and applies the risk threshold
//! - [`PredictorSlot`]: a classifier loaded once, or the reason it could not be
//! - [`LightGbmModel`] and [`DenseNetwork`]: the two bundled scorers
//!
//! Model files are located through [`ModelPaths`] and identified in status
//! output by their SHA-256 fingerprint.

mod classifier;
mod error;
mod file;
mod hash;
mod lightgbm;
mod network;
mod paths;
mod predictor;
mod scores;
mod slot;

pub use classifier::RiskClassifier;
pub use error::{PredictError, Result};
pub use hash::{fingerprint_file, sha256_hex};
pub use lightgbm::{LightGbmModel, Objective};
pub use network::{Activation, DenseLayer, DenseNetwork};
pub use paths::{
    DEFAULT_MODELS_DIR, MODELS_DIR_ENV_VAR, ModelPaths, NETWORK_MODEL_FILE, TREE_MODEL_FILE,
    models_dir,
};
pub use predictor::Predictor;
pub use scores::{RawScores, normalize_scores};
pub use slot::{ModelKind, ModelStatus, PredictorSlot};
