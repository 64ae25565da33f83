//! Load-once predictor handles.
//!
//! A [`PredictorSlot`] owns one classifier for the life of the process. The
//! model file is read on first use and the outcome is kept: a failed load
//! leaves the slot unavailable, and every later request reports
//! `ModelUnavailable` instead of retrying or aborting.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use ppd_model::FeatureError;

use crate::error::Result;
use crate::hash::fingerprint_file;
use crate::lightgbm::LightGbmModel;
use crate::network::DenseNetwork;
use crate::predictor::Predictor;

/// The two classifiers the screening tool uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Gradient-boosted trees, used for single answers.
    TreeEnsemble,
    /// Feed-forward network, used for batch tables.
    NeuralNetwork,
}

impl ModelKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::TreeEnsemble => "tree-ensemble",
            Self::NeuralNetwork => "neural-network",
        }
    }

    /// Read and parse a model file of this kind.
    pub fn load(self, path: &Path) -> Result<Box<dyn Predictor>> {
        match self {
            Self::TreeEnsemble => Ok(Box::new(LightGbmModel::from_path(path)?)),
            Self::NeuralNetwork => Ok(Box::new(DenseNetwork::from_path(path)?)),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

enum SlotState {
    Ready(Box<dyn Predictor>),
    Unavailable(String),
}

/// One classifier, loaded at most once.
pub struct PredictorSlot {
    kind: ModelKind,
    path: Option<PathBuf>,
    state: OnceLock<SlotState>,
}

impl PredictorSlot {
    /// Slot that loads `path` on first use.
    pub fn lazy(kind: ModelKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: Some(path.into()),
            state: OnceLock::new(),
        }
    }

    /// Slot holding an already constructed predictor.
    pub fn ready(kind: ModelKind, predictor: Box<dyn Predictor>) -> Self {
        Self {
            kind,
            path: None,
            state: OnceLock::from(SlotState::Ready(predictor)),
        }
    }

    /// Slot that will never produce a predictor.
    pub fn unavailable(kind: ModelKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            path: None,
            state: OnceLock::from(SlotState::Unavailable(reason.into())),
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The loaded predictor.
    ///
    /// # Errors
    ///
    /// `ModelUnavailable` with the load failure as reason.
    pub fn predictor(&self) -> std::result::Result<&dyn Predictor, FeatureError> {
        match self.state() {
            SlotState::Ready(predictor) => Ok(predictor.as_ref()),
            SlotState::Unavailable(reason) => Err(FeatureError::ModelUnavailable {
                model: self.kind.to_string(),
                reason: reason.clone(),
            }),
        }
    }

    /// Whether the model loaded. Triggers the load if it has not run yet.
    pub fn is_available(&self) -> bool {
        matches!(self.state(), SlotState::Ready(_))
    }

    /// Availability, location, and fingerprint of the model file.
    pub fn status(&self) -> ModelStatus {
        let (available, detail) = match self.state() {
            SlotState::Ready(predictor) => (true, predictor.describe()),
            SlotState::Unavailable(reason) => (false, reason.clone()),
        };
        let fingerprint = self
            .path
            .as_deref()
            .and_then(|path| fingerprint_file(path).ok());
        ModelStatus {
            kind: self.kind,
            path: self.path.clone(),
            available,
            detail,
            fingerprint,
        }
    }

    fn state(&self) -> &SlotState {
        self.state.get_or_init(|| self.load())
    }

    fn load(&self) -> SlotState {
        let Some(path) = self.path.as_deref() else {
            return SlotState::Unavailable("no model path configured".to_string());
        };
        match self.kind.load(path) {
            Ok(predictor) => {
                tracing::info!(
                    model = %self.kind,
                    path = %path.display(),
                    detail = %predictor.describe(),
                    "model loaded"
                );
                SlotState::Ready(predictor)
            }
            Err(err) => {
                tracing::warn!(
                    model = %self.kind,
                    path = %path.display(),
                    error = %err,
                    "model failed to load; requests will report it unavailable"
                );
                SlotState::Unavailable(err.to_string())
            }
        }
    }
}

impl fmt::Debug for PredictorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state.get() {
            None => "not loaded",
            Some(SlotState::Ready(_)) => "ready",
            Some(SlotState::Unavailable(_)) => "unavailable",
        };
        f.debug_struct("PredictorSlot")
            .field("kind", &self.kind)
            .field("path", &self.path)
            .field("state", &state)
            .finish()
    }
}

/// Snapshot of one slot for status reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStatus {
    pub kind: ModelKind,
    pub path: Option<PathBuf>,
    pub available: bool,
    /// Model description when ready, the load failure otherwise.
    pub detail: String,
    /// SHA-256 of the model file, when it could be read.
    pub fingerprint: Option<String>,
}
