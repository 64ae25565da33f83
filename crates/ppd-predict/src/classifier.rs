//! The risk classifier adapter.

use ppd_model::{FeatureMatrix, FeatureRow, Prediction};

use crate::error::Result;
use crate::paths::ModelPaths;
use crate::scores::normalize_scores;
use crate::slot::{ModelKind, PredictorSlot};

/// Routes rows to the right classifier and turns its output into labels.
///
/// Single answers go to the tree ensemble, batch tables to the network.
/// Both outputs are normalized to one score per row and thresholded the
/// same way.
#[derive(Debug)]
pub struct RiskClassifier {
    tree: PredictorSlot,
    network: PredictorSlot,
}

impl RiskClassifier {
    pub fn new(tree: PredictorSlot, network: PredictorSlot) -> Self {
        Self { tree, network }
    }

    /// Classifier whose models load from `paths` on first use.
    pub fn from_paths(paths: &ModelPaths) -> Self {
        Self::new(
            PredictorSlot::lazy(ModelKind::TreeEnsemble, &paths.tree),
            PredictorSlot::lazy(ModelKind::NeuralNetwork, &paths.network),
        )
    }

    pub fn tree(&self) -> &PredictorSlot {
        &self.tree
    }

    pub fn network(&self) -> &PredictorSlot {
        &self.network
    }

    /// Score one encoded answer set with the tree ensemble.
    ///
    /// # Errors
    ///
    /// `ModelUnavailable` if the model did not load, `ScoreShapeMismatch` if
    /// it returned anything but one score.
    pub fn classify_single(&self, row: &FeatureRow) -> Result<Prediction> {
        let _span = tracing::debug_span!("classify_single").entered();
        let scores = score(&self.tree, &FeatureMatrix::single(*row))?;
        let prediction = Prediction::from_score(scores[0]);
        tracing::debug!(label = prediction.label.short_name(), "answers classified");
        Ok(prediction)
    }

    /// Score a batch with the network, one prediction per row in order.
    ///
    /// # Errors
    ///
    /// `ModelUnavailable` if the model did not load, `ScoreShapeMismatch` if
    /// the score count differs from the row count.
    pub fn classify_batch(&self, matrix: &FeatureMatrix) -> Result<Vec<Prediction>> {
        let _span = tracing::debug_span!("classify_batch", rows = matrix.len()).entered();
        if matrix.is_empty() {
            return Ok(Vec::new());
        }
        let predictions: Vec<Prediction> = score(&self.network, matrix)?
            .into_iter()
            .map(Prediction::from_score)
            .collect();
        tracing::debug!(rows = predictions.len(), "batch classified");
        Ok(predictions)
    }
}

/// Run the slot's predictor and check one score came back per row.
fn score(slot: &PredictorSlot, matrix: &FeatureMatrix) -> Result<Vec<f64>> {
    let predictor = slot.predictor()?;
    let raw = predictor.predict(matrix)?;
    let scores = normalize_scores(raw, matrix.len())?;
    tracing::trace!(model = %slot.kind(), rows = scores.len(), "scores normalized");
    Ok(scores)
}
