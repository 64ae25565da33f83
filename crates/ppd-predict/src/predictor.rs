//! The seam between the adapter and a concrete classifier.

use ppd_model::FeatureMatrix;

use crate::error::Result;
use crate::scores::RawScores;

/// A loaded classifier.
///
/// Implementations score every row of the matrix and return the output in
/// whatever shape the model produces; [`RiskClassifier`] normalizes it.
/// Rows arrive in canonical column order.
///
/// [`RiskClassifier`]: crate::RiskClassifier
pub trait Predictor: Send + Sync {
    /// Short description used in logs and status output.
    fn describe(&self) -> String {
        "predictor".to_string()
    }

    /// Score the rows.
    ///
    /// # Errors
    ///
    /// Implementation-specific scoring failures.
    fn predict(&self, rows: &FeatureMatrix) -> Result<RawScores>;
}
