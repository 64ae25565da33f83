//! Raw classifier output and its normalization to one score per row.

use ppd_model::FeatureError;

/// Scores as a predictor returns them.
#[derive(Debug, Clone, PartialEq)]
pub enum RawScores {
    /// One value per row.
    Column(Vec<f64>),
    /// Row-major matrix, `n_cols` values per row.
    Matrix { values: Vec<f64>, n_cols: usize },
}

impl RawScores {
    /// Number of rows the output covers.
    pub fn rows(&self) -> usize {
        match self {
            Self::Column(values) => values.len(),
            Self::Matrix { values, n_cols } if *n_cols > 1 => values.len() / n_cols,
            Self::Matrix { values, .. } => values.len(),
        }
    }

    /// Positive-class score per row.
    ///
    /// Multi-column output uses the second column; single-column output is
    /// flattened. A ragged trailing row is dropped, which the count check in
    /// [`normalize_scores`] then reports.
    pub fn positive_class(self) -> Vec<f64> {
        match self {
            Self::Column(values) => values,
            Self::Matrix { values, n_cols } if n_cols > 1 => {
                values.chunks_exact(n_cols).map(|row| row[1]).collect()
            }
            Self::Matrix { values, .. } => values,
        }
    }
}

/// Reduce raw output to one score per input row.
///
/// # Errors
///
/// `ScoreShapeMismatch` when the score count differs from `expected_rows`.
pub fn normalize_scores(raw: RawScores, expected_rows: usize) -> Result<Vec<f64>, FeatureError> {
    let scores = raw.positive_class();
    if scores.len() != expected_rows {
        return Err(FeatureError::ScoreShapeMismatch {
            expected: expected_rows,
            actual: scores.len(),
        });
    }
    Ok(scores)
}
