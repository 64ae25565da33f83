//! Batch table encoding and label attachment.
//!
//! Predictions are zipped back onto the input rows by position, so every
//! step here preserves row order and count.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use ppd_ingest::PREDICTION_COLUMN;
use ppd_model::{FEATURE_COUNT, FeatureError, FeatureMatrix, FeatureRow, Prediction};
use ppd_validate::{ColumnKind, numeric_values, text_values, validate_table};

use crate::FeatureEncoder;
use crate::error::Result;

impl FeatureEncoder<'_> {
    /// Validate and encode a batch table, one row per respondent.
    ///
    /// Columns are projected into canonical order; extra columns are ignored.
    ///
    /// # Errors
    ///
    /// The first failing validation stage, reported whole. No rows are
    /// encoded unless the entire table is valid.
    pub fn encode_table(&self, df: &DataFrame) -> Result<FeatureMatrix> {
        validate_table(self.schema(), self.registry(), df).into_result()?;

        let height = df.height();
        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(FEATURE_COUNT);

        for spec in self.schema().columns() {
            let column = df.column(spec.name())?;
            let encoded = match spec.kind {
                ColumnKind::Categorical => text_values(column)?
                    .iter()
                    .enumerate()
                    .map(|(row, value)| {
                        let value = value.as_deref().unwrap_or_default();
                        self.registry()
                            .encode_at(spec.feature, value, Some(row))
                            .map(f64::from)
                    })
                    .collect::<std::result::Result<Vec<f64>, FeatureError>>()?,
                ColumnKind::Numeric { .. } => numeric_values(column)?
                    .into_iter()
                    .enumerate()
                    .map(|(row, value)| {
                        value.ok_or_else(|| FeatureError::InvalidType {
                            column: spec.name().to_string(),
                            expected: "numeric",
                            samples: vec![format!("row {}", row + 1)],
                        })
                    })
                    .collect::<std::result::Result<Vec<f64>, FeatureError>>()?,
            };
            ensure_row_count(height, encoded.len())?;
            columns.push(encoded);
        }

        let matrix: FeatureMatrix = (0..height)
            .map(|row| FeatureRow::new(std::array::from_fn(|col| columns[col][row])))
            .collect();
        ensure_row_count(height, matrix.len())?;

        tracing::info!(rows = matrix.len(), "batch table encoded");
        Ok(matrix)
    }
}

/// Append the `Prediction` column holding each row's label text.
///
/// # Errors
///
/// `RowCountMismatch` if the prediction count differs from the table height;
/// the table is left unchanged.
pub fn attach_predictions(df: &mut DataFrame, predictions: &[Prediction]) -> Result<()> {
    ensure_row_count(df.height(), predictions.len())?;

    let labels: Vec<&str> = predictions
        .iter()
        .map(|prediction| prediction.label.description())
        .collect();
    df.with_column(Series::new(PREDICTION_COLUMN.into(), labels).into_column())?;
    Ok(())
}

fn ensure_row_count(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(FeatureError::RowCountMismatch { expected, actual }.into())
    }
}
