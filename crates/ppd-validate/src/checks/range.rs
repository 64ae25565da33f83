//! Numeric range validation.

use polars::prelude::DataFrame;
use ppd_model::FeatureError;

use crate::schema::FeatureSchema;
use crate::util::numeric_values;

/// Check that every numeric value lies within its column's inclusive bounds.
///
/// Runs after [`super::datatype`], so every cell is expected to be a number.
/// One issue is reported per offending row.
pub fn check(schema: &FeatureSchema, df: &DataFrame) -> Vec<FeatureError> {
    let mut issues = Vec::new();

    for (spec, min, max) in schema.numeric_columns() {
        let Ok(column) = df.column(spec.name()) else {
            continue;
        };
        let Ok(values) = numeric_values(column) else {
            continue;
        };

        for (row, value) in values.into_iter().enumerate() {
            let Some(value) = value else {
                continue;
            };
            if !(min..=max).contains(&value) {
                issues.push(FeatureError::OutOfRange {
                    column: spec.name().to_string(),
                    value,
                    min,
                    max,
                    row: Some(row),
                });
            }
        }
    }

    issues
}
