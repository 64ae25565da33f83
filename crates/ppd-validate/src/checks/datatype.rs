//! Data type validation.
//!
//! Checks that numeric columns contain only numbers. A text column passes if
//! every cell parses as a number; missing cells never pass.

use polars::prelude::{Column, DataFrame};
use ppd_model::FeatureError;

use super::MAX_SAMPLES;
use crate::schema::FeatureSchema;
use crate::util::{is_numeric_dtype, text_values};

const MISSING_SAMPLE: &str = "(missing)";

/// Check that every numeric column holds a number in every row.
pub fn check(schema: &FeatureSchema, df: &DataFrame) -> Vec<FeatureError> {
    let mut issues = Vec::new();

    for (spec, _, _) in schema.numeric_columns() {
        let Ok(column) = df.column(spec.name()) else {
            continue;
        };

        let samples = non_numeric_samples(column);
        if !samples.is_empty() {
            tracing::debug!(column = spec.name(), "non-numeric values found");
            issues.push(FeatureError::InvalidType {
                column: spec.name().to_string(),
                expected: "numeric",
                samples,
            });
        }
    }

    issues
}

fn non_numeric_samples(column: &Column) -> Vec<String> {
    if is_numeric_dtype(column.dtype()) {
        return if column.null_count() > 0 {
            vec![MISSING_SAMPLE.to_string()]
        } else {
            Vec::new()
        };
    }

    let Ok(values) = text_values(column) else {
        return vec![column.dtype().to_string()];
    };

    let mut samples: Vec<String> = Vec::new();
    for value in values {
        let trimmed = value.as_deref().map(str::trim).unwrap_or_default();
        if trimmed.parse::<f64>().is_ok() {
            continue;
        }
        let sample = if trimmed.is_empty() {
            MISSING_SAMPLE.to_string()
        } else {
            trimmed.to_string()
        };
        if !samples.contains(&sample) {
            samples.push(sample);
        }
        if samples.len() >= MAX_SAMPLES {
            break;
        }
    }
    samples
}
