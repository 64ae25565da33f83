//! Category membership.
//!
//! Every categorical cell must be a registered option of its field. An
//! unregistered or missing value is an error, never a silent null code.

use polars::prelude::DataFrame;
use ppd_model::{CategoryRegistry, FeatureError};

use crate::schema::FeatureSchema;
use crate::util::text_values;

/// Check every categorical cell against the registry.
pub fn check(
    schema: &FeatureSchema,
    registry: &CategoryRegistry,
    df: &DataFrame,
) -> Vec<FeatureError> {
    let mut issues = Vec::new();

    for spec in schema.categorical_columns() {
        let Ok(column) = df.column(spec.name()) else {
            continue;
        };
        let values = match text_values(column) {
            Ok(values) => values,
            Err(error) => {
                tracing::warn!(column = spec.name(), %error, "could not read column as text");
                continue;
            }
        };

        for (row, value) in values.iter().enumerate() {
            let value = value.as_deref().unwrap_or_default();
            if let Err(issue) = registry.encode_at(spec.feature, value, Some(row)) {
                issues.push(issue);
            }
        }
    }

    issues
}
