//! Column presence.

use polars::prelude::DataFrame;
use ppd_model::FeatureError;

use crate::schema::FeatureSchema;

/// Report every required column absent from the table in one issue.
pub fn check(schema: &FeatureSchema, df: &DataFrame) -> Option<FeatureError> {
    let present: Vec<&str> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();

    let missing: Vec<String> = schema
        .required_names()
        .into_iter()
        .filter(|name| !present.contains(name))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        None
    } else {
        Some(FeatureError::MissingColumns { columns: missing })
    }
}
