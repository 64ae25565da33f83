//! Validation of survey input against the classifier schema.
//!
//! Both entry points return a [`ValidationOutcome`]:
//!
//! - [`validate_answers`] checks one interactive answer set
//! - [`validate_table`] checks an uploaded batch table
//!
//! Batch checks run as ordered stages. The first stage that finds problems
//! ends validation, and its outcome lists every problem that stage found:
//!
//! 1. column presence
//! 2. numeric type of numeric columns
//! 3. numeric ranges
//! 4. category membership

use polars::prelude::DataFrame;
use ppd_model::{
    CategoryRegistry, Feature, FeatureError, RespondentAnswers, ValidationOutcome,
};

pub mod checks;
pub mod schema;
pub mod util;

pub use schema::{ColumnKind, ColumnSpec, FeatureSchema};
pub use util::{is_numeric_dtype, numeric_values, text_values};

/// Validate one answer set.
///
/// Reports every unregistered option and an out-of-range age together.
pub fn validate_answers(
    schema: &FeatureSchema,
    registry: &CategoryRegistry,
    answers: &RespondentAnswers,
) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::new();

    for (feature, option) in answers.categorical() {
        if let Err(issue) = registry.encode(feature, option) {
            outcome.push(issue);
        }
    }

    if let Some(&ColumnSpec {
        kind: ColumnKind::Numeric { min, max },
        ..
    }) = schema.spec(Feature::MaternalAge)
    {
        let value = answers.maternal_age;
        if !(min..=max).contains(&value) {
            outcome.push(FeatureError::OutOfRange {
                column: Feature::MaternalAge.column_name().to_string(),
                value,
                min,
                max,
                row: None,
            });
        }
    }

    outcome
}

/// Validate a batch table. Stops at the first failing stage.
pub fn validate_table(
    schema: &FeatureSchema,
    registry: &CategoryRegistry,
    df: &DataFrame,
) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::new();

    if let Some(issue) = checks::columns::check(schema, df) {
        outcome.push(issue);
        return finish(outcome, "columns");
    }

    outcome.extend(checks::datatype::check(schema, df));
    if !outcome.is_valid() {
        return finish(outcome, "datatype");
    }

    outcome.extend(checks::range::check(schema, df));
    if !outcome.is_valid() {
        return finish(outcome, "range");
    }

    outcome.extend(checks::category::check(schema, registry, df));
    finish(outcome, "category")
}

fn finish(outcome: ValidationOutcome, stage: &str) -> ValidationOutcome {
    if outcome.is_valid() {
        tracing::debug!("batch table passed validation");
    } else {
        tracing::warn!(stage, issues = outcome.len(), "batch table rejected");
    }
    outcome
}
