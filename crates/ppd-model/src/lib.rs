//! Core types for postpartum depression risk screening.
//!
//! - [`feature`]: classifier columns and their canonical order
//! - [`category`]: category fields and the answer-to-code registry
//! - [`record`]: raw answers and encoded feature rows
//! - [`prediction`]: risk labels and batch summaries
//! - [`validation`]: itemized validation outcomes
//! - [`error`]: the shared error taxonomy

pub mod category;
pub mod error;
pub mod feature;
pub mod prediction;
pub mod record;
pub mod validation;

pub use category::{
    CategoryField, CategoryOption, CategoryRegistry, SENTINEL_CODE, SENTINEL_OPTION,
};
pub use error::{FeatureError, Result};
pub use feature::{
    FEATURE_COUNT, Feature, MAX_MATERNAL_AGE, MIN_MATERNAL_AGE, is_valid_maternal_age,
};
pub use prediction::{BatchSummary, Prediction, RISK_THRESHOLD, RiskLabel};
pub use record::{FeatureMatrix, FeatureRow, RespondentAnswers};
pub use validation::ValidationOutcome;
