//! Feature vector building.
//!
//! [`FeatureEncoder`] turns survey answers into the numeric rows the
//! classifiers consume, using the category registry for every categorical
//! answer and the survey schema for validation:
//!
//! - [`FeatureEncoder::encode_answers`]: one interactive answer set
//! - [`FeatureEncoder::encode_table`]: an uploaded batch table
//!
//! [`attach_predictions`] writes the resulting labels back onto the table.

use ppd_model::CategoryRegistry;
use ppd_validate::FeatureSchema;

mod batch;
mod error;
mod record;

pub use batch::attach_predictions;
pub use error::{Result, TransformError};

/// Encodes answers against a registry. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct FeatureEncoder<'a> {
    registry: &'a CategoryRegistry,
    schema: FeatureSchema,
}

impl<'a> FeatureEncoder<'a> {
    /// Encoder for the eight-column survey schema.
    pub fn new(registry: &'a CategoryRegistry) -> Self {
        Self {
            registry,
            schema: FeatureSchema::survey(),
        }
    }

    pub fn registry(&self) -> &'a CategoryRegistry {
        self.registry
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }
}
