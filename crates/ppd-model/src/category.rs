//! Category fields and the registry that encodes survey answers.
//!
//! Every categorical feature has an ordered list of human-readable options,
//! each mapped to the integer code the classifiers were trained on. Codes are
//! an external contract with the training data: they are neither contiguous
//! nor ordered like the display list (race codes run 0, 2, 3, 4, 10, 21, 22,
//! 23) and must be kept exactly as published.
//!
//! Each field carries a sentinel option ("Not sure") coded 0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};
use crate::feature::Feature;

/// Display label of the "unknown / not sure" option.
pub const SENTINEL_OPTION: &str = "Not sure";

/// Code of the sentinel option in every field.
pub const SENTINEL_CODE: i32 = 0;

/// One selectable answer and its code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub label: String,
    pub code: i32,
}

/// One categorical survey question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryField {
    feature: Feature,
    /// Options in display order.
    options: Vec<CategoryOption>,
    /// Lookup: option label -> code.
    codes: BTreeMap<String, i32>,
}

impl CategoryField {
    pub fn new(feature: Feature) -> Self {
        Self {
            feature,
            options: Vec::new(),
            codes: BTreeMap::new(),
        }
    }

    /// Append an option. Returns false if the label is already registered.
    pub fn add_option(&mut self, label: impl Into<String>, code: i32) -> bool {
        let label = label.into();
        if self.codes.contains_key(&label) {
            return false;
        }
        self.codes.insert(label.clone(), code);
        self.options.push(CategoryOption { label, code });
        true
    }

    pub fn feature(&self) -> Feature {
        self.feature
    }

    /// Column name of the field.
    pub fn name(&self) -> &'static str {
        self.feature.column_name()
    }

    /// Options in display order.
    pub fn options(&self) -> &[CategoryOption] {
        &self.options
    }

    /// Option labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|option| option.label.as_str())
    }

    /// Code for an option label. Surrounding whitespace is ignored, case is not.
    pub fn code_of(&self, option: &str) -> Option<i32> {
        self.codes.get(option.trim()).copied()
    }

    pub fn contains(&self, option: &str) -> bool {
        self.code_of(option).is_some()
    }

    /// The option coded [`SENTINEL_CODE`], if present.
    pub fn sentinel(&self) -> Option<&CategoryOption> {
        self.options
            .iter()
            .find(|option| option.code == SENTINEL_CODE)
    }
}

/// Immutable set of category fields keyed by feature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRegistry {
    fields: BTreeMap<Feature, CategoryField>,
    /// Where the definitions came from (file path or embedded table name).
    pub source: Option<String>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field.
    pub fn insert(&mut self, field: CategoryField) {
        self.fields.insert(field.feature(), field);
    }

    pub fn field(&self, feature: Feature) -> Option<&CategoryField> {
        self.fields.get(&feature)
    }

    /// Every registered field in canonical column order.
    pub fn fields(&self) -> impl Iterator<Item = &CategoryField> {
        self.fields.values()
    }

    /// Categorical features with no registered field.
    pub fn missing_fields(&self) -> Vec<Feature> {
        Feature::CATEGORICAL
            .into_iter()
            .filter(|feature| !self.fields.contains_key(feature))
            .collect()
    }

    /// Encode one answer.
    ///
    /// # Errors
    ///
    /// `UnknownOption` if the option is not registered for the field,
    /// `UnknownField` if the feature has no category field.
    pub fn encode(&self, feature: Feature, option: &str) -> Result<i32> {
        self.encode_at(feature, option, None)
    }

    /// Encode one answer from a batch row, tagging errors with the row index.
    pub fn encode_at(&self, feature: Feature, option: &str, row: Option<usize>) -> Result<i32> {
        let field = self
            .field(feature)
            .ok_or_else(|| FeatureError::UnknownField {
                name: feature.column_name().to_string(),
            })?;
        field
            .code_of(option)
            .ok_or_else(|| FeatureError::UnknownOption {
                field: feature,
                value: option.trim().to_string(),
                row,
            })
    }
}
