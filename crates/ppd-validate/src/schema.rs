//! Declarative description of the classifier input columns.

use ppd_model::{Feature, MAX_MATERNAL_AGE, MIN_MATERNAL_AGE};

/// Expected content of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnKind {
    /// Option labels registered in the category registry.
    Categorical,
    /// Numbers within an inclusive range.
    Numeric { min: f64, max: f64 },
}

/// One required column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub feature: Feature,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn name(&self) -> &'static str {
        self.feature.column_name()
    }
}

/// Required columns in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<ColumnSpec>,
}

impl FeatureSchema {
    /// The eight-column survey schema both classifiers consume.
    pub fn survey() -> Self {
        let columns = Feature::CANONICAL_ORDER
            .into_iter()
            .map(|feature| ColumnSpec {
                feature,
                kind: if feature.is_categorical() {
                    ColumnKind::Categorical
                } else {
                    ColumnKind::Numeric {
                        min: MIN_MATERNAL_AGE,
                        max: MAX_MATERNAL_AGE,
                    }
                },
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn spec(&self, feature: Feature) -> Option<&ColumnSpec> {
        self.columns.iter().find(|spec| spec.feature == feature)
    }

    /// Column names in canonical order.
    pub fn required_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(ColumnSpec::name).collect()
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = (&ColumnSpec, f64, f64)> {
        self.columns.iter().filter_map(|spec| match spec.kind {
            ColumnKind::Numeric { min, max } => Some((spec, min, max)),
            ColumnKind::Categorical => None,
        })
    }

    pub fn categorical_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns
            .iter()
            .filter(|spec| spec.kind == ColumnKind::Categorical)
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::survey()
    }
}
