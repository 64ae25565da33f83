//! Respondent answers and encoded feature rows.

use serde::{Deserialize, Serialize};

use crate::feature::{FEATURE_COUNT, Feature};

/// One respondent's raw answers, as selected on the survey form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RespondentAnswers {
    pub depression_frequency: String,
    pub household_income: String,
    pub maternal_race: String,
    pub maternal_age: f64,
    pub paternal_education: String,
    pub maternal_education: String,
    pub state: String,
    pub depression_after_birth: String,
}

impl RespondentAnswers {
    /// Categorical answers paired with their feature, in canonical order.
    pub fn categorical(&self) -> [(Feature, &str); FEATURE_COUNT - 1] {
        [
            (Feature::DepressionFrequency, self.depression_frequency.as_str()),
            (Feature::HouseholdIncome, self.household_income.as_str()),
            (Feature::MaternalRace, self.maternal_race.as_str()),
            (Feature::PaternalEducation, self.paternal_education.as_str()),
            (Feature::MaternalEducation, self.maternal_education.as_str()),
            (Feature::State, self.state.as_str()),
            (Feature::DepressionAfterBirth, self.depression_after_birth.as_str()),
        ]
    }
}

/// One encoded row in canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    values: [f64; FEATURE_COUNT],
}

impl FeatureRow {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Encoded rows, one per respondent, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    rows: Vec<FeatureRow>,
}

impl FeatureMatrix {
    pub fn new(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    /// A matrix holding a single row.
    pub fn single(row: FeatureRow) -> Self {
        Self { rows: vec![row] }
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        FEATURE_COUNT
    }

    /// Column names of the matrix, in canonical order.
    pub fn columns(&self) -> [&'static str; FEATURE_COUNT] {
        Feature::column_names()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureRow> {
        self.rows.iter()
    }
}

impl FromIterator<FeatureRow> for FeatureMatrix {
    fn from_iter<I: IntoIterator<Item = FeatureRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FeatureMatrix {
    type Item = &'a FeatureRow;
    type IntoIter = std::slice::Iter<'a, FeatureRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
