//! Survey features and the canonical column order.
//!
//! Both classifiers were trained on the same eight columns in a fixed order:
//!
//! ```text
//! MH_PPDPR, INCOME8, MAT_RACE_PU, MAT_AGE_PU, PAT_ED, MAT_ED, STATE, MH_PPDX
//! ```
//!
//! Seven of them are categorical answers encoded through the category
//! registry; `MAT_AGE_PU` is the only numeric column and carries the maternal
//! age in years.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;

/// Number of columns in an encoded feature row.
pub const FEATURE_COUNT: usize = 8;

/// Lowest maternal age accepted by the models.
pub const MIN_MATERNAL_AGE: f64 = 17.0;

/// Highest maternal age accepted by the models.
pub const MAX_MATERNAL_AGE: f64 = 45.0;

/// One input column of the classifiers.
///
/// The declaration order is the canonical column order, so the derived `Ord`
/// sorts features the way the models expect them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// `MH_PPDPR`: how often the mother felt depressed since the birth.
    DepressionFrequency,
    /// `INCOME8`: household income over the past 12 months.
    HouseholdIncome,
    /// `MAT_RACE_PU`: maternal race.
    MaternalRace,
    /// `MAT_AGE_PU`: maternal age in years (numeric).
    MaternalAge,
    /// `PAT_ED`: paternal education level.
    PaternalEducation,
    /// `MAT_ED`: maternal education level.
    MaternalEducation,
    /// `STATE`: state or site of residence.
    State,
    /// `MH_PPDX`: whether the mother felt depressed after giving birth.
    DepressionAfterBirth,
}

impl Feature {
    /// All features in canonical column order.
    pub const CANONICAL_ORDER: [Feature; FEATURE_COUNT] = [
        Feature::DepressionFrequency,
        Feature::HouseholdIncome,
        Feature::MaternalRace,
        Feature::MaternalAge,
        Feature::PaternalEducation,
        Feature::MaternalEducation,
        Feature::State,
        Feature::DepressionAfterBirth,
    ];

    /// Categorical features in canonical column order.
    pub const CATEGORICAL: [Feature; FEATURE_COUNT - 1] = [
        Feature::DepressionFrequency,
        Feature::HouseholdIncome,
        Feature::MaternalRace,
        Feature::PaternalEducation,
        Feature::MaternalEducation,
        Feature::State,
        Feature::DepressionAfterBirth,
    ];

    /// Column name the classifiers and batch files use.
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::DepressionFrequency => "MH_PPDPR",
            Self::HouseholdIncome => "INCOME8",
            Self::MaternalRace => "MAT_RACE_PU",
            Self::MaternalAge => "MAT_AGE_PU",
            Self::PaternalEducation => "PAT_ED",
            Self::MaternalEducation => "MAT_ED",
            Self::State => "STATE",
            Self::DepressionAfterBirth => "MH_PPDX",
        }
    }

    /// Survey question shown to the respondent.
    pub const fn question(self) -> &'static str {
        match self {
            Self::DepressionFrequency => "How frequently do you feel depressed since birth?",
            Self::HouseholdIncome => "What is the total income you have in the past 12 months?",
            Self::MaternalRace => "What is the race of the mother?",
            Self::MaternalAge => "What is the age of the mother?",
            Self::PaternalEducation => "What is the educational level of the father?",
            Self::MaternalEducation => "What is the educational level of the mother?",
            Self::State => "What is the current state you are staying in?",
            Self::DepressionAfterBirth => "Do you feel depressed after giving birth?",
        }
    }

    /// Position of this feature in an encoded row.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the feature is answered from a category list.
    pub const fn is_categorical(self) -> bool {
        !matches!(self, Self::MaternalAge)
    }

    /// Column names in canonical order.
    pub fn column_names() -> [&'static str; FEATURE_COUNT] {
        Self::CANONICAL_ORDER.map(Feature::column_name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Feature {
    type Err = FeatureError;

    /// Parses an exact column name (`"STATE"`, `"MAT_AGE_PU"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::CANONICAL_ORDER
            .into_iter()
            .find(|feature| feature.column_name() == name)
            .ok_or_else(|| FeatureError::UnknownField {
                name: name.to_string(),
            })
    }
}

/// Returns true if `age` lies within the accepted maternal age range.
pub fn is_valid_maternal_age(age: f64) -> bool {
    (MIN_MATERNAL_AGE..=MAX_MATERNAL_AGE).contains(&age)
}
