//! Assembling one respondent's answers from a JSON file and flags.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use ppd_model::{CategoryRegistry, Feature, RespondentAnswers, SENTINEL_OPTION};

use crate::logging::redact_value;

/// Age preselected on the survey form.
pub const DEFAULT_MATERNAL_AGE: f64 = 18.0;

/// Answers where any question may be left unanswered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialAnswers {
    pub depression_frequency: Option<String>,
    pub household_income: Option<String>,
    pub maternal_race: Option<String>,
    pub maternal_age: Option<f64>,
    pub paternal_education: Option<String>,
    pub maternal_education: Option<String>,
    pub state: Option<String>,
    pub depression_after_birth: Option<String>,
}

impl PartialAnswers {
    /// Read answers from a JSON object keyed by the field names above.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read answers file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parse answers file {}", path.display()))
    }

    /// Fill unanswered fields from `base`.
    #[must_use]
    pub fn or(self, base: Self) -> Self {
        Self {
            depression_frequency: self.depression_frequency.or(base.depression_frequency),
            household_income: self.household_income.or(base.household_income),
            maternal_race: self.maternal_race.or(base.maternal_race),
            maternal_age: self.maternal_age.or(base.maternal_age),
            paternal_education: self.paternal_education.or(base.paternal_education),
            maternal_education: self.maternal_education.or(base.maternal_education),
            state: self.state.or(base.state),
            depression_after_birth: self.depression_after_birth.or(base.depression_after_birth),
        }
    }

    /// Complete the answers the way the form starts out: every unanswered
    /// question on its "Not sure" option and the age at 18.
    pub fn complete(self, registry: &CategoryRegistry) -> RespondentAnswers {
        let default_option = |feature: Feature| {
            registry
                .field(feature)
                .and_then(|field| field.sentinel())
                .map_or_else(|| SENTINEL_OPTION.to_string(), |option| option.label.clone())
        };
        let answers = RespondentAnswers {
            depression_frequency: self
                .depression_frequency
                .unwrap_or_else(|| default_option(Feature::DepressionFrequency)),
            household_income: self
                .household_income
                .unwrap_or_else(|| default_option(Feature::HouseholdIncome)),
            maternal_race: self
                .maternal_race
                .unwrap_or_else(|| default_option(Feature::MaternalRace)),
            maternal_age: self.maternal_age.unwrap_or(DEFAULT_MATERNAL_AGE),
            paternal_education: self
                .paternal_education
                .unwrap_or_else(|| default_option(Feature::PaternalEducation)),
            maternal_education: self
                .maternal_education
                .unwrap_or_else(|| default_option(Feature::MaternalEducation)),
            state: self.state.unwrap_or_else(|| default_option(Feature::State)),
            depression_after_birth: self
                .depression_after_birth
                .unwrap_or_else(|| default_option(Feature::DepressionAfterBirth)),
        };
        for (feature, option) in answers.categorical() {
            tracing::trace!(field = %feature, answer = redact_value(option), "answer");
        }
        answers
    }
}
