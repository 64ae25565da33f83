//! Single-record encoding.

use ppd_model::{FEATURE_COUNT, Feature, FeatureRow, RespondentAnswers};
use ppd_validate::validate_answers;

use crate::FeatureEncoder;
use crate::error::Result;

impl FeatureEncoder<'_> {
    /// Encode one answer set into a row in canonical column order.
    ///
    /// # Errors
    ///
    /// `UnknownOption` for an answer absent from the registry, `OutOfRange`
    /// for an age outside 17..=45. Several problems are reported together as
    /// `Rejected`.
    pub fn encode_answers(&self, answers: &RespondentAnswers) -> Result<FeatureRow> {
        validate_answers(self.schema(), self.registry(), answers).into_result()?;

        let mut values = [0.0; FEATURE_COUNT];
        for (feature, option) in answers.categorical() {
            values[feature.index()] = f64::from(self.registry().encode(feature, option)?);
        }
        values[Feature::MaternalAge.index()] = answers.maternal_age;

        tracing::debug!("answers encoded");
        Ok(FeatureRow::new(values))
    }
}

#[cfg(test)]
mod tests {
    use ppd_model::{CategoryField, CategoryRegistry, FeatureError};

    use super::*;
    use crate::TransformError;

    fn tiny_registry() -> CategoryRegistry {
        let mut registry = CategoryRegistry::new();
        for feature in Feature::CATEGORICAL {
            let mut field = CategoryField::new(feature);
            field.add_option("Not sure", 0);
            field.add_option("A", 7);
            registry.insert(field);
        }
        registry
    }

    fn answers(option: &str, age: f64) -> RespondentAnswers {
        RespondentAnswers {
            depression_frequency: option.to_string(),
            household_income: "Not sure".to_string(),
            maternal_race: option.to_string(),
            maternal_age: age,
            paternal_education: "Not sure".to_string(),
            maternal_education: option.to_string(),
            state: "Not sure".to_string(),
            depression_after_birth: option.to_string(),
        }
    }

    #[test]
    fn places_codes_by_feature_index() {
        let registry = tiny_registry();
        let encoder = FeatureEncoder::new(&registry);
        let row = encoder.encode_answers(&answers("A", 22.0)).unwrap();
        assert_eq!(row.values(), &[7.0, 0.0, 7.0, 22.0, 0.0, 7.0, 0.0, 7.0]);
    }

    #[test]
    fn unknown_option_propagates() {
        let registry = tiny_registry();
        let encoder = FeatureEncoder::new(&registry);
        let mut input = answers("Not sure", 30.0);
        input.state = "B".to_string();
        let err = encoder.encode_answers(&input).unwrap_err();
        assert!(matches!(
            err,
            TransformError::Feature(FeatureError::UnknownOption {
                field: Feature::State,
                ..
            })
        ));
    }
}
