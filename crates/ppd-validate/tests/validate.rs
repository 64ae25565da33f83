//! Schema validation against the embedded category table.

use polars::prelude::*;
use ppd_model::{CategoryRegistry, Feature, FeatureError, RespondentAnswers};
use ppd_standards::load_embedded;
use ppd_validate::{FeatureSchema, validate_answers, validate_table};
use proptest::prelude::*;

fn registry() -> CategoryRegistry {
    load_embedded().expect("embedded categories")
}

fn text_column(name: &str, value: &str, rows: usize) -> Column {
    Series::new(name.into(), vec![value.to_string(); rows]).into_column()
}

/// A valid table with `rows` identical respondents and the given age column.
fn table_with_ages(ages: Column) -> DataFrame {
    let rows = ages.len();
    DataFrame::new(vec![
        text_column("MH_PPDPR", "NEVER", rows),
        text_column("INCOME8", "$100,001 OR MORE", rows),
        text_column("MAT_RACE_PU", "WHITE", rows),
        ages,
        text_column("PAT_ED", "BACHELORS/MASTERS/DOCTORATE/PROF", rows),
        text_column("MAT_ED", "HIGH SCHOOL GRAD/GED", rows),
        text_column("STATE", "Utah", rows),
        text_column("MH_PPDX", "NO", rows),
    ])
    .unwrap()
}

fn ages(values: Vec<i64>) -> Column {
    Series::new("MAT_AGE_PU".into(), values).into_column()
}

fn answers(age: f64) -> RespondentAnswers {
    RespondentAnswers {
        depression_frequency: "NEVER".to_string(),
        household_income: "$100,001 OR MORE".to_string(),
        maternal_race: "WHITE".to_string(),
        maternal_age: age,
        paternal_education: "BACHELORS/MASTERS/DOCTORATE/PROF".to_string(),
        maternal_education: "BACHELORS/MASTERS/DOCTORATE/PROF".to_string(),
        state: "Utah".to_string(),
        depression_after_birth: "NO".to_string(),
    }
}

#[test]
fn valid_table_passes() {
    let df = table_with_ages(ages(vec![17, 30, 45]));
    let outcome = validate_table(&FeatureSchema::survey(), &registry(), &df);
    assert!(outcome.is_valid(), "{outcome}");
}

#[test]
fn missing_state_column_is_named() {
    let df = table_with_ages(ages(vec![30])).drop("STATE").unwrap();
    let outcome = validate_table(&FeatureSchema::survey(), &registry(), &df);
    assert_eq!(
        outcome.into_result(),
        Err(FeatureError::MissingColumns {
            columns: vec!["STATE".to_string()]
        })
    );
}

#[test]
fn every_missing_column_is_listed_in_canonical_order() {
    let df = df! { "MAT_AGE_PU" => &[30i64], "STATE" => &["Utah"] }.unwrap();
    let outcome = validate_table(&FeatureSchema::survey(), &registry(), &df);
    let Err(FeatureError::MissingColumns { columns }) = outcome.into_result() else {
        panic!("expected missing columns");
    };
    assert_eq!(
        columns,
        vec!["MH_PPDPR", "INCOME8", "MAT_RACE_PU", "PAT_ED", "MAT_ED", "MH_PPDX"]
    );
}

#[test]
fn text_ages_are_invalid_type() {
    let column = Series::new("MAT_AGE_PU".into(), vec!["30", "thirty", "forty"]).into_column();
    let df = table_with_ages(column);
    let outcome = validate_table(&FeatureSchema::survey(), &registry(), &df);
    assert_eq!(
        outcome.into_result(),
        Err(FeatureError::InvalidType {
            column: "MAT_AGE_PU".to_string(),
            expected: "numeric",
            samples: vec!["thirty".to_string(), "forty".to_string()],
        })
    );
}

#[test]
fn missing_age_is_invalid_type() {
    let column = Series::new("MAT_AGE_PU".into(), vec![Some(30i64), None]).into_column();
    let df = table_with_ages(column);
    let outcome = validate_table(&FeatureSchema::survey(), &registry(), &df);
    assert!(matches!(
        outcome.into_result(),
        Err(FeatureError::InvalidType { ref samples, .. }) if samples == &["(missing)".to_string()]
    ));
}

#[test]
fn one_bad_row_fails_the_whole_batch() {
    let mut values = vec![30i64; 100];
    values[57] = 46;
    let df = table_with_ages(ages(values));
    let outcome = validate_table(&FeatureSchema::survey(), &registry(), &df);
    assert_eq!(
        outcome.into_result(),
        Err(FeatureError::OutOfRange {
            column: "MAT_AGE_PU".to_string(),
            value: 46.0,
            min: 17.0,
            max: 45.0,
            row: Some(57),
        })
    );
}

#[test]
fn range_failure_stops_before_category_check() {
    let mut df = table_with_ages(ages(vec![16, 50]));
    df.with_column(text_column("STATE", "Atlantis", 2)).unwrap();
    let outcome = validate_table(&FeatureSchema::survey(), &registry(), &df);
    assert_eq!(outcome.len(), 2);
    assert!(
        outcome
            .issues()
            .iter()
            .all(|issue| matches!(issue, FeatureError::OutOfRange { .. }))
    );
}

#[test]
fn unregistered_category_is_an_error_not_a_null() {
    let mut df = table_with_ages(ages(vec![30, 31]));
    df.with_column(
        Series::new("MAT_RACE_PU".into(), vec!["WHITE", "white"]).into_column(),
    )
    .unwrap();
    let outcome = validate_table(&FeatureSchema::survey(), &registry(), &df);
    assert_eq!(
        outcome.into_result(),
        Err(FeatureError::UnknownOption {
            field: Feature::MaternalRace,
            value: "white".to_string(),
            row: Some(1),
        })
    );
}

#[test]
fn numeric_codes_in_category_columns_are_rejected() {
    let mut df = table_with_ages(ages(vec![30]));
    df.with_column(Series::new("STATE".into(), vec![1i64]).into_column())
        .unwrap();
    let outcome = validate_table(&FeatureSchema::survey(), &registry(), &df);
    assert!(matches!(
        outcome.into_result(),
        Err(FeatureError::UnknownOption { field: Feature::State, ref value, .. }) if value == "1"
    ));
}

#[test]
fn answers_report_all_problems_together() {
    let mut bad = answers(12.0);
    bad.state = "Atlantis".to_string();
    let outcome = validate_answers(&FeatureSchema::survey(), &registry(), &bad);
    assert_eq!(outcome.len(), 2);
}

proptest! {
    #[test]
    fn ages_in_bounds_are_accepted(age in 17i64..=45) {
        let outcome = validate_answers(&FeatureSchema::survey(), &registry(), &answers(age as f64));
        prop_assert!(outcome.is_valid());
    }

    #[test]
    fn ages_out_of_bounds_are_rejected(age in prop_oneof![-100i64..17, 46i64..200]) {
        let outcome = validate_answers(&FeatureSchema::survey(), &registry(), &answers(age as f64));
        let is_out_of_range = matches!(
            outcome.into_result(),
            Err(FeatureError::OutOfRange { row: None, .. })
        );
        prop_assert!(is_out_of_range);
    }
}
