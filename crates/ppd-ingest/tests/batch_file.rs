use std::fs;

use polars::prelude::{IntoColumn, NamedFrom, Series};
use ppd_ingest::{PREDICTION_COLUMN, read_batch_table, write_batch_table};

#[test]
fn labelled_table_reads_back_in_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("survey.csv");
    fs::write(
        &input,
        "ID,STATE,MAT_AGE_PU\nr1,Utah,30\nr2,\"Washington, D.C.\",41\nr3,Arizona,17\n",
    )
    .expect("write input");

    let mut df = read_batch_table(&input).expect("read input");
    let labels = Series::new(
        PREDICTION_COLUMN.into(),
        vec![
            "Low Risk of Postpartum Depression",
            "High Risk of Postpartum Depression",
            "Low Risk of Postpartum Depression",
        ],
    );
    df.with_column(labels.into_column()).expect("append labels");

    let output = dir.path().join("batch_predictions.csv");
    write_batch_table(&mut df, &output).expect("write output");

    let reread = read_batch_table(&output).expect("read output");
    let names: Vec<String> = reread
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["ID", "STATE", "MAT_AGE_PU", "Prediction"]);

    let ids = reread.column("ID").unwrap().str().unwrap().clone();
    assert_eq!(
        ids.into_iter().collect::<Vec<_>>(),
        vec![Some("r1"), Some("r2"), Some("r3")]
    );
    let states = reread.column("STATE").unwrap().str().unwrap().clone();
    assert_eq!(states.get(1), Some("Washington, D.C."));
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = read_batch_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(err.to_string().contains("absent.csv"), "{err}");
}
