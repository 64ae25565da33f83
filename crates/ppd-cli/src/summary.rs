use ppd_cli::pipeline::BatchOutcome;
use ppd_cli::report::{batch_summary_table, feature_table, prediction_table};
use ppd_model::{FeatureRow, Prediction};

pub fn print_prediction(prediction: &Prediction) {
    println!("{}", prediction_table(prediction));
}

pub fn print_feature_row(row: &FeatureRow) {
    println!("{}", feature_table(row));
    let values: Vec<String> = row.values().iter().map(ToString::to_string).collect();
    println!("[{}]", values.join(", "));
}

pub fn print_batch_outcome(outcome: &BatchOutcome) {
    match (&outcome.output, &outcome.summary) {
        (Some(path), Some(summary)) => {
            println!("Output: {}", path.display());
            println!("{}", batch_summary_table(summary));
        }
        _ => println!("Dry run: {} rows valid, nothing written.", outcome.rows),
    }
}
