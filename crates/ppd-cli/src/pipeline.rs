//! Command pipelines shared by the binary and its tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use ppd_ingest::{default_output_path, read_batch_table, write_batch_table};
use ppd_model::{BatchSummary, CategoryRegistry, FeatureError, FeatureRow, Prediction};
use ppd_predict::{PredictError, RiskClassifier};
use ppd_standards::{load_default, load_from_path};
use ppd_transform::{FeatureEncoder, TransformError, attach_predictions};

use crate::answers::PartialAnswers;
use crate::report::render_failure;

/// Load category definitions from `path`, or from the configured default.
pub fn load_registry(path: Option<&Path>) -> Result<CategoryRegistry> {
    match path {
        Some(path) => load_from_path(path)
            .with_context(|| format!("load category definitions from {}", path.display())),
        None => load_default().context("load category definitions"),
    }
}

/// Encode one respondent's answers.
pub fn encode_answers(registry: &CategoryRegistry, answers: PartialAnswers) -> Result<FeatureRow> {
    let answers = answers.complete(registry);
    FeatureEncoder::new(registry)
        .encode_answers(&answers)
        .map_err(|err| transform_failure(&err))
}

/// Encode and classify one respondent with the tree ensemble.
pub fn predict_answers(
    registry: &CategoryRegistry,
    classifier: &RiskClassifier,
    answers: PartialAnswers,
) -> Result<Prediction> {
    let row = encode_answers(registry, answers)?;
    classifier
        .classify_single(&row)
        .map_err(|err| predict_failure(&err))
}

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions<'a> {
    pub input: &'a Path,
    /// Defaults to `batch_predictions.csv` beside the input.
    pub output: Option<&'a Path>,
    /// Validate and encode only.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub rows: usize,
    /// Written file; `None` on a dry run.
    pub output: Option<PathBuf>,
    /// Label counts; `None` on a dry run.
    pub summary: Option<BatchSummary>,
}

/// Validate, encode, classify, and write one batch file.
///
/// Nothing is written unless every row validates and the classifier returns
/// one score per row.
pub fn run_batch(
    registry: &CategoryRegistry,
    classifier: &RiskClassifier,
    options: BatchOptions<'_>,
) -> Result<BatchOutcome> {
    let span = info_span!("batch", file = %options.input.display());
    let _guard = span.enter();

    let mut df = read_batch_table(options.input)
        .with_context(|| format!("read batch file {}", options.input.display()))?;
    let matrix = FeatureEncoder::new(registry)
        .encode_table(&df)
        .map_err(|err| transform_failure(&err))?;

    if options.dry_run {
        info!(rows = matrix.len(), "dry run: batch is valid, nothing written");
        return Ok(BatchOutcome {
            rows: matrix.len(),
            output: None,
            summary: None,
        });
    }

    let predictions = classifier
        .classify_batch(&matrix)
        .map_err(|err| predict_failure(&err))?;
    attach_predictions(&mut df, &predictions).map_err(|err| transform_failure(&err))?;

    let output = options
        .output
        .map_or_else(|| default_output_path(options.input), Path::to_path_buf);
    write_batch_table(&mut df, &output)
        .with_context(|| format!("write predictions to {}", output.display()))?;

    let summary = BatchSummary::from_predictions(&predictions);
    info!(
        total = summary.total,
        low_risk = summary.low_risk,
        high_risk = summary.high_risk,
        "batch classified"
    );
    Ok(BatchOutcome {
        rows: df.height(),
        output: Some(output),
        summary: Some(summary),
    })
}

fn feature_failure(err: &FeatureError) -> anyhow::Error {
    if err.is_integrity_fault() {
        tracing::error!(error = %err, "classifier output does not match its input");
    }
    anyhow!(render_failure(err))
}

fn transform_failure(err: &TransformError) -> anyhow::Error {
    match err.as_feature() {
        Some(feature) => feature_failure(feature),
        None => anyhow!("{err}"),
    }
}

fn predict_failure(err: &PredictError) -> anyhow::Error {
    match err.as_feature() {
        Some(feature) => feature_failure(feature),
        None => anyhow!("{err}"),
    }
}
