//! Prediction export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Column appended to the input table with each row's risk label.
pub const PREDICTION_COLUMN: &str = "Prediction";

/// File name of the downloadable artifact.
pub const DEFAULT_OUTPUT_FILE: &str = "batch_predictions.csv";

/// Default output path: `batch_predictions.csv` beside the input file.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_file_name(DEFAULT_OUTPUT_FILE)
}

/// Write the augmented table to `path`, keeping its column order.
pub fn write_batch_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    write_batch_csv(df, &mut writer)?;
    writer.flush().map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), rows = df.height(), "predictions written");
    Ok(())
}

/// Serialize the table as CSV with a header row and no index column.
pub fn write_batch_csv<W: Write>(df: &mut DataFrame, writer: W) -> Result<()> {
    CsvWriter::new(writer)
        .include_header(true)
        .finish(df)
        .map_err(|e| IngestError::CsvWrite {
            message: e.to_string(),
        })
}
