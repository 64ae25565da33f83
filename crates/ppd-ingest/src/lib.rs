//! Batch file ingestion and export.
//!
//! Reads an uploaded survey table into a Polars DataFrame and writes the
//! labelled table back out as the downloadable prediction file.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ppd_ingest::{read_batch_table, write_batch_table, default_output_path};
//!
//! let input = Path::new("uploads/survey.csv");
//! let mut df = read_batch_table(input)?;
//! // ... append the Prediction column ...
//! write_batch_table(&mut df, &default_output_path(input))?;
//! ```

mod error;
mod reader;
mod writer;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{MAX_BATCH_FILE_SIZE, read_batch_table, read_batch_table_with_limit};

// === CSV Writing ===
pub use writer::{
    DEFAULT_OUTPUT_FILE, PREDICTION_COLUMN, default_output_path, write_batch_csv,
    write_batch_table,
};
