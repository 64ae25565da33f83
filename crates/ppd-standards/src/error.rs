//! Error types for category definition loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading category definitions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Definition file not found.
    #[error("category definition file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the definition file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a CSV row.
    #[error("failed to parse {file}: {message}")]
    CsvParse { file: String, message: String },

    /// A row names a field that is not a categorical classifier column.
    #[error("unknown field '{field}' in {file}")]
    UnknownField { file: String, field: String },

    /// A code that is not an integer.
    #[error("invalid code '{value}' for {field} option '{option}' in {file}")]
    InvalidCode {
        file: String,
        field: String,
        option: String,
        value: String,
    },

    /// The same option listed twice for one field.
    #[error("duplicate option '{option}' for {field} in {file}")]
    DuplicateOption {
        file: String,
        field: String,
        option: String,
    },

    /// Two options of one field share a code.
    #[error("duplicate code {code} for {field} in {file}")]
    DuplicateCode {
        file: String,
        field: String,
        code: i32,
    },

    /// A field does not code "Not sure" as 0.
    #[error("{field} in {file} must code 'Not sure' as 0")]
    MissingSentinel { file: String, field: String },

    /// Categorical fields with no definitions at all.
    #[error("{file} is missing definitions for: {}", .fields.join(", "))]
    MissingFields { file: String, fields: Vec<String> },
}

/// Result type for category definition loading.
pub type Result<T> = std::result::Result<T, StandardsError>;
