//! Batch CSV reading.
//!
//! The upload is a delimited text file whose header row names the survey
//! columns. Values are read with full-file schema inference so a column's
//! type reflects every row, not a prefix.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Maximum accepted upload size (100 MB).
pub const MAX_BATCH_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a batch file into a DataFrame.
pub fn read_batch_table(path: &Path) -> Result<DataFrame> {
    read_batch_table_with_limit(path, MAX_BATCH_FILE_SIZE)
}

/// Read a batch file with a custom size limit.
pub fn read_batch_table_with_limit(path: &Path, max_size: u64) -> Result<DataFrame> {
    check_file_size(path, max_size)?;
    validate_encoding(path)?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    normalize_column_names(&mut df)?;
    validate_shape(&df, path)?;

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "batch file loaded"
    );
    Ok(df)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let size = open(path)?
        .metadata()
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();

    if size > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size,
        });
    }
    Ok(())
}

/// Reject UTF-16 input, which the CSV parser would read as garbage.
fn validate_encoding(path: &Path) -> Result<()> {
    let mut buffer = [0u8; 2];
    let bytes_read = open(path)?
        .read(&mut buffer)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

/// Strip a UTF-8 BOM and surrounding whitespace from header names.
fn normalize_column_names(df: &mut DataFrame) -> Result<()> {
    let renames: Vec<(String, String)> = df
        .get_column_names()
        .into_iter()
        .filter_map(|name| {
            let cleaned = name.trim_start_matches('\u{feff}').trim();
            (cleaned != name.as_str()).then(|| (name.to_string(), cleaned.to_string()))
        })
        .collect();

    for (old, new) in renames {
        df.rename(&old, new.into())?;
    }
    Ok(())
}

fn validate_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }
    if df
        .get_column_names()
        .iter()
        .any(|name| name.trim().is_empty())
    {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn reads_rows_and_infers_numeric_age() {
        let file = create_temp_csv(b"STATE,MAT_AGE_PU\nUtah,30\n\"Washington, D.C.\",41\n");
        let df = read_batch_table(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert!(df.column("MAT_AGE_PU").unwrap().dtype().is_integer());
        let states = df.column("STATE").unwrap().str().unwrap().clone();
        assert_eq!(states.get(1), Some("Washington, D.C."));
    }

    #[test]
    fn strips_bom_and_whitespace_from_headers() {
        let file = create_temp_csv("\u{feff}STATE , MAT_AGE_PU\nUtah,30\n".as_bytes());
        let df = read_batch_table(file.path()).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["STATE", "MAT_AGE_PU"]);
    }

    #[test]
    fn header_only_file_is_empty() {
        let file = create_temp_csv(b"STATE,MAT_AGE_PU\n");
        let result = read_batch_table(file.path());
        assert!(matches!(result, Err(IngestError::EmptyTable { .. })));
    }

    #[test]
    fn rejects_utf16() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'S', 0x00]);
        let result = read_batch_table(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn enforces_size_limit() {
        let file = create_temp_csv(b"STATE\nUtah\n");
        let result = read_batch_table_with_limit(file.path(), 4);
        assert!(matches!(result, Err(IngestError::FileTooLarge { .. })));
    }

    #[test]
    fn missing_file() {
        let result = read_batch_table(Path::new("/nonexistent/batch.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
