//! Model file reading.

use std::path::Path;

use crate::error::{PredictError, Result};

pub(crate) fn read_model_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PredictError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PredictError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

pub(crate) fn read_model_text(path: &Path) -> Result<String> {
    String::from_utf8(read_model_bytes(path)?).map_err(|e| PredictError::FileRead {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })
}
