//! Category registry loading.
//!
//! Definitions come from the embedded table unless an external file is given,
//! either explicitly or through [`CATEGORIES_ENV_VAR`]. Both sources go
//! through the same structural checks, so a registry handed to the encoder is
//! always complete:
//!
//! - every categorical classifier column is defined
//! - option labels and codes are unique within a field
//! - each field codes its "Not sure" sentinel as 0
//!
//! [`CATEGORIES_ENV_VAR`]: crate::paths::CATEGORIES_ENV_VAR

use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;
use std::path::Path;

use serde::Deserialize;

use ppd_model::{CategoryField, CategoryRegistry, Feature, SENTINEL_CODE, SENTINEL_OPTION};

use crate::embedded::{CATEGORIES_CSV, EMBEDDED_SOURCE};
use crate::error::{Result, StandardsError};
use crate::paths::categories_override;

/// Load the registry from the configured source.
///
/// Uses the file named by `PPD_CATEGORIES_FILE` when set, otherwise the
/// embedded table.
pub fn load_default() -> Result<CategoryRegistry> {
    match categories_override() {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading category definitions from override");
            load_from_path(&path)
        }
        None => load_embedded(),
    }
}

/// Load the embedded category table.
pub fn load_embedded() -> Result<CategoryRegistry> {
    load_from_str(CATEGORIES_CSV, EMBEDDED_SOURCE)
}

/// Load category definitions from a CSV file.
pub fn load_from_path(path: &Path) -> Result<CategoryRegistry> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StandardsError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StandardsError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    load_from_str(&content, &path.display().to_string())
}

/// Load category definitions from CSV content.
///
/// `source` names the content in errors and is stored on the registry.
pub fn load_from_str(content: &str, source: &str) -> Result<CategoryRegistry> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(content.as_bytes()));

    let mut fields: BTreeMap<Feature, CategoryField> = BTreeMap::new();
    let mut seen_codes: BTreeMap<Feature, BTreeSet<i32>> = BTreeMap::new();

    for result in reader.deserialize::<CategoryCsvRow>() {
        let row = result.map_err(|e| StandardsError::CsvParse {
            file: source.to_string(),
            message: e.to_string(),
        })?;

        let feature = parse_field(&row.field, source)?;
        let code = row
            .code
            .parse::<i32>()
            .map_err(|_| StandardsError::InvalidCode {
                file: source.to_string(),
                field: row.field.clone(),
                option: row.option.clone(),
                value: row.code.clone(),
            })?;

        if !seen_codes.entry(feature).or_default().insert(code) {
            return Err(StandardsError::DuplicateCode {
                file: source.to_string(),
                field: row.field,
                code,
            });
        }

        let field = fields
            .entry(feature)
            .or_insert_with(|| CategoryField::new(feature));
        if !field.add_option(row.option.as_str(), code) {
            return Err(StandardsError::DuplicateOption {
                file: source.to_string(),
                field: row.field,
                option: row.option,
            });
        }
    }

    let mut registry = CategoryRegistry::new();
    registry.source = Some(source.to_string());
    for field in fields.into_values() {
        if field.code_of(SENTINEL_OPTION) != Some(SENTINEL_CODE) {
            return Err(StandardsError::MissingSentinel {
                file: source.to_string(),
                field: field.name().to_string(),
            });
        }
        registry.insert(field);
    }

    let missing = registry.missing_fields();
    if !missing.is_empty() {
        return Err(StandardsError::MissingFields {
            file: source.to_string(),
            fields: missing
                .iter()
                .map(|feature| feature.column_name().to_string())
                .collect(),
        });
    }

    tracing::debug!(
        source,
        fields = registry.fields().count(),
        options = registry.fields().map(|f| f.options().len()).sum::<usize>(),
        "category definitions loaded"
    );

    Ok(registry)
}

fn parse_field(name: &str, source: &str) -> Result<Feature> {
    name.parse::<Feature>()
        .ok()
        .filter(|feature| feature.is_categorical())
        .ok_or_else(|| StandardsError::UnknownField {
            file: source.to_string(),
            field: name.to_string(),
        })
}

/// Row from the category CSV.
#[derive(Debug, Deserialize)]
struct CategoryCsvRow {
    #[serde(rename = "Field")]
    field: String,
    #[serde(rename = "Option")]
    option: String,
    #[serde(rename = "Code")]
    code: String,
}
