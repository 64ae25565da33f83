//! Column access helpers.

use polars::prelude::{Column, DataType, PolarsResult};

/// True for integer and floating point column types.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Column values as numbers.
///
/// Numeric columns are cast directly. Text columns are parsed cell by cell
/// after trimming; unparseable or missing cells become `None`.
pub fn numeric_values(column: &Column) -> PolarsResult<Vec<Option<f64>>> {
    if is_numeric_dtype(column.dtype()) {
        let cast = column.cast(&DataType::Float64)?;
        return Ok(cast.f64()?.into_iter().collect());
    }
    let cast = column.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|value| value.and_then(|s| s.trim().parse::<f64>().ok()))
        .collect())
}

/// Column values as text; missing cells become `None`.
pub fn text_values(column: &Column) -> PolarsResult<Vec<Option<String>>> {
    let cast = column.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}
