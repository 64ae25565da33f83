//! Category definitions compiled into the binary.
//!
//! The table is the authoritative contract with the trained models. Columns:
//!
//! ```text
//! Field,Option,Code
//! MAT_RACE_PU,WHITE,2
//! ```
//!
//! Options appear in display order. Every field starts with its `Not sure`
//! sentinel coded 0.

/// Name reported as the registry source for the embedded table.
pub const EMBEDDED_SOURCE: &str = "embedded:categories.csv";

/// Embedded category table.
pub const CATEGORIES_CSV: &str = include_str!("../data/categories.csv");
