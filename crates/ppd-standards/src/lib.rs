//! Category definitions for the screening survey.
//!
//! This crate owns the single table that maps every categorical answer to
//! the integer code the classifiers were trained on. The table is embedded at
//! compile time and may be replaced at runtime by an external CSV file with
//! the same `Field,Option,Code` layout.
//!
//! # Example
//!
//! ```rust,ignore
//! use ppd_model::Feature;
//!
//! let registry = ppd_standards::load_default()?;
//! assert_eq!(registry.encode(Feature::MaternalRace, "WHITE")?, 2);
//! ```

pub mod embedded;
pub mod error;
pub mod loader;
pub mod paths;

pub use error::{Result, StandardsError};
pub use loader::{load_default, load_embedded, load_from_path, load_from_str};
pub use paths::{CATEGORIES_ENV_VAR, categories_override};
