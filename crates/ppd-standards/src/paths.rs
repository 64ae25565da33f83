//! Category definition path resolution.

use std::path::PathBuf;

/// Environment variable pointing at an external category definition file.
pub const CATEGORIES_ENV_VAR: &str = "PPD_CATEGORIES_FILE";

/// Path of the external definition file, if one is configured.
///
/// An empty variable counts as unset.
pub fn categories_override() -> Option<PathBuf> {
    std::env::var_os(CATEGORIES_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
