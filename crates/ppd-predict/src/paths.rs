//! Model artifact locations.

use std::path::{Path, PathBuf};

/// Environment variable naming the directory that holds both model files.
pub const MODELS_DIR_ENV_VAR: &str = "PPD_MODELS_DIR";

/// Directory used when the environment variable is unset.
pub const DEFAULT_MODELS_DIR: &str = "models";

/// LightGBM text model file name inside the models directory.
pub const TREE_MODEL_FILE: &str = "lightgbm_model.txt";

/// Dense network JSON file name inside the models directory.
pub const NETWORK_MODEL_FILE: &str = "ann_model.json";

/// Resolved paths of the two model files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    pub tree: PathBuf,
    pub network: PathBuf,
}

impl ModelPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            tree: dir.join(TREE_MODEL_FILE),
            network: dir.join(NETWORK_MODEL_FILE),
        }
    }

    /// Explicit paths win; anything unset comes from [`models_dir`].
    pub fn resolve(tree: Option<PathBuf>, network: Option<PathBuf>) -> Self {
        let defaults = Self::in_dir(&models_dir());
        Self {
            tree: tree.unwrap_or(defaults.tree),
            network: network.unwrap_or(defaults.network),
        }
    }
}

/// The configured models directory. An empty variable counts as unset.
pub fn models_dir() -> PathBuf {
    std::env::var_os(MODELS_DIR_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_MODELS_DIR), PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_names() {
        let paths = ModelPaths::in_dir(Path::new("/opt/ppd"));
        assert_eq!(paths.tree, PathBuf::from("/opt/ppd/lightgbm_model.txt"));
        assert_eq!(paths.network, PathBuf::from("/opt/ppd/ann_model.json"));
    }

    #[test]
    fn explicit_paths_are_kept() {
        let paths = ModelPaths::resolve(
            Some(PathBuf::from("a.txt")),
            Some(PathBuf::from("b.json")),
        );
        assert_eq!(paths.tree, PathBuf::from("a.txt"));
        assert_eq!(paths.network, PathBuf::from("b.json"));
    }
}
