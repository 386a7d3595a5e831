//! Per-workspace configuration from `.ob.toml`.

use std::fs;

use serde::Deserialize;

use crate::error::AppError;
use crate::workspace::Workspace;

/// Default name of the generated package directory.
pub const DEFAULT_REPO_NAME: &str = "output_base";

/// Optional settings read from `.ob.toml` at the workspace root.
///
/// An absent file means defaults; a present but malformed file is an error
/// rather than a silent fallback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Marker file name (or path relative to the workspace root) used for
    /// output-base resolution.
    pub marker: Option<String>,
    /// Name of the generated package directory under `<output base>/external/`.
    pub repo_name: Option<String>,
}

impl Config {
    /// Load the workspace config, falling back to defaults when absent.
    pub fn load(workspace: &Workspace) -> Result<Self, AppError> {
        let path = workspace.config_path();
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| AppError::MalformedConfig(e.to_string()))
    }

    /// Name of the generated package directory.
    pub fn repo_name(&self) -> &str {
        self.repo_name.as_deref().unwrap_or(DEFAULT_REPO_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf());

        let config = Config::load(&workspace).unwrap();
        assert!(config.marker.is_none());
        assert_eq!(config.repo_name(), DEFAULT_REPO_NAME);
    }

    #[test]
    fn parses_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".ob.toml"),
            "marker = \"MODULE.bazel\"\nrepo_name = \"base_info\"\n",
        )
        .unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf());

        let config = Config::load(&workspace).unwrap();
        assert_eq!(config.marker.as_deref(), Some("MODULE.bazel"));
        assert_eq!(config.repo_name(), "base_info");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".ob.toml"), "marker = [not toml").unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf());

        let err = Config::load(&workspace).unwrap_err();
        assert!(matches!(err, AppError::MalformedConfig(_)), "unexpected error: {err:?}");
    }
}
