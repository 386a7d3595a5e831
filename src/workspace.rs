//! Workspace-root discovery and well-known paths.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::AppError;

/// Marker files that identify a workspace root, in lookup order.
pub const MARKER_FILES: &[&str] = &["WORKSPACE", "WORKSPACE.bazel", "MODULE.bazel"];

/// Set by `bazel run` to the root of the workspace where the build was run.
pub const WORKSPACE_DIR_ENV: &str = "BUILD_WORKSPACE_DIRECTORY";

/// The optional per-workspace config file.
pub const CONFIG_FILE: &str = ".ob.toml";

/// A workspace rooted at the directory containing its marker file.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a workspace instance for a known root directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Discover the workspace root.
    ///
    /// Honors `BUILD_WORKSPACE_DIRECTORY` when invoked under `bazel run`;
    /// otherwise walks up from the current directory until a directory
    /// containing a marker file is found.
    pub fn discover() -> Result<Self, AppError> {
        if let Some(dir) = env::var_os(WORKSPACE_DIR_ENV) {
            return Ok(Self::new(PathBuf::from(dir)));
        }

        let cwd = env::current_dir()?;
        cwd.ancestors()
            .find(|dir| Self::contains_marker(dir))
            .map(|dir| Self::new(dir.to_path_buf()))
            .ok_or(AppError::WorkspaceNotFound)
    }

    fn contains_marker(dir: &Path) -> bool {
        MARKER_FILES.iter().any(|name| dir.join(name).is_file())
    }

    /// The workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The marker file used for output-base resolution.
    ///
    /// Priority: explicit path, then the `.ob.toml` `marker` setting, then
    /// the first marker file present at the root. Relative paths are
    /// interpreted from the workspace root.
    pub fn resolve_marker(&self, explicit: Option<&Path>, config: &Config) -> PathBuf {
        if let Some(path) = explicit {
            return self.rooted(path);
        }
        if let Some(name) = config.marker.as_deref() {
            return self.rooted(Path::new(name));
        }

        MARKER_FILES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
            .unwrap_or_else(|| self.root.join(MARKER_FILES[0]))
    }

    fn rooted(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) }
    }

    /// Path to the `bazel-out` convenience symlink.
    pub fn bazel_out_path(&self) -> PathBuf {
        self.root.join("bazel-out")
    }

    /// Path to the `external` convenience symlink.
    pub fn external_path(&self) -> PathBuf {
        self.root.join("external")
    }

    /// Path to the optional `.ob.toml` config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }
}
