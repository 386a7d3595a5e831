use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for ob operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or usage issue.
    #[error("{0}")]
    Configuration(String),

    /// Marker path could not be dereferenced to a real location.
    #[error("Cannot resolve '{}': {source}", .path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No workspace marker found in the current directory or its ancestors.
    #[error(
        "No workspace marker (WORKSPACE, WORKSPACE.bazel, MODULE.bazel) found in current directory or ancestors"
    )]
    WorkspaceNotFound,

    /// The `bazel-out` convenience symlink is absent from the workspace root.
    #[error(
        "bazel-out is missing. Remove --symlink_prefix and --experimental_convenience_symlinks so the workspace mirrors the compilation environment"
    )]
    MissingOutputSymlink,

    /// The reserved `external` name is occupied by something other than a symlink.
    #[error(
        "'{}' already exists but is not a symlink. The external name is reserved; rename or delete it and rerun",
        .path.display()
    )]
    ExternalNotSymlink { path: PathBuf },

    /// Git invocation failed.
    #[error("Git command failed: {command}: {details}")]
    Git { command: String, details: String },

    /// Malformed .ob.toml file.
    #[error("Malformed .ob.toml: {0}")]
    MalformedConfig(String),
}
