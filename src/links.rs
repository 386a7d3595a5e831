//! The `external` convenience symlink.
//!
//! Links the workspace root's `external` name into the output base's fullest
//! set of external workspaces, giving the source tree the same directory
//! structure as the build sandbox.

use std::fs;
use std::io;
use std::os::unix::fs as unix_fs;
use std::path::PathBuf;

use crate::error::AppError;
use crate::workspace::Workspace;

/// Relative target of the `external` link.
///
/// Traverses into the output base via `bazel-out`, keeping the workspace
/// position-independent so it can be moved without relinking.
pub const EXTERNAL_LINK_TARGET: &str = "bazel-out/../../../external";

/// Result of a link maintenance pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The link was created.
    Created,
    /// The link pointed at the wrong place and was replaced.
    Relinked,
    /// The link already points at the right place.
    UpToDate,
}

/// Ensure `<root>/external` is a symlink into the output base.
///
/// Requires the `bazel-out` convenience symlink to be present; refuses to
/// touch an `external` that exists but is not a symlink (never auto-delete
/// user data under a reserved name).
pub fn ensure_external_link(workspace: &Workspace) -> Result<LinkOutcome, AppError> {
    if fs::symlink_metadata(workspace.bazel_out_path()).is_err() {
        return Err(AppError::MissingOutputSymlink);
    }

    let source = workspace.external_path();
    let target = PathBuf::from(EXTERNAL_LINK_TARGET);

    match fs::symlink_metadata(&source) {
        Ok(metadata) => {
            if !metadata.file_type().is_symlink() {
                return Err(AppError::ExternalNotSymlink { path: source });
            }
            if fs::read_link(&source)? == target {
                return Ok(LinkOutcome::UpToDate);
            }
            eprintln!("Warning: external links to the wrong place; relinking");
            fs::remove_file(&source)?;
            unix_fs::symlink(&target, &source)?;
            Ok(LinkOutcome::Relinked)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            unix_fs::symlink(&target, &source)?;
            Ok(LinkOutcome::Created)
        }
        Err(err) => Err(err.into()),
    }
}
