//! Output-base resolution and the generated constant package.
//!
//! The output base is Bazel's per-workspace managed directory holding
//! caches, generated symlink roots, and execution scratch space. Its
//! location is derived from the marker file alone: the marker's real
//! (symlink-resolved) location sits in the workspace root, which itself
//! sits one level inside the output base.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Name of the generated constant file.
pub const CONSTANT_FILE: &str = "output_base.bzl";

/// Name of the empty declaration file marking the package as loadable.
pub const BUILD_FILE: &str = "BUILD";

/// Resolve the output base from a workspace marker file.
///
/// Computes `dirname(dirname(realpath(marker)))`. Recomputed on every
/// invocation; never cached. Fails when the marker cannot be dereferenced,
/// with no partial output.
pub fn resolve_output_base(marker: &Path) -> Result<PathBuf, AppError> {
    let real = fs::canonicalize(marker).map_err(|source| AppError::PathResolution {
        path: marker.to_path_buf(),
        source,
    })?;

    let workspace_root = real.parent().ok_or_else(|| no_parent(&real))?;
    let output_base = workspace_root.parent().ok_or_else(|| no_parent(workspace_root))?;
    Ok(output_base.to_path_buf())
}

fn no_parent(path: &Path) -> AppError {
    AppError::PathResolution {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::NotFound, "path has no parent directory"),
    }
}

/// Render the constant assignment loaded by other build declarations.
///
/// The path is embedded verbatim between single quotes with no trailing
/// newline. Consumers match this content byte for byte.
pub fn render_constant(output_base: &Path) -> String {
    format!("OUTPUT_BASE = '{}'", output_base.display())
}

/// The generated package exposing the `OUTPUT_BASE` constant.
#[derive(Debug, Clone)]
pub struct GeneratedPackage {
    dir: PathBuf,
}

impl GeneratedPackage {
    /// Package directory under the output base's external repository space.
    pub fn new(output_base: &Path, repo_name: &str) -> Self {
        Self { dir: output_base.join("external").join(repo_name) }
    }

    /// The package directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path to the generated constant file.
    pub fn constant_path(&self) -> PathBuf {
        self.dir.join(CONSTANT_FILE)
    }

    /// Path to the generated empty `BUILD` file.
    pub fn build_path(&self) -> PathBuf {
        self.dir.join(BUILD_FILE)
    }

    /// Write the two generated artifacts.
    ///
    /// Idempotent: unchanged input produces byte-identical files. A constant
    /// file whose content drifted from what this run generates is reported
    /// before being overwritten (generated files are never hand-edited).
    pub fn write(&self, output_base: &Path) -> Result<(), AppError> {
        let rendered = render_constant(output_base);
        warn_if_unloadable(output_base);

        fs::create_dir_all(&self.dir)?;

        let constant_path = self.constant_path();
        if let Some(existing) = read_if_present(&constant_path)?
            && hash_content(&existing) != hash_content(&rendered)
        {
            eprintln!(
                "Warning: overwriting modified generated file {}",
                constant_path.display()
            );
        }

        fs::write(self.build_path(), "")?;
        fs::write(&constant_path, &rendered)?;
        Ok(())
    }
}

/// The embedded path is not escaped: a quote or backslash in it produces a
/// constant file the loader will reject. The content is still written
/// verbatim; only the warning is added here.
fn warn_if_unloadable(output_base: &Path) {
    let text = output_base.display().to_string();
    if text.contains('\'') || text.contains('\\') {
        eprintln!(
            "Warning: output base path {text} contains characters that will not survive quoting in {CONSTANT_FILE}"
        );
    }
}

fn read_if_present(path: &Path) -> Result<Option<String>, AppError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
