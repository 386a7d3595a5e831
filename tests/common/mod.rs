//! Shared testing utilities for ob CLI tests.

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs as unix_fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Location of the fake output base inside the harness root.
const OUTPUT_BASE_DIR: &str = "cache/_ob_1a2b3c4d";

/// Testing harness providing an isolated source checkout plus a fake output
/// base laid out the way Bazel does it.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    workspace_dir: PathBuf,
    output_base_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create an isolated environment:
    /// - `checkout/` with a `WORKSPACE` marker (the source tree),
    /// - `cache/_ob_1a2b3c4d/` with `execroot/WORKSPACE`,
    ///   `execroot/main/bazel-out/`, and `external/` (the output base).
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");

        let workspace_dir = root.path().join("checkout");
        fs::create_dir_all(&workspace_dir).expect("Failed to create checkout directory");
        fs::write(workspace_dir.join("WORKSPACE"), "").expect("Failed to write WORKSPACE marker");

        let output_base_dir = root.path().join(OUTPUT_BASE_DIR);
        fs::create_dir_all(output_base_dir.join("execroot/main/bazel-out"))
            .expect("Failed to create execroot");
        fs::write(output_base_dir.join("execroot/WORKSPACE"), "")
            .expect("Failed to write execroot marker");
        fs::create_dir_all(output_base_dir.join("external"))
            .expect("Failed to create external directory");

        Self { root, workspace_dir, output_base_dir }
    }

    /// Root of the harness environment.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// The source checkout acting as the workspace.
    pub fn workspace_dir(&self) -> &Path {
        &self.workspace_dir
    }

    /// The fake output base.
    pub fn output_base(&self) -> &Path {
        &self.output_base_dir
    }

    /// Marker file inside the output base's execroot; its grandparent is the
    /// output base itself.
    pub fn execroot_marker(&self) -> PathBuf {
        self.output_base_dir.join("execroot/WORKSPACE")
    }

    /// The output base as the resolver reports it (symlink-resolved).
    pub fn canonical_output_base(&self) -> PathBuf {
        fs::canonicalize(&self.output_base_dir).expect("Failed to canonicalize output base")
    }

    /// Create the `bazel-out` convenience symlink in the checkout.
    pub fn link_bazel_out(&self) {
        unix_fs::symlink(
            self.output_base_dir.join("execroot/main/bazel-out"),
            self.workspace_dir.join("bazel-out"),
        )
        .expect("Failed to link bazel-out");
    }

    /// Generated package directory for the default repo name.
    pub fn package_dir(&self) -> PathBuf {
        self.canonical_output_base().join("external/output_base")
    }

    /// Build a command for invoking the compiled `ob` binary in the checkout.
    pub fn cli(&self) -> Command {
        self.cli_in(self.workspace_dir())
    }

    /// Build a command for invoking the compiled `ob` binary within a custom directory.
    pub fn cli_in<P: AsRef<Path>>(&self, dir: P) -> Command {
        let mut cmd = Command::cargo_bin("ob").expect("Failed to locate ob binary");
        cmd.current_dir(dir.as_ref()).env_remove("BUILD_WORKSPACE_DIRECTORY");
        cmd
    }
}

/// Initialize a git repository at the given directory.
#[allow(dead_code)]
pub fn git_init(dir: &Path) {
    let output = std::process::Command::new("git")
        .args(["init"])
        .current_dir(dir)
        .output()
        .expect("git init failed");
    assert!(
        output.status.success(),
        "git init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
