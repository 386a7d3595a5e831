//! Thin wrapper around the `git` executable.

use std::path::Path;
use std::process::{Command, Output};

use crate::error::AppError;

/// Run git and return trimmed stdout, failing on nonzero exit.
pub fn run(args: &[&str], cwd: &Path) -> Result<String, AppError> {
    let output = output(args, cwd)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(AppError::Git {
            command: format!("git {}", args.join(" ")),
            details: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run git and return trimmed stdout, or `None` on any failure.
///
/// For probes where failure is a signal rather than an error: a missing
/// `git` binary and a nonzero exit are treated the same way.
pub fn probe(args: &[&str], cwd: &Path) -> Option<String> {
    let output = output(args, cwd).ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn output(args: &[&str], cwd: &Path) -> Result<Output, AppError> {
    let mut command = Command::new("git");
    command.args(args).current_dir(cwd);

    command.output().map_err(|e| AppError::Git {
        command: format!("git {}", args.join(" ")),
        details: e.to_string(),
    })
}
