//! Hidden gitignore maintenance.
//!
//! Generated output is ignored through the repository's `info/exclude` file
//! instead of a tracked `.gitignore`, so adopting the tool requires no
//! checked-in changes. The file lives in the common git dir: worktrees
//! share a single `info/exclude`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::git;
use crate::workspace::Workspace;

const HEADER: &str = "### Automatically added by ob";

/// Outcome of an exclude maintenance pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcludeOutcome {
    /// Not inside a git repository; nothing to do.
    NotARepository,
    /// All entries were already present.
    UpToDate,
    /// The listed patterns were appended.
    Added(Vec<String>),
}

/// Patterns to keep out of version control, each with its comment line.
///
/// Patterns are anchored at the workspace's position inside the repository
/// so nested workspaces only ignore their own output.
fn needed_entries(prefix: &str) -> Vec<(String, &'static str)> {
    vec![
        (
            format!("/{prefix}external"),
            "# Ignore the external link. It must not end with a trailing slash because it is a symlink.",
        ),
        (
            format!("/{prefix}bazel-*"),
            "# Ignore links to Bazel's output. The star covers the checkout-name-dependent bazel-<workspace_name> link.",
        ),
    ]
}

/// Ensure generated-output patterns are present in the repository's hidden
/// exclude file. Outside a git repository this is a silent no-op.
pub fn ensure_exclude_entries(workspace: &Workspace) -> Result<ExcludeOutcome, AppError> {
    // Nonzero exit covers both "not a repository" and "git not installed".
    let Some(git_dir) = git::probe(&["rev-parse", "--git-common-dir"], workspace.root()) else {
        return Ok(ExcludeOutcome::NotARepository);
    };
    let git_dir = absolute_from(workspace.root(), Path::new(&git_dir));

    let prefix = git::run(&["rev-parse", "--show-prefix"], workspace.root())?;

    let info_dir = git_dir.join("info");
    // Older git versions do not auto-create info/.
    fs::create_dir_all(&info_dir)?;
    let exclude_path = info_dir.join("exclude");

    let existing = match fs::read_to_string(&exclude_path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err.into()),
    };
    // Trailing whitespace is insignificant for the exact-match check; the
    // existing file is never rewritten, only appended to.
    let lines: Vec<&str> = existing.lines().map(str::trim_end).collect();

    let missing: Vec<(String, &'static str)> = needed_entries(&prefix)
        .into_iter()
        .filter(|(pattern, _)| !lines.iter().any(|line| line == pattern))
        .collect();
    if missing.is_empty() {
        return Ok(ExcludeOutcome::UpToDate);
    }

    let mut block = String::new();
    if !existing.is_empty() && !existing.ends_with('\n') {
        block.push('\n');
    }
    if lines.last().is_some_and(|line| !line.is_empty()) {
        block.push('\n');
    }
    block.push_str(HEADER);
    block.push('\n');

    let mut added = Vec::new();
    for (pattern, comment) in missing {
        block.push_str(comment);
        block.push('\n');
        block.push_str(&pattern);
        block.push('\n');
        added.push(pattern);
    }

    let mut file = fs::OpenOptions::new().create(true).append(true).open(&exclude_path)?;
    file.write_all(block.as_bytes())?;

    Ok(ExcludeOutcome::Added(added))
}

fn absolute_from(root: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() { dir.to_path_buf() } else { root.join(dir) }
}
