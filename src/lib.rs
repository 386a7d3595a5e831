//! outbase: resolve Bazel's output base and keep workspace plumbing fresh.
//!
//! The output base is derived from a workspace marker file — the parent of
//! the parent of the marker's real (symlink-resolved) location — and
//! published as a loadable `OUTPUT_BASE` constant in a generated package.
//! The surrounding commands maintain the `external` convenience symlink and
//! the repository's hidden gitignore entries.

pub mod config;
pub mod error;
pub mod git;
pub mod gitignore;
pub mod links;
pub mod output_base;
pub mod workspace;

pub use error::AppError;

use std::path::Path;

use config::Config;
use gitignore::ExcludeOutcome;
use links::LinkOutcome;
use output_base::GeneratedPackage;
use workspace::Workspace;

/// Print the output base resolved from the workspace marker.
pub fn resolve(marker: Option<&Path>, format: &str) -> Result<(), AppError> {
    let workspace = Workspace::discover()?;
    let config = Config::load(&workspace)?;
    let marker_path = workspace.resolve_marker(marker, &config);
    let output_base = output_base::resolve_output_base(&marker_path)?;

    match format {
        "text" => println!("{}", output_base.display()),
        "json" => {
            let payload = serde_json::json!({ "output_base": output_base.display().to_string() });
            println!("{payload}");
        }
        other => {
            return Err(AppError::Configuration(format!(
                "Unknown format '{other}': expected text or json"
            )));
        }
    }
    Ok(())
}

/// Resolve the output base and write the generated package.
pub fn generate(marker: Option<&Path>) -> Result<(), AppError> {
    let workspace = Workspace::discover()?;
    let config = Config::load(&workspace)?;
    write_package(&workspace, &config, marker)?;
    Ok(())
}

/// Ensure the `external` convenience symlink exists at the workspace root.
pub fn link() -> Result<(), AppError> {
    let workspace = Workspace::discover()?;
    report_link(links::ensure_external_link(&workspace)?);
    Ok(())
}

/// Full maintenance pass: gitignore entries, external link, generated package.
pub fn refresh(marker: Option<&Path>) -> Result<(), AppError> {
    let workspace = Workspace::discover()?;
    let config = Config::load(&workspace)?;

    match gitignore::ensure_exclude_entries(&workspace)? {
        ExcludeOutcome::Added(patterns) => {
            println!("✅ Gitignored generated output ({})", patterns.join(", "));
        }
        ExcludeOutcome::UpToDate | ExcludeOutcome::NotARepository => {}
    }

    report_link(links::ensure_external_link(&workspace)?);
    write_package(&workspace, &config, marker)?;
    Ok(())
}

fn write_package(
    workspace: &Workspace,
    config: &Config,
    marker: Option<&Path>,
) -> Result<(), AppError> {
    let marker_path = workspace.resolve_marker(marker, config);
    let output_base = output_base::resolve_output_base(&marker_path)?;

    let package = GeneratedPackage::new(&output_base, config.repo_name());
    package.write(&output_base)?;
    println!("✅ Generated {}", package.constant_path().display());
    Ok(())
}

fn report_link(outcome: LinkOutcome) {
    match outcome {
        LinkOutcome::Created => println!("✅ Added external workspace link"),
        LinkOutcome::Relinked => println!("✅ Relinked external workspace link"),
        LinkOutcome::UpToDate => println!("✅ external workspace link is up to date"),
    }
}
