use std::path::PathBuf;

use clap::{Parser, Subcommand};
use outbase::AppError;

#[derive(Parser)]
#[command(name = "ob")]
#[command(version)]
#[command(
    about = "Resolve Bazel's output base and maintain workspace convenience links",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the output base resolved from the workspace marker
    #[clap(visible_alias = "r")]
    Resolve {
        /// Marker file to resolve from (defaults to the workspace marker)
        #[arg(short, long)]
        marker: Option<PathBuf>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Write the generated package exposing the OUTPUT_BASE constant
    #[clap(visible_alias = "g")]
    Generate {
        /// Marker file to resolve from (defaults to the workspace marker)
        #[arg(short, long)]
        marker: Option<PathBuf>,
    },
    /// Ensure the external convenience symlink points into the output base
    Link,
    /// Run the full maintenance pass: gitignore, external link, generated package
    Refresh {
        /// Marker file to resolve from (defaults to the workspace marker)
        #[arg(short, long)]
        marker: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Resolve { marker, format } => outbase::resolve(marker.as_deref(), &format),
        Commands::Generate { marker } => outbase::generate(marker.as_deref()),
        Commands::Link => outbase::link(),
        Commands::Refresh { marker } => outbase::refresh(marker.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
