//! revmap CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "revmap")]
#[command(about = "Static reverse-engineering pipeline for heterogeneous legacy codebases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Codebase root path (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl and classify the filesystem tree, print a summary
    Crawl,
    /// Run the full pipeline and write the visualization package to disk
    Scan {
        /// Output directory override (defaults to revmap.toml's output_dir
        /// or "revmap-out")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the full pipeline without writing output; exit 2 if cycles or
    /// architectural violations were found
    Check,
    /// Parse a single C# file and print its tree-sitter AST as JSON
    DumpAst {
        /// Path to the .cs file to parse
        path: PathBuf,
    },
    /// Show version
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("revmap={log_level}")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if matches!(cli.command, Commands::Version) {
        println!("revmap v{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    tracing::info!("revmap v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Codebase root: {}", cli.root.display());

    let result = match cli.command {
        Commands::Crawl => commands::crawl(&cli.root),
        Commands::Scan { output } => commands::scan(&cli.root, output),
        Commands::Check => commands::check(&cli.root),
        Commands::DumpAst { path } => commands::dump_ast(&path),
        Commands::Version => unreachable!(),
    };

    match result {
        Ok(commands::Status::Clean) => ExitCode::SUCCESS,
        Ok(commands::Status::IssuesFound) => ExitCode::from(2),
        Err(e) => {
            eprintln!("revmap: {e}");
            ExitCode::FAILURE
        }
    }
}
