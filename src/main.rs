//! cwforge - reproducible release builds for CosmWasm contracts
//!
//! CLI entry point that dispatches to subcommands. Exit codes of failing
//! underlying tools are propagated unchanged.

use clap::Parser;
use console::style;
use cwforge::cli::{Cli, Commands};
use cwforge::error::{ForgeError, ForgeResult};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("cwforge=warn"),
        1 => EnvFilter::new("cwforge=info"),
        _ => EnvFilter::new("cwforge=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> ForgeResult<()> {
    let project = resolve_project_dir(cli.project)?;
    let config = cwforge::config::load(&project).await?;

    match cli.command {
        Commands::Build => cwforge::cli::commands::build(&project, &config).await,
        Commands::Test(args) => cwforge::cli::commands::test(&project, args).await,
        Commands::Status => cwforge::cli::commands::status(&config).await,
        Commands::Cache(args) => cwforge::cli::commands::cache(&project, &config, args).await,
    }
}

fn resolve_project_dir(flag: Option<PathBuf>) -> ForgeResult<PathBuf> {
    match flag {
        Some(path) => path
            .canonicalize()
            .map_err(|e| ForgeError::io(format!("resolving project path {}", path.display()), e)),
        None => std::env::current_dir().map_err(|e| ForgeError::io("getting current directory", e)),
    }
}
