//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// cwforge - reproducible release builds for CosmWasm contracts
///
/// Drives the pinned optimizer image with persistent caches and verifies
/// the produced artifact.
#[derive(Parser, Debug)]
#[command(name = "cwforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Contract project directory (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the release pipeline: quality gate, optimizer, artifact verification
    Build,

    /// Run each integration test target in isolation, failing fast
    Test(TestArgs),

    /// Check required tools and the container runtime
    Status,

    /// Inspect or drop the persistent cache volumes
    Cache(CacheArgs),
}

/// Arguments for the test command
#[derive(Parser, Debug)]
pub struct TestArgs {
    /// Arguments forwarded verbatim to every per-target test invocation
    #[arg(last = true)]
    pub args: Vec<String>,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show the state of both cache volumes
    Show,

    /// Remove both cache volumes
    Clear,
}
