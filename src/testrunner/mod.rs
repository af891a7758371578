//! Isolated integration-test driver
//!
//! Each `tests/*.rs` file is one target, run as its own `cargo test --test`
//! invocation so a crash or poisoned global in one suite cannot mask
//! failures in another. Targets run in lexicographic file-name order and the
//! first failure stops the run with that target's exact exit code.

use crate::error::{ForgeError, ForgeResult};
use async_trait::async_trait;
use console::style;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Directory holding integration test sources, relative to the project root
pub const TESTS_DIR: &str = "tests";

/// One independently runnable test suite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestTarget {
    /// Target name (file stem), as cargo knows it
    pub name: String,
    /// Source file backing the target
    pub path: PathBuf,
}

/// Discover test targets: `*.rs` files one level deep, sorted by file name.
///
/// Subdirectories (shared helpers, multitest modules) are not targets of
/// their own and are skipped.
pub fn discover_targets(dir: &Path) -> ForgeResult<Vec<TestTarget>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|e| ForgeError::io(format!("reading {}", dir.display()), e))?;

    let mut targets = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ForgeError::io(format!("reading {}", dir.display()), e))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("rs") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            targets.push(TestTarget {
                name: stem.to_string(),
                path: path.clone(),
            });
        }
    }

    targets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(targets)
}

/// Runs one target to completion, returning its exit code
#[async_trait]
pub trait TargetInvoker: Send + Sync {
    async fn invoke(
        &self,
        project: &Path,
        target: &TestTarget,
        extra: &[String],
    ) -> ForgeResult<i32>;
}

/// Invokes targets with `cargo test --test <name>`
pub struct CargoInvoker;

#[async_trait]
impl TargetInvoker for CargoInvoker {
    async fn invoke(
        &self,
        project: &Path,
        target: &TestTarget,
        extra: &[String],
    ) -> ForgeResult<i32> {
        debug!("Running test target {}", target.name);

        let status = Command::new("cargo")
            .args(["test", "--test", &target.name])
            .args(extra)
            .current_dir(project)
            .status()
            .await
            .map_err(|e| {
                ForgeError::command_failed(format!("cargo test --test {}", target.name), e)
            })?;

        Ok(status.code().unwrap_or(-1))
    }
}

/// Run every discovered target in order, stopping at the first failure.
///
/// A missing or empty tests directory is a valid state (a contract with no
/// integration suite) and exits cleanly.
pub async fn run_targets(
    invoker: &dyn TargetInvoker,
    project: &Path,
    extra: &[String],
) -> ForgeResult<()> {
    let dir = project.join(TESTS_DIR);
    let targets = discover_targets(&dir)?;

    if targets.is_empty() {
        println!(
            "{} No integration test targets under {}",
            style("i").blue().bold(),
            dir.display()
        );
        return Ok(());
    }

    for target in &targets {
        println!("{} {}", style("==>").cyan().bold(), target.name);
        let code = invoker.invoke(project, target, extra).await?;
        if code != 0 {
            return Err(ForgeError::TestTargetFailed {
                name: target.name.clone(),
                code,
            });
        }
    }

    println!(
        "{} {} test target(s) passed",
        style("✓").green().bold(),
        targets.len()
    );
    Ok(())
}
