//! Quality gate: formatting, lints, unit tests
//!
//! Runs before any artifact work starts. Each step must complete before the
//! next begins; the first non-zero result aborts the build with that step's
//! exit code.

use crate::error::{ForgeError, ForgeResult};
use console::style;
use std::fmt;
use std::path::Path;
use tokio::process::Command;

/// The gate steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStep {
    Format,
    Lint,
    Tests,
}

impl GateStep {
    pub const ALL: [GateStep; 3] = [GateStep::Format, GateStep::Lint, GateStep::Tests];

    /// Cargo invocation for this step
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            Self::Format => &["fmt", "--check"],
            Self::Lint => &["clippy", "--all-targets", "--", "-D", "warnings"],
            Self::Tests => &["test"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Lint => "lint",
            Self::Tests => "tests",
        }
    }
}

impl fmt::Display for GateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Run one gate step with inherited stdio
async fn run_step(project: &Path, step: GateStep) -> ForgeResult<()> {
    println!("{} cargo {}", style("-->").dim(), step.args().join(" "));

    let status = Command::new("cargo")
        .args(step.args())
        .current_dir(project)
        .status()
        .await
        .map_err(|e| {
            ForgeError::command_failed(format!("cargo {}", step.args().join(" ")), e)
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ForgeError::QualityGateFailed {
            stage: step.name(),
            code: status.code().unwrap_or(-1),
        })
    }
}

/// Run the full gate in order, stopping at the first failing step
pub async fn run_gate(project: &Path) -> ForgeResult<()> {
    for step in GateStep::ALL {
        run_step(project, step).await?;
    }
    Ok(())
}
