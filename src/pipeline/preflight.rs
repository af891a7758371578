//! Preflight checks for required external tools

use crate::error::{ForgeError, ForgeResult};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// An external executable the pipeline depends on
#[derive(Debug, Clone, Copy)]
pub struct ToolRequirement {
    pub name: &'static str,
    pub hint: &'static str,
}

/// Tools that must be present before any stage runs
pub const REQUIRED_TOOLS: &[ToolRequirement] = &[
    ToolRequirement {
        name: "docker",
        hint: "Install Docker from https://docs.docker.com/get-docker/",
    },
    ToolRequirement {
        name: "cargo",
        hint: "Install Rust from https://rustup.rs",
    },
];

/// Static capability validator. Optional: when absent, validation is
/// skipped with a warning instead of failing the build.
pub const VALIDATOR_TOOL: &str = "cosmwasm-check";

/// Check that a tool responds to `--version`
pub async fn tool_available(name: &str) -> bool {
    Command::new(name)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Verify every required tool, stopping at the first missing one
pub async fn check_required_tools() -> ForgeResult<()> {
    check_tools(REQUIRED_TOOLS).await
}

async fn check_tools(tools: &[ToolRequirement]) -> ForgeResult<()> {
    for tool in tools {
        debug!("Checking for {}", tool.name);
        if !tool_available(tool.name).await {
            return Err(ForgeError::ToolMissing {
                name: tool.name.to_string(),
                hint: tool.hint.to_string(),
            });
        }
    }
    Ok(())
}
