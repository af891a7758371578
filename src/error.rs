//! Error types for cwforge
//!
//! All modules use `ForgeResult<T>` as their return type. Variants that wrap
//! a sub-process failure carry its exit code so the pipeline can propagate it
//! unchanged to the calling shell.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cwforge operations
pub type ForgeResult<T> = Result<T, ForgeError>;

/// All errors that can occur in cwforge
#[derive(Error, Debug)]
pub enum ForgeError {
    // Preflight errors
    #[error("Required tool not found: {name}. {hint}")]
    ToolMissing { name: String, hint: String },

    #[error("Container runtime is not available. Is the Docker daemon running?")]
    RuntimeUnavailable,

    // Quality gate errors
    #[error("Quality gate failed at {stage} step (exit code {code})")]
    QualityGateFailed { stage: &'static str, code: i32 },

    // Cache volume errors
    #[error("Failed to create cache volume {name}: {reason}")]
    VolumeCreate { name: String, reason: String },

    #[error("Failed to remove cache volume {name}: {reason}")]
    VolumeRemove { name: String, reason: String },

    // Container errors
    #[error("Cache ownership fix failed (exit code {code})")]
    PermissionFixFailed { code: i32 },

    #[error("Optimizer build failed (exit code {code})")]
    OptimizationFailed { code: i32 },

    // Artifact errors
    #[error("Optimizer reported success but no artifact exists at {path}")]
    ArtifactMissing { path: PathBuf },

    #[error("Capability validation failed (exit code {code})")]
    ValidationFailed { code: i32 },

    // Integration test errors
    #[error("Test target {name} failed (exit code {code})")]
    TestTargetFailed { name: String, code: i32 },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Not a contract project at {path}: {reason}")]
    ProjectInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ForgeError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Exit code to hand back to the calling shell.
    ///
    /// Failures of an underlying tool or container keep that tool's exit code
    /// so callers can tell a lint failure from an optimizer failure. Codes
    /// outside 1..=255 (signals, spawn failures) collapse to 1.
    pub fn exit_code(&self) -> u8 {
        let code = match self {
            Self::QualityGateFailed { code, .. }
            | Self::PermissionFixFailed { code }
            | Self::OptimizationFailed { code }
            | Self::ValidationFailed { code }
            | Self::TestTargetFailed { code, .. } => *code,
            _ => 1,
        };
        u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::RuntimeUnavailable => Some("Start the Docker daemon and retry"),
            Self::ArtifactMissing { .. } => {
                Some("Inspect the optimizer output above; the container exited 0 without producing output")
            }
            Self::ProjectInvalid { .. } => {
                Some("Run from the contract root, or pass it with --project")
            }
            _ => None,
        }
    }
}
