//! Container runtime abstraction
//!
//! The pipeline drives the container runtime through this trait so the
//! volume, permission, and optimizer stages can each be exercised against a
//! fake runtime in tests.

use crate::error::ForgeResult;
use crate::orchestration::container::ContainerConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Metadata for a named volume
#[derive(Debug, Clone)]
pub struct VolumeInfo {
    /// Volume name
    pub name: String,
    /// When the volume was created, if the runtime reports it
    pub created_at: Option<DateTime<Utc>>,
    /// Volume labels
    pub labels: HashMap<String, String>,
}

/// Abstract container runtime interface
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Check if the runtime daemon is reachable
    async fn is_available(&self) -> bool;

    /// Whether a named volume exists
    async fn volume_exists(&self, name: &str) -> ForgeResult<bool>;

    /// Create a named volume. Creating an existing volume is a no-op.
    async fn create_volume(
        &self,
        name: &str,
        labels: &HashMap<String, String>,
    ) -> ForgeResult<()>;

    /// Remove a named volume. Removing a missing volume is a no-op.
    async fn remove_volume(&self, name: &str) -> ForgeResult<()>;

    /// Inspect a named volume, if it exists
    async fn inspect_volume(&self, name: &str) -> ForgeResult<Option<VolumeInfo>>;

    /// Run a container to completion with captured output
    async fn run(
        &self,
        config: &ContainerConfig,
        command: &[String],
    ) -> ForgeResult<std::process::Output>;

    /// Run a container to completion with inherited stdio, returning its
    /// exit code
    async fn run_interactive(
        &self,
        config: &ContainerConfig,
        command: &[String],
    ) -> ForgeResult<i32>;

    /// Get the human-readable runtime name for display
    fn runtime_name(&self) -> &'static str;
}
