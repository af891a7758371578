//! Cache volume lifecycle
//!
//! Two named volumes persist across runs: the per-project build cache and
//! the shared crate registry cache. The build cache is dropped and recreated
//! every run, so ownership left behind by a previous run under a different
//! effective user cannot leak into this one. The registry cache only holds
//! downloadable crates and is kept.

use crate::error::{ForgeError, ForgeResult};
use crate::orchestration::ContainerRuntime;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// In-container mount point of the build cache
pub const BUILD_MOUNT: &str = "/target";

/// In-container mount point of the cargo registry cache
pub const REGISTRY_MOUNT: &str = "/usr/local/cargo/registry";

/// Volume label keys
pub mod labels {
    /// Marks a volume as managed by cwforge
    pub const MANAGED: &str = "dev.cwforge.cache";
    /// build or registry
    pub const PURPOSE: &str = "dev.cwforge.cache.purpose";
    /// Creation timestamp (RFC3339)
    pub const CREATED_AT: &str = "dev.cwforge.cache.created_at";
}

/// What a cache volume is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumePurpose {
    Build,
    Registry,
}

impl VolumePurpose {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Registry => "registry",
        }
    }
}

impl fmt::Display for VolumePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// A named persistent volume and its in-container mount point
#[derive(Debug, Clone)]
pub struct CacheVolume {
    pub name: String,
    pub mount_target: &'static str,
    pub purpose: VolumePurpose,
}

impl CacheVolume {
    /// The per-project build cache
    pub fn build(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mount_target: BUILD_MOUNT,
            purpose: VolumePurpose::Build,
        }
    }

    /// The shared registry cache
    pub fn registry(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mount_target: REGISTRY_MOUNT,
            purpose: VolumePurpose::Registry,
        }
    }

    /// `-v` argument for the container runtime
    pub fn volume_arg(&self) -> String {
        format!("{}:{}", self.name, self.mount_target)
    }

    /// Labels recorded on creation
    pub fn creation_labels(&self) -> HashMap<String, String> {
        let mut labels = HashMap::new();
        labels.insert(labels::MANAGED.to_string(), "true".to_string());
        labels.insert(
            labels::PURPOSE.to_string(),
            self.purpose.as_label().to_string(),
        );
        labels.insert(labels::CREATED_AT.to_string(), Utc::now().to_rfc3339());
        labels
    }
}

/// The two volumes a build run mounts
#[derive(Debug, Clone)]
pub struct CacheVolumes {
    pub build: CacheVolume,
    pub registry: CacheVolume,
}

impl CacheVolumes {
    pub fn new(build_name: impl Into<String>, registry_name: impl Into<String>) -> Self {
        Self {
            build: CacheVolume::build(build_name),
            registry: CacheVolume::registry(registry_name),
        }
    }

    /// Reset the build cache and make sure both volumes exist.
    ///
    /// Removing an absent volume and creating an existing one both succeed,
    /// so repeated runs converge on the same state.
    pub async fn prepare(&self, runtime: &dyn ContainerRuntime) -> ForgeResult<()> {
        if !runtime.is_available().await {
            return Err(ForgeError::RuntimeUnavailable);
        }

        debug!("Resetting build cache volume {}", self.build.name);
        runtime.remove_volume(&self.build.name).await?;
        runtime
            .create_volume(&self.build.name, &self.build.creation_labels())
            .await?;
        runtime
            .create_volume(&self.registry.name, &self.registry.creation_labels())
            .await?;

        Ok(())
    }
}
