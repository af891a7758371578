//! Configuration schema for cwforge
//!
//! Defaults reproduce the standard CosmWasm release build. A project may
//! override individual values in `.cwforge.toml` at its root; an absent or
//! empty file yields exactly the defaults below.

use serde::{Deserialize, Serialize};

/// Pinned optimizer image. A floating tag would make builds
/// non-reproducible across time, so the tag is exact.
pub const DEFAULT_OPTIMIZER_IMAGE: &str = "cosmwasm/optimizer:0.16.1";

/// Target platform for the optimizer container. Artifacts must come out
/// byte-identical regardless of the host architecture, so the platform is
/// forced rather than inferred from the host.
pub const DEFAULT_PLATFORM: &str = "linux/amd64";

/// Environment variable overriding the target platform.
pub const PLATFORM_ENV: &str = "CWFORGE_PLATFORM";

/// Shared registry cache volume. Holds downloaded crates only, so it is
/// safe to share between projects and keep across runs.
pub const DEFAULT_REGISTRY_VOLUME: &str = "cwforge_registry_cache";

/// Capabilities the deployment chain supports. Must match the target
/// environment exactly: a missing entry under-validates, an extra one
/// over-restricts. Never auto-detected from the artifact.
pub const DEFAULT_CAPABILITIES: &[&str] = &[
    "iterator",
    "staking",
    "stargate",
    "cosmwasm_1_1",
    "cosmwasm_1_2",
    "cosmwasm_1_3",
    "cosmwasm_1_4",
];

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Optimizer container settings
    pub optimizer: OptimizerConfig,

    /// Artifact output and validation settings
    pub artifact: ArtifactConfig,

    /// Cache volume settings
    pub cache: CacheConfig,
}

/// Optimizer container configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Optimizer image with an exact version tag
    pub image: String,

    /// Target platform passed to the container runtime
    pub platform: String,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            image: DEFAULT_OPTIMIZER_IMAGE.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }
}

impl OptimizerConfig {
    /// Platform with the environment override applied
    pub fn resolved_platform(&self) -> String {
        std::env::var(PLATFORM_ENV).unwrap_or_else(|_| self.platform.clone())
    }
}

/// Artifact output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Output directory relative to the project root
    pub dir: String,

    /// Capability flags passed to the static validator
    pub capabilities: Vec<String>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: "artifacts".to_string(),
            capabilities: DEFAULT_CAPABILITIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Cache volume configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Build cache volume name (default: `<project dir name>_cache`)
    pub build_volume: Option<String>,

    /// Registry cache volume name
    pub registry_volume: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            build_volume: None,
            registry_volume: DEFAULT_REGISTRY_VOLUME.to_string(),
        }
    }
}
