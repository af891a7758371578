//! The release build pipeline
//!
//! Stages run strictly in order. Each stage returns a `ForgeResult`, and the
//! driver short-circuits on the first failure, so the failing stage is
//! always named by the error it returned. Side effects already applied when
//! a later stage fails (the cache volumes) stay in place; they are caches
//! meant to persist across runs.

pub mod artifact;
pub mod optimizer;
pub mod permissions;
pub mod preflight;
pub mod quality;
pub mod volumes;

use crate::config::Config;
use crate::error::{ForgeError, ForgeResult};
use crate::orchestration::{self, ContainerRuntime};
use crate::project;
use artifact::Artifact;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use volumes::CacheVolumes;

/// Everything the container stages need, resolved once at the start of a run
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Contract project root on the host
    pub project_dir: PathBuf,
    /// Host directory receiving the artifact and manifest
    pub artifact_dir: PathBuf,
    /// Artifact file name the optimizer will produce
    pub artifact_file: String,
    /// Pinned optimizer image
    pub image: String,
    /// Resolved target platform
    pub platform: String,
    /// Capability flags for the static validator
    pub capabilities: Vec<String>,
    /// The two persistent cache volumes
    pub volumes: CacheVolumes,
    /// Numeric uid/gid of the invoking process
    pub user: (u32, u32),
}

impl BuildContext {
    /// Resolve the context from the project directory and configuration
    pub fn resolve(project_dir: &Path, config: &Config) -> ForgeResult<Self> {
        let package = project::package_name(project_dir)?;
        let build_volume = config
            .cache
            .build_volume
            .clone()
            .unwrap_or_else(|| project::default_build_volume(project_dir));

        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            artifact_dir: project_dir.join(&config.artifact.dir),
            artifact_file: project::artifact_file(&package),
            image: config.optimizer.image.clone(),
            platform: config.optimizer.resolved_platform(),
            capabilities: config.artifact.capabilities.clone(),
            volumes: CacheVolumes::new(build_volume, config.cache.registry_volume.clone()),
            user: orchestration::invoking_user(),
        })
    }

    /// Expected artifact location
    pub fn artifact_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.artifact_file)
    }
}

fn stage(step: usize, total: usize, msg: &str) {
    println!(
        "{} {}",
        style(format!("[{step}/{total}]")).cyan().bold(),
        msg
    );
}

fn progress_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Run the whole release pipeline against a contract project
pub async fn run_build(
    runtime: &dyn ContainerRuntime,
    ctx: &BuildContext,
) -> ForgeResult<Artifact> {
    const STAGES: usize = 6;

    stage(1, STAGES, "Checking required tools");
    preflight::check_required_tools().await?;

    stage(2, STAGES, "Quality gate: format, lint, tests");
    quality::run_gate(&ctx.project_dir).await?;

    stage(3, STAGES, "Preparing cache volumes");
    // The artifacts dir must exist before it is bind mounted, or the
    // runtime creates it root-owned on the host
    tokio::fs::create_dir_all(&ctx.artifact_dir)
        .await
        .map_err(|e| ForgeError::io(format!("creating {}", ctx.artifact_dir.display()), e))?;
    let pb = progress_spinner("Resetting build cache...");
    let prepared = ctx.volumes.prepare(runtime).await;
    pb.finish_and_clear();
    prepared?;

    stage(4, STAGES, "Fixing cache ownership");
    let pb = progress_spinner("Restoring cache ownership...");
    let fixed = permissions::fix_ownership(runtime, ctx).await;
    pb.finish_and_clear();
    fixed?;

    stage(5, STAGES, "Running optimizer");
    optimizer::run_optimizer(runtime, ctx).await?;

    stage(6, STAGES, "Verifying artifact");
    let artifact = artifact::verify_artifact(ctx).await?;
    artifact::validate_capabilities(ctx, &artifact.path).await?;

    Ok(artifact)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::fake::FakeRuntime;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, name: &str) {
        std::fs::write(
            dir.join("Cargo.toml"),
            format!("[package]\nname = \"{name}\"\nversion = \"0.1.0\"\n"),
        )
        .unwrap();
    }

    #[test]
    fn resolve_derives_artifact_and_volume_names() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "staking-vault");

        let ctx = BuildContext::resolve(temp.path(), &Config::default()).unwrap();

        assert_eq!(ctx.artifact_file, "staking_vault.wasm");
        assert!(ctx.volumes.build.name.ends_with("_cache"));
        assert_eq!(ctx.volumes.registry.name, "cwforge_registry_cache");
        assert_eq!(ctx.artifact_path(), temp.path().join("artifacts/staking_vault.wasm"));
    }

    #[test]
    fn resolve_honors_configured_build_volume() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "vault");

        let mut config = Config::default();
        config.cache.build_volume = Some("pinned_cache".to_string());

        let ctx = BuildContext::resolve(temp.path(), &config).unwrap();
        assert_eq!(ctx.volumes.build.name, "pinned_cache");
    }

    #[test]
    fn resolve_requires_a_package() {
        let temp = TempDir::new().unwrap();
        let err = BuildContext::resolve(temp.path(), &Config::default()).unwrap_err();
        assert!(matches!(err, ForgeError::ProjectInvalid { .. }));
    }

    #[tokio::test]
    async fn failed_early_stage_never_runs_containers() {
        let temp = TempDir::new().unwrap();
        // Manifest without sources: preflight or the quality gate fails
        // before any container work regardless of what is installed
        write_manifest(temp.path(), "broken");
        let ctx = BuildContext::resolve(temp.path(), &Config::default()).unwrap();
        let runtime = FakeRuntime::new();

        let result = run_build(&runtime, &ctx).await;

        assert!(result.is_err());
        assert!(runtime.run_log().is_empty());
        assert!(!ctx.artifact_path().exists());
    }
}
