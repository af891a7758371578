//! Optimizing compile inside the pinned container image
//!
//! The image's default entrypoint performs the size-optimized build of the
//! contract mounted at `/code` and writes the artifact to `/code/artifacts`.

use crate::error::{ForgeError, ForgeResult};
use crate::orchestration::{ContainerConfig, ContainerRuntime};
use crate::pipeline::BuildContext;
use std::collections::HashMap;
use tracing::info;

/// In-container path of the mounted contract source
pub const SOURCE_MOUNT: &str = "/code";

/// Run the optimizer container to completion
pub async fn run_optimizer(
    runtime: &dyn ContainerRuntime,
    ctx: &BuildContext,
) -> ForgeResult<()> {
    let (uid, gid) = ctx.user;

    let config = ContainerConfig {
        image: ctx.image.clone(),
        platform: Some(ctx.platform.clone()),
        entrypoint: None,
        // Output files must land owned by the invoking user, not the
        // image-internal identity
        user: Some(format!("{uid}:{gid}")),
        workdir: None,
        volumes: vec![
            format!("{}:{}", ctx.project_dir.display(), SOURCE_MOUNT),
            ctx.volumes.build.volume_arg(),
            ctx.volumes.registry.volume_arg(),
        ],
        env: HashMap::new(),
    };

    info!("Optimizer image {} on {}", ctx.image, ctx.platform);
    let code = runtime.run_interactive(&config, &[]).await?;

    if code == 0 {
        Ok(())
    } else {
        Err(ForgeError::OptimizationFailed { code })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::fake::FakeRuntime;
    use crate::pipeline::test_support::context;

    #[tokio::test]
    async fn optimizer_runs_pinned_image_as_invoking_user() {
        let runtime = FakeRuntime::new();
        let ctx = context();

        run_optimizer(&runtime, &ctx).await.unwrap();

        let runs = runtime.run_log();
        assert_eq!(runs.len(), 1);
        let (config, command) = &runs[0];
        assert_eq!(config.image, ctx.image);
        assert_eq!(config.platform.as_deref(), Some(ctx.platform.as_str()));
        assert_eq!(
            config.user.as_deref(),
            Some(format!("{}:{}", ctx.user.0, ctx.user.1).as_str())
        );
        // Default entrypoint drives the build
        assert!(config.entrypoint.is_none());
        assert!(command.is_empty());
    }

    #[tokio::test]
    async fn optimizer_mounts_source_and_caches() {
        let runtime = FakeRuntime::new();
        let ctx = context();

        run_optimizer(&runtime, &ctx).await.unwrap();

        let (config, _) = &runtime.run_log()[0];
        assert!(config.volumes.iter().any(|v| v.ends_with(":/code")));
        assert!(config.volumes.contains(&ctx.volumes.build.volume_arg()));
        assert!(config.volumes.contains(&ctx.volumes.registry.volume_arg()));
    }

    #[tokio::test]
    async fn optimizer_failure_keeps_exit_code() {
        let runtime = FakeRuntime::new();
        runtime.push_exit_code(101);

        let err = run_optimizer(&runtime, &context()).await.unwrap_err();
        assert!(matches!(err, ForgeError::OptimizationFailed { code: 101 }));
    }
}
