//! Cache ownership repair
//!
//! The optimizer image's default entrypoint runs as root, so files written
//! to the cache volumes or the artifacts directory by an earlier run may be
//! root-owned on the host. One throwaway container run, with the entrypoint
//! overridden to a shell but the image's default identity kept, re-chowns
//! the mount points to the invoking user before the real build. Runtimes
//! that map user ids transparently would not need this; it runs
//! unconditionally so behavior does not depend on the host's id mapping.

use crate::error::{ForgeError, ForgeResult};
use crate::orchestration::{output_tail, ContainerConfig, ContainerRuntime};
use crate::pipeline::volumes::{BUILD_MOUNT, REGISTRY_MOUNT};
use crate::pipeline::BuildContext;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Where the host artifacts directory is mounted during the fix
const ARTIFACTS_MOUNT: &str = "/artifacts";

/// Chown the cache volumes and the artifacts directory to the invoking user
pub async fn fix_ownership(
    runtime: &dyn ContainerRuntime,
    ctx: &BuildContext,
) -> ForgeResult<()> {
    let (uid, gid) = ctx.user;

    let config = ContainerConfig {
        image: ctx.image.clone(),
        platform: Some(ctx.platform.clone()),
        entrypoint: Some("/bin/sh".to_string()),
        // The image default identity can chown; the invoking user could not
        user: None,
        workdir: None,
        volumes: vec![
            ctx.volumes.build.volume_arg(),
            ctx.volumes.registry.volume_arg(),
            format!("{}:{}", ctx.artifact_dir.display(), ARTIFACTS_MOUNT),
        ],
        env: HashMap::new(),
    };

    let command = vec![
        "-c".to_string(),
        format!("chown -R {uid}:{gid} {BUILD_MOUNT} {REGISTRY_MOUNT} {ARTIFACTS_MOUNT}"),
    ];

    debug!("Fixing cache ownership to {}:{}", uid, gid);
    let output = runtime.run(&config, &command).await?;

    if output.status.success() {
        Ok(())
    } else {
        warn!("{}", output_tail(&output));
        Err(ForgeError::PermissionFixFailed {
            code: output.status.code().unwrap_or(-1),
        })
    }
}
