//! Cache command - manage the persistent cache volumes

use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::Config;
use crate::error::{ForgeError, ForgeResult};
use crate::orchestration::{ContainerRuntime, DockerRuntime};
use crate::pipeline::volumes::CacheVolumes;
use crate::project;
use console::style;
use std::path::Path;

/// Execute the cache command
pub async fn execute(project: &Path, config: &Config, args: CacheArgs) -> ForgeResult<()> {
    let runtime = DockerRuntime::new();
    if !runtime.is_available().await {
        return Err(ForgeError::RuntimeUnavailable);
    }

    let build_name = config
        .cache
        .build_volume
        .clone()
        .unwrap_or_else(|| project::default_build_volume(project));
    let volumes = CacheVolumes::new(build_name, config.cache.registry_volume.clone());

    match args.action {
        CacheAction::Show => show(&runtime, &volumes).await,
        CacheAction::Clear => clear(&runtime, &volumes).await,
    }
}

async fn show(runtime: &dyn ContainerRuntime, volumes: &CacheVolumes) -> ForgeResult<()> {
    for vol in [&volumes.build, &volumes.registry] {
        match runtime.inspect_volume(&vol.name).await? {
            Some(info) => {
                let created = info
                    .created_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "unknown".to_string());
                println!(
                    "{} {} ({}) created {}",
                    style("✓").green(),
                    vol.name,
                    vol.purpose,
                    created
                );
            }
            None => {
                println!("{} {} ({}) absent", style("-").dim(), vol.name, vol.purpose);
            }
        }
    }
    Ok(())
}

async fn clear(runtime: &dyn ContainerRuntime, volumes: &CacheVolumes) -> ForgeResult<()> {
    for vol in [&volumes.build, &volumes.registry] {
        runtime.remove_volume(&vol.name).await?;
        println!("{} Removed {}", style("✓").green(), vol.name);
    }
    Ok(())
}
