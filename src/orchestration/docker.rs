//! Docker container runtime
//!
//! Implements the ContainerRuntime trait by shelling out to the `docker`
//! CLI, which is what the optimizer image documents and what CI images ship.

use crate::error::{ForgeError, ForgeResult};
use crate::orchestration::container::ContainerConfig;
use crate::orchestration::runtime::{ContainerRuntime, VolumeInfo};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Container runtime backed by the local Docker daemon
pub struct DockerRuntime;

/// Subset of `docker volume inspect` output the cache commands need
#[derive(Debug, Deserialize)]
struct VolumeInspect {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "CreatedAt")]
    created_at: Option<String>,
    #[serde(rename = "Labels")]
    labels: Option<HashMap<String, String>>,
}

impl DockerRuntime {
    /// Create a new Docker runtime
    pub fn new() -> Self {
        Self
    }

    /// Execute a Docker command and return the output
    async fn exec(&self, args: &[&str]) -> ForgeResult<std::process::Output> {
        debug!("Executing: docker {:?}", args);

        Command::new("docker")
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ForgeError::command_failed(format!("docker {args:?}"), e))
    }
}

impl Default for DockerRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn is_available(&self) -> bool {
        Command::new("docker")
            .arg("version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    async fn volume_exists(&self, name: &str) -> ForgeResult<bool> {
        let output = self.exec(&["volume", "inspect", name]).await?;
        Ok(output.status.success())
    }

    async fn create_volume(
        &self,
        name: &str,
        labels: &HashMap<String, String>,
    ) -> ForgeResult<()> {
        // Re-creating with labels is rejected by the engine, so an existing
        // volume is left untouched.
        if self.volume_exists(name).await? {
            debug!("Volume {} already exists", name);
            return Ok(());
        }

        let mut args: Vec<String> = vec!["volume".to_string(), "create".to_string()];
        for (k, v) in labels {
            args.push("--label".to_string());
            args.push(format!("{k}={v}"));
        }
        args.push(name.to_string());

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = self.exec(&arg_refs).await?;

        if output.status.success() {
            debug!("Created volume {}", name);
            Ok(())
        } else {
            Err(ForgeError::VolumeCreate {
                name: name.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    async fn remove_volume(&self, name: &str) -> ForgeResult<()> {
        let output = self.exec(&["volume", "rm", "--force", name]).await?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // --force tolerates missing volumes on current engines; older
            // ones still report an error
            if stderr.contains("no such volume") {
                Ok(())
            } else {
                Err(ForgeError::VolumeRemove {
                    name: name.to_string(),
                    reason: stderr.trim().to_string(),
                })
            }
        }
    }

    async fn inspect_volume(&self, name: &str) -> ForgeResult<Option<VolumeInfo>> {
        let output = self
            .exec(&["volume", "inspect", "--format", "{{json .}}", name])
            .await?;

        if !output.status.success() {
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let inspect: VolumeInspect = serde_json::from_str(stdout.trim())?;

        Ok(Some(VolumeInfo {
            name: inspect.name,
            created_at: inspect
                .created_at
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
            labels: inspect.labels.unwrap_or_default(),
        }))
    }

    async fn run(
        &self,
        config: &ContainerConfig,
        command: &[String],
    ) -> ForgeResult<std::process::Output> {
        let args = config.cli_args(command);
        debug!("Running container: docker {:?}", args);

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.exec(&arg_refs).await
    }

    async fn run_interactive(
        &self,
        config: &ContainerConfig,
        command: &[String],
    ) -> ForgeResult<i32> {
        let args = config.cli_args(command);
        debug!("Running container interactively: docker {:?}", args);

        let status = Command::new("docker")
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ForgeError::command_failed(format!("docker run {}", config.image), e))?;

        Ok(status.code().unwrap_or(-1))
    }

    fn runtime_name(&self) -> &'static str {
        "Docker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docker_runtime_new() {
        let runtime = DockerRuntime::new();
        assert_eq!(runtime.runtime_name(), "Docker");
    }

    #[test]
    fn volume_inspect_parses() {
        let raw = r#"{"CreatedAt":"2025-11-03T09:12:44+01:00","Driver":"local","Labels":{"dev.cwforge.cache":"true"},"Mountpoint":"/var/lib/docker/volumes/x/_data","Name":"my_contract_cache","Options":null,"Scope":"local"}"#;
        let inspect: VolumeInspect = serde_json::from_str(raw).unwrap();
        assert_eq!(inspect.name, "my_contract_cache");
        assert!(inspect.created_at.is_some());
        assert_eq!(
            inspect.labels.unwrap().get("dev.cwforge.cache"),
            Some(&"true".to_string())
        );
    }

    #[test]
    fn volume_inspect_tolerates_null_labels() {
        let raw = r#"{"Name":"vol","Labels":null}"#;
        let inspect: VolumeInspect = serde_json::from_str(raw).unwrap();
        assert!(inspect.labels.is_none());
        assert!(inspect.created_at.is_none());
    }
}
