//! Shared container invocation types
//!
//! Every container the pipeline starts is a one-shot run-to-completion
//! invocation, so `--rm` is unconditional.

use std::collections::HashMap;

/// Configuration for a single container invocation
#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    /// Image reference with an exact tag
    pub image: String,
    /// Platform to force (`--platform`); None lets the runtime pick
    pub platform: Option<String>,
    /// Entrypoint override
    pub entrypoint: Option<String>,
    /// uid:gid to run as; None keeps the image's default identity
    pub user: Option<String>,
    /// Working directory inside the container
    pub workdir: Option<String>,
    /// Volume mounts (volume-or-host-path:container-path)
    pub volumes: Vec<String>,
    /// Environment variables
    pub env: HashMap<String, String>,
}

impl ContainerConfig {
    /// Full `docker run` argument list for this invocation
    pub fn cli_args(&self, command: &[String]) -> Vec<String> {
        let mut args = vec!["run".to_string(), "--rm".to_string()];

        if let Some(ref platform) = self.platform {
            args.push("--platform".to_string());
            args.push(platform.clone());
        }

        if let Some(ref entrypoint) = self.entrypoint {
            args.push("--entrypoint".to_string());
            args.push(entrypoint.clone());
        }

        if let Some(ref user) = self.user {
            args.push("--user".to_string());
            args.push(user.clone());
        }

        if let Some(ref workdir) = self.workdir {
            args.push("-w".to_string());
            args.push(workdir.clone());
        }

        for v in &self.volumes {
            args.push("-v".to_string());
            args.push(v.clone());
        }

        for (k, v) in &self.env {
            args.push("-e".to_string());
            args.push(format!("{k}={v}"));
        }

        args.push(self.image.clone());
        args.extend(command.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_args_minimal() {
        let config = ContainerConfig {
            image: "cosmwasm/optimizer:0.16.1".to_string(),
            ..Default::default()
        };

        assert_eq!(
            config.cli_args(&[]),
            vec!["run", "--rm", "cosmwasm/optimizer:0.16.1"]
        );
    }

    #[test]
    fn cli_args_full() {
        let config = ContainerConfig {
            image: "cosmwasm/optimizer:0.16.1".to_string(),
            platform: Some("linux/amd64".to_string()),
            entrypoint: Some("/bin/sh".to_string()),
            user: Some("1000:1000".to_string()),
            workdir: None,
            volumes: vec!["my_cache:/target".to_string()],
            env: HashMap::new(),
        };

        let args = config.cli_args(&["-c".to_string(), "true".to_string()]);
        assert_eq!(args[0], "run");
        assert_eq!(args[1], "--rm");
        assert!(args.windows(2).any(|w| w == ["--platform", "linux/amd64"]));
        assert!(args.windows(2).any(|w| w == ["--entrypoint", "/bin/sh"]));
        assert!(args.windows(2).any(|w| w == ["--user", "1000:1000"]));
        assert!(args.windows(2).any(|w| w == ["-v", "my_cache:/target"]));
        // Image comes before the command
        let image_pos = args.iter().position(|a| a == "cosmwasm/optimizer:0.16.1").unwrap();
        assert_eq!(&args[image_pos + 1..], ["-c", "true"]);
    }
}
