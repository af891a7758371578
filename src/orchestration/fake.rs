//! Fake container runtime for unit tests
//!
//! Records every call and plays back queued exit codes, so the pipeline
//! stages can be tested without a Docker daemon.

use crate::error::ForgeResult;
use crate::orchestration::container::ContainerConfig;
use crate::orchestration::runtime::{ContainerRuntime, VolumeInfo};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::Mutex;

pub struct FakeRuntime {
    pub available: bool,
    pub volumes: Mutex<HashSet<String>>,
    pub removed: Mutex<Vec<String>>,
    pub created: Mutex<Vec<String>>,
    pub runs: Mutex<Vec<(ContainerConfig, Vec<String>)>>,
    pub exit_codes: Mutex<VecDeque<i32>>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self {
            available: true,
            volumes: Mutex::new(HashSet::new()),
            removed: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            runs: Mutex::new(Vec::new()),
            exit_codes: Mutex::new(VecDeque::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn with_volumes(names: &[&str]) -> Self {
        let fake = Self::new();
        *fake.volumes.lock().unwrap() = names.iter().map(|n| n.to_string()).collect();
        fake
    }

    /// Queue the exit code of the next container run (default 0)
    pub fn push_exit_code(&self, code: i32) {
        self.exit_codes.lock().unwrap().push_back(code);
    }

    pub fn run_log(&self) -> Vec<(ContainerConfig, Vec<String>)> {
        self.runs.lock().unwrap().clone()
    }

    fn next_code(&self) -> i32 {
        self.exit_codes.lock().unwrap().pop_front().unwrap_or(0)
    }
}

impl Default for FakeRuntime {
    fn default() -> Self {
        Self::new()
    }
}

fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn volume_exists(&self, name: &str) -> ForgeResult<bool> {
        Ok(self.volumes.lock().unwrap().contains(name))
    }

    async fn create_volume(
        &self,
        name: &str,
        _labels: &HashMap<String, String>,
    ) -> ForgeResult<()> {
        self.volumes.lock().unwrap().insert(name.to_string());
        self.created.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn remove_volume(&self, name: &str) -> ForgeResult<()> {
        self.volumes.lock().unwrap().remove(name);
        self.removed.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn inspect_volume(&self, name: &str) -> ForgeResult<Option<VolumeInfo>> {
        Ok(self
            .volumes
            .lock()
            .unwrap()
            .contains(name)
            .then(|| VolumeInfo {
                name: name.to_string(),
                created_at: None,
                labels: HashMap::new(),
            }))
    }

    async fn run(&self, config: &ContainerConfig, command: &[String]) -> ForgeResult<Output> {
        self.runs
            .lock()
            .unwrap()
            .push((config.clone(), command.to_vec()));
        let code = self.next_code();
        Ok(Output {
            status: exit_status(code),
            stdout: Vec::new(),
            stderr: if code == 0 {
                Vec::new()
            } else {
                b"fake container failure".to_vec()
            },
        })
    }

    async fn run_interactive(
        &self,
        config: &ContainerConfig,
        command: &[String],
    ) -> ForgeResult<i32> {
        self.runs
            .lock()
            .unwrap()
            .push((config.clone(), command.to_vec()));
        Ok(self.next_code())
    }

    fn runtime_name(&self) -> &'static str {
        "Fake"
    }
}
