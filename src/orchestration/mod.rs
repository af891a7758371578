//! Container runtime orchestration
//!
//! The pipeline talks to Docker through the ContainerRuntime trait so that
//! the stages with container side effects can be unit tested against a fake
//! runtime.

mod container;
mod docker;
mod runtime;

#[cfg(test)]
pub(crate) mod fake;

pub use container::ContainerConfig;
pub use docker::DockerRuntime;
pub use runtime::{ContainerRuntime, VolumeInfo};

/// Max number of output lines quoted in container error messages.
const ERROR_TAIL_LINES: usize = 20;

/// Extract the useful tail of captured container output for diagnostics.
pub(crate) fn output_tail(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stdout.lines().chain(stderr.lines()).collect();
    let start = lines.len().saturating_sub(ERROR_TAIL_LINES);
    lines[start..].join("\n")
}

/// Numeric uid/gid of the invoking process.
///
/// Passed into containers so files written to the mounted source and caches
/// end up owned by the invoking user on the host.
#[cfg(unix)]
pub fn invoking_user() -> (u32, u32) {
    // SAFETY: getuid/getgid have no preconditions and cannot fail
    unsafe { (libc::getuid(), libc::getgid()) }
}

#[cfg(not(unix))]
pub fn invoking_user() -> (u32, u32) {
    (0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::process::{ExitStatus, Output};

    fn output_with(stdout: &str, stderr: &str) -> Output {
        Output {
            status: ExitStatus::from_raw(0),
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    #[test]
    fn output_tail_short() {
        let output = output_with("a\nb", "c");
        assert_eq!(output_tail(&output), "a\nb\nc");
    }

    #[test]
    fn output_tail_truncates() {
        let long: String = (0..50).map(|i| format!("line{i}\n")).collect();
        let output = output_with(&long, "");
        let tail = output_tail(&output);
        assert!(tail.starts_with("line30"));
        assert!(tail.ends_with("line49"));
    }

    #[test]
    fn invoking_user_is_current_process() {
        let (uid, _gid) = invoking_user();
        // Running under any uid is fine; the call must be stable
        assert_eq!(invoking_user().0, uid);
    }
}
