//! Integration tests for cwforge

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn cwforge() -> Command {
        cargo_bin_cmd!("cwforge")
    }

    #[test]
    fn help_displays() {
        cwforge()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("release builds for CosmWasm"));
    }

    #[test]
    fn version_displays() {
        cwforge()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("cwforge"));
    }

    #[test]
    fn status_always_exits_zero() {
        cwforge()
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("cwforge environment"));
    }

    #[test]
    fn test_runner_without_tests_dir_succeeds() {
        let temp = TempDir::new().unwrap();

        cwforge()
            .arg("--project")
            .arg(temp.path())
            .arg("test")
            .assert()
            .success()
            .stdout(predicate::str::contains("No integration test targets"));
    }

    #[test]
    fn test_runner_with_empty_tests_dir_succeeds() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("tests")).unwrap();

        cwforge()
            .arg("--project")
            .arg(temp.path())
            .arg("test")
            .assert()
            .success();
    }

    #[test]
    fn build_outside_a_project_fails() {
        let temp = TempDir::new().unwrap();

        cwforge()
            .arg("--project")
            .arg(temp.path())
            .arg("build")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not a contract project"));
    }

    #[test]
    fn build_rejects_invalid_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".cwforge.toml"), "not [valid toml").unwrap();

        cwforge()
            .arg("--project")
            .arg(temp.path())
            .arg("build")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn missing_project_path_fails() {
        cwforge()
            .args(["--project", "/definitely/not/a/real/path", "build"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("resolving project path"));
    }
}
