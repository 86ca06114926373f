//! Integration tests for the remedy binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A project with a manifest and git, plus any extra files given.
fn setup_project(manifest: &str, files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(".git")).unwrap();
    fs::write(temp.path().join("package.json"), manifest).unwrap();
    for (path, content) in files {
        let path = temp.path().join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    temp
}

fn remedy(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("remedy"));
    cmd.current_dir(temp.path())
        .arg("--non-interactive")
        .env("HOME", temp.path())
        .env_remove("RUST_LOG")
        .env_remove("REMEDY_CONCURRENCY");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("remedy"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Ionic and Angular"))
        .stdout(predicate::str::contains("doctor"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("remedy"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn check_healthy_project_succeeds() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(r#"{"name": "app"}"#, &[("package-lock.json", "{}")]);
    remedy(&temp)
        .args(["doctor", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues detected"));
    Ok(())
}

#[test]
fn no_args_runs_check() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(r#"{"name": "app"}"#, &[("package-lock.json", "{}")]);
    remedy(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues detected"));
    Ok(())
}

#[test]
fn check_reports_issues_with_exit_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(r#"{"name": "app"}"#, &[]);
    remedy(&temp)
        .args(["doctor", "check"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing-lockfile"));
    Ok(())
}

#[test]
fn ignored_ailment_is_not_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(
        r#"{"name": "app"}"#,
        &[(".remedy/config.yml", "ignore: [missing-lockfile]\n")],
    );
    remedy(&temp)
        .args(["doctor", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("missing-lockfile").not());
    Ok(())
}

#[test]
fn treat_unknown_id_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(r#"{"name": "app"}"#, &[]);
    remedy(&temp)
        .args(["doctor", "treat", "no-such-ailment"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown ailment: no-such-ailment"));
    Ok(())
}

#[test]
fn treat_removes_default_build_script() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(
        r#"{
  "name": "app",
  "dependencies": {"ionic-angular": "3.9.2"},
  "scripts": {"build": "ionic-app-scripts build", "start": "ionic serve"}
}"#,
        &[("package-lock.json", "{}")],
    );

    remedy(&temp)
        .args(["doctor", "treat", "ionic-angular-default-build-script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("resolved"));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("package.json"))?)?;
    assert!(manifest["scripts"].get("build").is_none());
    assert_eq!(manifest["scripts"]["start"], "ionic serve");
    Ok(())
}

#[test]
fn list_shows_archetype_ailments() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(
        r#"{"dependencies": {"@ionic/angular": "^4.0.0"}}"#,
        &[],
    );
    remedy(&temp)
        .args(["doctor", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("angular-missing-build-devkit"))
        .stdout(predicate::str::contains("git-not-used"))
        .stdout(predicate::str::contains("ionic1-missing-lib").not());
    Ok(())
}

#[test]
fn info_prints_environment() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(r#"{"name": "app"}"#, &[]);
    remedy(&temp)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("System"))
        .stdout(predicate::str::contains("Project type"));
    Ok(())
}

#[test]
fn logout_without_session() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(r#"{"name": "app"}"#, &[]);
    remedy(&temp)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("already logged out"));
    Ok(())
}

#[test]
fn logout_removes_session() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(
        r#"{"name": "app"}"#,
        &[(
            ".remedy/session.json",
            r#"{"user": "dev@example.com", "token": "t", "created_at": "2024-01-01T00:00:00Z"}"#,
        )],
    );
    remedy(&temp)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("logged out"));
    assert!(!temp.path().join(".remedy/session.json").exists());
    Ok(())
}

#[test]
fn completions_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("remedy"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("remedy"));
    Ok(())
}

#[test]
fn zero_concurrency_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("remedy"));
    cmd.args(["--concurrency", "0", "doctor", "check"]);
    cmd.assert().failure();
    Ok(())
}

#[test]
fn unreadable_project_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("remedy"));
    cmd.arg("--non-interactive")
        .arg("--project")
        .arg(temp.path().join("missing"))
        .args(["doctor", "check"]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("not readable"));
    Ok(())
}

#[test]
fn malformed_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(
        r#"{"name": "app"}"#,
        &[(".remedy/config.yml", "concurrency: [1\n")],
    );
    remedy(&temp)
        .args(["doctor", "check"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}
