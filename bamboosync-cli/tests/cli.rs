//! Binary-level behaviour that needs no network access.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFIG_VARS: [&str; 4] = [
    "BAMBOO_SUBDOMAIN",
    "BAMBOO_API_KEY",
    "GOOGLE_ADMIN",
    "GOOGLE_CREDENTIALS",
];

fn bamboosync(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bamboosync").expect("binary");
    cmd.env("HOME", home.path()).env("USERPROFILE", home.path());
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_lists_both_subcommands() {
    let home = TempDir::new().expect("home");
    bamboosync(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("sync"));
}

#[test]
fn sync_help_documents_window_flags() {
    let home = TempDir::new().expect("home");
    bamboosync(&home)
        .args(["sync", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--lookback-hours"))
        .stdout(predicate::str::contains("--since"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn missing_configuration_fails_before_any_request() {
    let home = TempDir::new().expect("home");
    bamboosync(&home)
        .arg("sync")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--bamboo-subdomain"))
        .stderr(predicate::str::contains("BAMBOO_SUBDOMAIN"));
}

#[test]
fn unreadable_credentials_fail_update() {
    let home = TempDir::new().expect("home");
    bamboosync(&home)
        .arg("update")
        .env("BAMBOO_SUBDOMAIN", "acme")
        .env("BAMBOO_API_KEY", "key")
        .env("GOOGLE_ADMIN", "admin@acme.com")
        .env("GOOGLE_CREDENTIALS", home.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to set up the Google directory client"));
}

#[test]
fn config_file_with_unknown_key_is_rejected() {
    let home = TempDir::new().expect("home");
    let dir = home.path().join(".bamboosync");
    std::fs::create_dir_all(&dir).expect("mkdir");
    std::fs::write(dir.join("config.yaml"), "bamboo_subdomian: acme\n").expect("write");

    bamboosync(&home)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));
}

#[test]
fn since_and_lookback_conflict() {
    let home = TempDir::new().expect("home");
    bamboosync(&home)
        .args([
            "sync",
            "--since",
            "2026-10-15T00:00:00Z",
            "--lookback-hours",
            "2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
