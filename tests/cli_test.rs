/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary against a throwaway archive
mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use common::realistic_archive;
use predicates::prelude::*;

fn explorer() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_metadata-explorer"));
    cmd.env_remove("METADATA_EXPLORER_CONFIG").env_remove("METADATA_EXPLORER_LOG");
    cmd
}

#[test]
fn test_cli_no_command_shows_help_message() {
    explorer().assert().success().stdout(predicate::str::contains("Use --help for usage information"));
}

#[test]
fn test_cli_help_flag() {
    explorer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Query extracted metadata tables"))
        .stdout(predicate::str::contains("find"))
        .stdout(predicate::str::contains("grab"));
}

#[test]
fn test_cli_missing_config_file() {
    let dir = tempfile::TempDir::new().unwrap();
    explorer()
        .arg("folders")
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_cli_folders() {
    let archive = realistic_archive().with_missing_table("2021/Spring");
    let config = archive.write_config();

    explorer()
        .arg("--config")
        .arg(&config)
        .arg("folders")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok\t2019/Summer"))
        .stdout(predicate::str::contains("missing\t2021/Spring"));
}

#[test]
fn test_cli_find_uses_env_config() {
    let archive = realistic_archive();
    let config = archive.write_config();

    explorer()
        .env("METADATA_EXPLORER_CONFIG", &config)
        .args(["find", "cat", "--field", "Subject"])
        .assert()
        .success()
        .stdout("IMG_0001.jpg\nIMG_0002.jpg\n");
}

#[test]
fn test_cli_find_and_not() {
    let archive = realistic_archive();
    let config = archive.write_config();

    explorer()
        .arg("--config")
        .arg(&config)
        .args(["find", "dog", "--and", "Paris"])
        .assert()
        .success()
        .stdout("IMG_0001.jpg\nIMG_0100.jpg\n");

    explorer()
        .arg("--config")
        .arg(&config)
        .args(["find", "dog", "--not", "snow"])
        .assert()
        .success()
        .stdout("IMG_0001.jpg\n");
}

#[test]
fn test_cli_find_json_with_path() {
    let archive = realistic_archive();
    let config = archive.write_config();

    let output = explorer()
        .arg("--config")
        .arg(&config)
        .args(["find", "snow", "--path", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let found: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(found, vec!["2020/Winter/Café.jpg", "2020/Winter/IMG_0100.jpg"]);
}

#[test]
fn test_cli_grab_csv() {
    let archive = realistic_archive();
    let config = archive.write_config();

    explorer()
        .arg("--config")
        .arg(&config)
        .args(["grab", "--field", "SourceFile", "--field", "CreateDate", "--start", "20200101_000000"])
        .assert()
        .success()
        .stdout("SourceFile,CreateDate\nIMG_0100.jpg,2020:01:15 09:00:00\nCafé.jpg,2020:02:29 10:00:00\n");
}

#[test]
fn test_cli_grab_bad_bound() {
    let archive = realistic_archive();
    let config = archive.write_config();

    explorer()
        .arg("--config")
        .arg(&config)
        .args(["grab", "--start", "2020-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYYMMDD_HHMMSS"));
}

#[test]
fn test_cli_count() {
    let archive = realistic_archive();
    let config = archive.write_config();

    explorer()
        .arg("--config")
        .arg(&config)
        .args(["count", "Subject", "--top", "2"])
        .assert()
        .success()
        .stdout("2\tcat\n2\tdog\n");
}

#[test]
fn test_cli_stats_by_year() {
    let archive = realistic_archive();
    let config = archive.write_config();

    explorer()
        .arg("--config")
        .arg(&config)
        .args(["stats", "--period", "year"])
        .assert()
        .success()
        .stdout("2019\t3\n2020\t2\n");
}

#[test]
fn test_cli_connections() {
    let archive = realistic_archive();
    let config = archive.write_config();

    explorer()
        .arg("--config")
        .arg(&config)
        .args(["connections", "dog", "snow"])
        .assert()
        .success()
        .stdout("\tdog\tsnow\ndog\t0\t1\nsnow\t1\t0\n");
}

#[test]
fn test_cli_missing_table_reports_folder() {
    let archive = realistic_archive().with_missing_table("2021/Spring");
    let config = archive.write_config();

    explorer()
        .arg("--config")
        .arg(&config)
        .args(["find", "cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2021/Spring"))
        .stderr(predicate::str::contains("run extraction"));
}
