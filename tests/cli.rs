extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn renders_a_pixmap() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mandel.ppm");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", path.to_str().unwrap(), "-s", "32x24", "-i", "100"])
        .args(&["-S", "pool-chunk", "-t", "3", "-c", "7", "-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("32x24 pool-chunk (3 workers, chunks of 7): 2 runs"));
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"P6"));
}

#[test]
fn every_strategy_runs_from_the_command_line() {
    let dir = tempdir().unwrap();
    for strategy in &["sequential", "cell", "row", "counter", "pool-row", "pool-chunk", "pool-cell"] {
        let path = dir.path().join(format!("{}.ppm", strategy));
        Command::cargo_bin("mandel")
            .unwrap()
            .args(&["-o", path.to_str().unwrap(), "-s", "16x12", "-i", "50", "-S", *strategy])
            .assert()
            .success();
        assert!(path.exists());
    }
}

#[test]
fn ascii_output_is_a_plain_pixmap() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plain.ppm");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", path.to_str().unwrap(), "-s", "4x3", "--ascii", "--gray", "--plain"])
        .assert()
        .success();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("P3"));
}

#[test]
fn rejects_zero_threads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never.ppm");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", path.to_str().unwrap(), "-t", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Thread count must be between"));
    assert!(!path.exists());
}

#[test]
fn rejects_an_inverted_region() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never.ppm");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", path.to_str().unwrap(), "-s", "8x8"])
        .args(&["-l", "1.0,1.0", "-r", "-1.0,-1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid complex region"));
}

#[test]
fn rejects_unknown_strategies() {
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", "x.ppm", "-S", "fibers"])
        .assert()
        .failure();
}
