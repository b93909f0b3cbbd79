use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("legendgram").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("legendgram"));
}

#[test]
fn cli_writes_svg() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("map.svg");
    let mut cmd = Command::cargo_bin("legendgram").unwrap();
    cmd.arg("--out")
        .arg(&out)
        .args(["--classes", "5", "--palette", "YlGnBu_5", "--loc", "upper right", "--frame"]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Wrote legendgram"));
    assert!(fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn cli_reads_options_file() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("opts.json");
    fs::write(&cfg, r#"{"bins": 20, "loc": 4, "clip": [0, 80]}"#).unwrap();
    let out = dir.path().join("map.png");
    let mut cmd = Command::cargo_bin("legendgram").unwrap();
    cmd.arg("--out").arg(&out).arg("--config").arg(&cfg);
    cmd.assert().success();
    assert!(fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn cli_rejects_mismatched_palette() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("legendgram").unwrap();
    cmd.arg("--out")
        .arg(dir.path().join("x.svg"))
        .args(["--palette", "Blues_5"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not match number of colors"));
}

#[test]
fn cli_rejects_unknown_location() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("legendgram").unwrap();
    cmd.arg("--out")
        .arg(dir.path().join("x.svg"))
        .args(["--loc", "somewhere"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid legend location"));
}

#[test]
fn cli_falls_back_to_continuous_viridis_for_odd_class_counts() {
    let dir = tempdir().unwrap();
    for k in ["1", "25"] {
        let out = dir.path().join(format!("classes_{k}.svg"));
        let mut cmd = Command::cargo_bin("legendgram").unwrap();
        cmd.arg("--out").arg(&out).args(["--classes", k]);
        cmd.assert().success();
        assert!(fs::metadata(&out).unwrap().len() > 0);
    }
}

#[test]
fn cli_rejects_reversed_clip_from_options_file() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("opts.json");
    fs::write(&cfg, r#"{"clip": [80, 20]}"#).unwrap();
    let mut cmd = Command::cargo_bin("legendgram").unwrap();
    cmd.arg("--out")
        .arg(dir.path().join("x.svg"))
        .arg("--config")
        .arg(&cfg);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("clip must be"));
}
