#![cfg(feature = "cli")]

use assert_cmd::Command;
use perfect_circle::io::ScoreReport;
use perfect_circle::session::{JsonFileStore, ScoreStats};
use perfect_circle::Tier;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("perfect-circle").expect("binary");
    cmd.env_remove("PERFECT_CIRCLE_LOG");
    cmd
}

#[test]
fn synth_then_score_writes_report_and_stats() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stroke = dir.path().join("stroke.json");
    let stats = dir.path().join("stats.json");
    let report = dir.path().join("report.json");

    cli()
        .arg("synth")
        .arg(&stroke)
        .args(["--points", "120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 120 samples"));

    cli()
        .arg("score")
        .arg(&stroke)
        .arg("--stats")
        .arg(&stats)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("PERFECT!!"))
        .stdout(predicate::str::contains("100.0%"))
        .stdout(predicate::str::contains("new best!"));

    let parsed = ScoreReport::load_json(&report).expect("report");
    assert_eq!(parsed.num_samples, 120);
    assert_eq!(parsed.tier_label.as_deref(), Some("PERFECT!!"));
    assert!(parsed.error.is_none());

    let career = ScoreStats::load(&JsonFileStore::open(&stats).expect("store")).expect("load");
    assert_eq!(career.counts.get(Tier::PerfectPlus), 1);
}

#[test]
fn short_stroke_reports_no_score() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stroke = dir.path().join("tap.json");
    std::fs::write(&stroke, "[[1, 1], [2, 2], [3, 1]]").expect("write");

    cli()
        .arg("score")
        .arg(&stroke)
        .assert()
        .success()
        .stdout(predicate::str::contains("no score"));
}

#[test]
fn missing_stroke_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    cli()
        .arg("score")
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure();
}

#[test]
fn config_switches_policy() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stroke = dir.path().join("arc.json");
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{"fit": "weighted_centroid", "policy": "start_end"}"#)
        .expect("write config");

    cli()
        .args(["synth", "--sweep", "200"])
        .arg(&stroke)
        .assert()
        .success();

    cli()
        .arg("score")
        .arg(&stroke)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("start-end:"));
}

#[test]
fn stats_reset_zeroes_counters() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stats = dir.path().join("stats.json");
    std::fs::write(&stats, r#"{"count_great": "3", "best_accuracy": "0.88"}"#).expect("write");

    cli()
        .arg("stats")
        .arg(&stats)
        .assert()
        .success()
        .stdout(predicate::str::contains("GREAT!"))
        .stdout(predicate::str::contains("88.0%"));

    cli().arg("stats").arg(&stats).arg("--reset").assert().success();

    let career = ScoreStats::load(&JsonFileStore::open(&stats).expect("store")).expect("load");
    assert_eq!(career, ScoreStats::default());
}

#[cfg(not(feature = "tracing"))]
#[test]
fn verbose_flag_enables_debug_logging() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stroke = dir.path().join("stroke.json");
    cli().arg("synth").arg(&stroke).assert().success();

    cli()
        .arg("--verbose")
        .arg("score")
        .arg(&stroke)
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"))
        .stderr(predicate::str::contains("least-squares fit"));

    cli()
        .arg("score")
        .arg(&stroke)
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG").not());
}
