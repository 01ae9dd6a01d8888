//! Integration tests for the relia CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A relia command isolated from the caller's config, environment and cwd
fn relia(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("relia").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RELIA_SCENARIO")
        .env_remove("RELIA_OUTPUT_DIR")
        .env_remove("RELIA_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

const BEARING_SCENARIO: &str = r#"
title: Bearing study
models:
  - label: Bearing
    distribution: { family: gamma, k: 2, theta: 100 }
time_grid: { start: 0, end: 1000, points: 11 }
percentile_grid: { start: 0, end: 100, step: 25 }
"#;

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("percentile"))
        .stdout(predicate::str::contains("plot"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("relia"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("relia"));
}

// ============================================================================
// Summary Tests
// ============================================================================

#[test]
fn test_summary_default_scenario() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Uniform U(100, 5000)"))
        .stdout(predicate::str::contains("2550"))
        .stdout(predicate::str::contains("2000833.3333"))
        .stdout(predicate::str::contains("33800"));
}

#[test]
fn test_summary_csv() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(relia(tmp.path()).args(["summary", "-f", "csv"]));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "model,distribution,mean,variance,stddev");
    assert!(lines[2].ends_with(",500,10000,100"), "{}", lines[2]);
    assert!(lines[3].contains(",520,33800,"), "{}", lines[3]);
}

#[test]
fn test_summary_json() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(relia(tmp.path()).args(["summary", "--format", "json"]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let models = json.as_array().unwrap();
    assert_eq!(models.len(), 3);
    assert_eq!(models[0]["mean"], 2550.0);
    assert_eq!(models[2]["family"], "gamma");
    assert_eq!(models[2]["variance"], 33800.0);
}

#[test]
fn test_format_from_environment() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .env("RELIA_FORMAT", "tsv")
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("model\tdistribution\tmean"));
}

// ============================================================================
// Curve and Percentile Tests
// ============================================================================

#[test]
fn test_percentile_csv() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(relia(tmp.path()).args(["percentile", "-f", "csv"]));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 12);
    assert!(lines[0].starts_with("gamma,"));
    assert_eq!(lines[1], "0,100,-inf,0");
    assert!(lines[6].starts_with("50,2550,500,"), "{}", lines[6]);
    assert_eq!(lines[11], "100,5000,inf,inf");
}

#[test]
fn test_percentile_explicit_levels_for_one_model() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(relia(tmp.path()).args([
        "percentile", "--model", "uniform", "-g", "25", "-g", "50", "-f", "csv",
    ]));
    assert_eq!(out, "gamma,\"Uniform U(100, 5000)\"\n25,1325\n50,2550\n");
}

#[test]
fn test_percentile_out_of_range_fails() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .args(["percentile", "--gamma", "120"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the valid domain"));
}

#[test]
fn test_percentile_json_edges_are_null() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(relia(tmp.path()).args(["percentile", "-f", "json"]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let normal = &json[1];
    assert_eq!(normal["quantity"], "percentile");
    assert!(normal["points"][0]["y"].is_null());
    assert_eq!(normal["points"][5]["y"], 500.0);
}

#[test]
fn test_curve_hazard_leaves_gaps() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(relia(tmp.path()).args(["curve", "hazard", "-f", "csv"]));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1001);
    assert!(lines[1].starts_with("0,0,"), "{}", lines[1]);
    // Only the uniform population dies out; normal and gamma keep a failure rate
    let last: Vec<&str> = lines[1000].split(',').collect();
    assert_eq!(last[0], "6000");
    assert_eq!(last[1], "");
    let normal: f64 = last[2].parse().unwrap();
    assert!((normal - 0.55).abs() < 1e-3, "{}", lines[1000]);
    assert!(!last[3].is_empty(), "{}", lines[1000]);
}

#[test]
fn test_curve_reliability_single_model() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(relia(tmp.path()).args(["curve", "reliability", "-m", "normal", "-f", "tsv"]));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "t\tNormal N(500, 10000)");
    assert!(lines[1].starts_with("0\t0.99999"), "{}", lines[1]);
    assert!(lines[1000].starts_with("6000\t0"), "{}", lines[1000]);
}

#[test]
fn test_curve_rejects_percentile() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .args(["curve", "percentile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not sampled over the time grid"));
}

#[test]
fn test_curve_unknown_model_fails() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .args(["curve", "density", "--model", "weibull"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no model matches"));
}

// ============================================================================
// Eval Tests
// ============================================================================

#[test]
fn test_eval_normal_at_mean() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .args(["eval", "normal:500,100", "--at", "500", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t,reliability,density,hazard"))
        .stdout(predicate::str::contains("500,0.5,"));
}

#[test]
fn test_eval_uniform_edges() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(relia(tmp.path()).args([
        "eval",
        "uniform:100,5000",
        "--at",
        "100",
        "--gamma",
        "50",
        "-f",
        "json",
    ]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["mean"], 2550.0);
    assert_eq!(json["points"][0]["reliability"], 1.0);
    assert_eq!(json["percentiles"][0]["t"], 2550.0);
}

#[test]
fn test_eval_scenario_model_by_family() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .args(["eval", "gamma"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gamma Γ(8, 65)"))
        .stdout(predicate::str::contains("520"));
}

#[test]
fn test_eval_hazard_division_by_zero() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .args(["eval", "uniform:100,5000", "--at", "6000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("division by zero"));
}

#[test]
fn test_eval_hazard_in_normal_far_tail() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(relia(tmp.path()).args(["eval", "normal:500,100", "--at", "4500", "-f", "json"]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let point = &json["points"][0];
    assert_eq!(point["reliability"], 0.0);
    let hazard = point["hazard"].as_f64().unwrap();
    assert!((hazard - 0.4).abs() < 1e-3, "hazard = {hazard}");
}

#[test]
fn test_eval_invalid_parameters() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .args(["eval", "normal:500,0", "--at", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid normal parameter"));
}

#[test]
fn test_eval_unknown_family() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .args(["eval", "weibull:1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("weibull"));
}

// ============================================================================
// Scenario File Tests
// ============================================================================

#[test]
fn test_init_creates_template() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created scenario file"));

    let content = fs::read_to_string(tmp.path().join("relia.yaml")).unwrap();
    assert!(content.contains("family: uniform"));
    assert!(content.contains("percentile_grid:"));

    // The template describes the built-in scenario
    let out = stdout_of(relia(tmp.path()).args(["summary", "-f", "csv"]));
    assert!(out.contains(",2550,"));
}

#[test]
fn test_init_quiet() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .args(["init", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(tmp.path().join("relia.yaml").exists());
}

#[test]
fn test_init_refuses_to_overwrite() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path()).arg("init").assert().success();
    relia(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    relia(tmp.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn test_local_scenario_file_is_used() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("relia.yaml"), BEARING_SCENARIO).unwrap();

    let out = stdout_of(relia(tmp.path()).args(["summary", "-f", "csv"]));
    assert!(out.contains("Bearing,\"Γ(2, 100)\",200,20000,"), "{out}");

    let out = stdout_of(relia(tmp.path()).args(["percentile", "-f", "csv"]));
    assert_eq!(out.lines().count(), 6);
}

#[test]
fn test_scenario_flag_and_env() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bearing.yaml");
    fs::write(&path, BEARING_SCENARIO).unwrap();

    relia(tmp.path())
        .args(["summary", "--scenario"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bearing"));

    relia(tmp.path())
        .env("RELIA_SCENARIO", &path)
        .args(["curve", "density", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("t,Bearing\n"));
}

#[test]
fn test_invalid_scenario_reports_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("relia.yaml"),
        "models:\n  - label: bad\n    distribution: { family: gamma, k: -1, theta: 65 }\n",
    )
    .unwrap();

    relia(tmp.path())
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("gamma"));
}

// ============================================================================
// Chart Tests
// ============================================================================

#[test]
fn test_plot_writes_four_charts() {
    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("out");
    relia(tmp.path())
        .args(["plot", "--output"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 4 charts"));

    for stem in ["reliability", "hazard", "density", "percentile"] {
        let svg = fs::read_to_string(out_dir.join(format!("{stem}.svg"))).unwrap();
        assert!(svg.starts_with("<svg"), "{stem}.svg");
        assert!(svg.contains("Gamma Γ(8, 65)"), "{stem}.svg");
    }
}

#[test]
fn test_plot_rejects_tiny_canvas() {
    let tmp = TempDir::new().unwrap();
    relia(tmp.path())
        .args(["plot", "--width", "50", "--height", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too small"));
}

#[test]
fn test_run_prints_summary_and_writes_charts() {
    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("figures");
    relia(tmp.path())
        .env("RELIA_OUTPUT_DIR", &out_dir)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("2000833.3333"));

    assert!(out_dir.join("hazard.svg").exists());
}

#[test]
fn test_run_without_charts() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(relia(tmp.path()).args(["run", "--no-charts", "-f", "json"]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["summaries"].as_array().unwrap().len(), 3);
    assert!(json["charts"].as_array().unwrap().is_empty());
    assert!(!tmp.path().join("charts").exists());
}
