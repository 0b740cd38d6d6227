//! Runs the command line end to end against an in-memory writer.

use std::fs;

use benchplan::PlanError;
use benchplan_cli::{run, Args, CliError};
use clap::Parser;

fn run_to_string(argv: &[&str]) -> Result<String, CliError> {
    let args = Args::parse_from(argv);
    let mut out = Vec::new();
    run(&args, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_json_plan_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user.yaml");
    fs::write(
        &path,
        r#"
flags:
  zone: us-central1-a
fio:
  flag_matrix: depths
  flag_matrix_defs:
    depths:
      io_depth: [1, 8, 32]
  flag_matrix_filters:
    depths: "io_depth >= 8"
"#,
    )
    .unwrap();

    let out = run_to_string(&[
        "benchplan",
        "--benchmarks",
        "ping,(fio,iperf)",
        "--config",
        path.to_str().unwrap(),
        "--format",
        "json",
    ])
    .unwrap();

    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let configs = json["configs"].as_array().unwrap();
    let fio: Vec<_> = configs.iter().filter(|c| c["name"] == "fio").collect();
    assert_eq!(fio.len(), 2);
    assert_eq!(fio[0]["flags"]["io_depth"], 8);
    assert_eq!(fio[1]["flags"]["io_depth"], 32);
    assert_eq!(fio[1]["flags"]["zone"], "us-central1-a");
    assert_eq!(json["groups"][0][0], "ping");
    assert_eq!(json["groups"][1][0], "fio");
}

#[test]
fn test_list_sets_ignores_planning() {
    let out = run_to_string(&["benchplan", "--list-sets", "--benchmarks", "no_such"]).unwrap();
    assert!(out.contains("standard_set"));
}

#[test]
fn test_unknown_benchmark_fails() {
    let err = run_to_string(&["benchplan", "--benchmarks", "no_such_benchmark"]).unwrap_err();
    assert!(matches!(
        err,
        CliError::Plan(PlanError::UnknownBenchmark { ref name, .. }) if name == "no_such_benchmark"
    ));
    assert!(err.to_string().contains("no_such_benchmark"));
}

#[test]
fn test_windows_rejects_linux_only_benchmarks() {
    let err = run_to_string(&["benchplan", "--benchmarks", "iperf", "--os-type", "windows"])
        .unwrap_err();
    assert!(matches!(err, CliError::Plan(PlanError::UnknownBenchmark { .. })));

    let out = run_to_string(&["benchplan", "--benchmarks", "ntttcp", "--os-type", "windows"]).unwrap();
    assert!(out.contains("module=ntttcp"));
}
