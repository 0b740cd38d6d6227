//! End-to-end planning from a YAML user document.

use benchplan::{
    ConfigKey, OsType, PlanError, Planner, ResolutionContext, StaticModuleRegistry,
};
use benchplan_config::UserConfig;

const USER_CONFIG: &str = r#"
flags:
  zone: us-central1-a
  machine_type: n1-standard-2

fio:
  flag_matrix: disks
  flag_matrix_defs:
    disks:
      disk_type: [pd-standard, pd-ssd]
      disk_size: [100, 500]
  flag_matrix_filters:
    disks: "disk_type == 'pd-ssd' or disk_size == 500"
  io_depth: 16

netperf_rr:
  name: netperf
  netperf_benchmarks: TCP_RR

broken_alias:
  name: does_not_exist
"#;

fn planner(registry: &StaticModuleRegistry) -> Planner<'_, StaticModuleRegistry> {
    Planner::new(registry).with_context(ResolutionContext::new().with_explicit_benchmarks(true))
}

#[test]
fn test_plans_sets_aliases_matrices_and_groups() {
    let user_config = UserConfig::from_yaml_str(USER_CONFIG).unwrap();
    let registry = StaticModuleRegistry::builtin();

    let plan = planner(&registry)
        .plan(&["cloudharmony_set", "(fio", "netperf_rr)"], &user_config)
        .unwrap();

    let labels: Vec<&str> = plan.labels().into_iter().collect();
    assert_eq!(labels, vec!["fio", "netperf_rr", "speccpu2006", "unixbench"]);

    // pd-standard/100 is filtered out
    let fio: Vec<(String, i64)> = plan
        .configs
        .iter()
        .filter(|(key, _)| key.name == "fio")
        .map(|(_, config)| {
            (
                config.flags["disk_type"].as_str().unwrap().to_string(),
                config.flags["disk_size"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        fio,
        vec![
            ("pd-standard".to_string(), 500),
            ("pd-ssd".to_string(), 100),
            ("pd-ssd".to_string(), 500),
        ]
    );

    let netperf = &plan.configs[&ConfigKey::new("netperf_rr", 0)];
    assert_eq!(netperf.module.name(), "netperf");
    assert_eq!(netperf.flags["netperf_benchmarks"], "TCP_RR");
    assert_eq!(netperf.flags["zone"], "us-central1-a");

    assert_eq!(
        plan.groups,
        Some(vec![
            vec!["cloudharmony_set".to_string()],
            vec!["fio".to_string(), "netperf_rr".to_string()],
        ])
    );
}

#[test]
fn test_global_flag_matrix_overrides_selector() {
    let user_config = UserConfig::from_yaml_str(
        r#"
        fio:
          flag_matrix: small
          flag_matrix_defs:
            small:
              num_jobs: [1]
            large:
              num_jobs: [8, 16]
        "#,
    )
    .unwrap();
    let registry = StaticModuleRegistry::builtin();
    let ctx = ResolutionContext::new()
        .with_explicit_benchmarks(true)
        .with_flag_matrix("large");

    let plan = Planner::new(&registry)
        .with_context(ctx)
        .plan(&["fio"], &user_config)
        .unwrap();
    let jobs: Vec<i64> = plan
        .configs
        .values()
        .map(|config| config.flags["num_jobs"].as_i64().unwrap())
        .collect();
    assert_eq!(jobs, vec![8, 16]);
}

#[test]
fn test_unknown_alias_is_reported_by_module_name() {
    let user_config = UserConfig::from_yaml_str(USER_CONFIG).unwrap();
    let registry = StaticModuleRegistry::builtin();

    let err = planner(&registry)
        .plan(&["broken_alias"], &user_config)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Benchmark \"does_not_exist\" not valid on os_type \"linux\""
    );
}

#[test]
fn test_windows_plans_use_windows_modules() {
    let registry = StaticModuleRegistry::builtin();
    let planner = Planner::new(&registry).with_context(
        ResolutionContext::new()
            .with_os_type(OsType::Windows)
            .with_explicit_benchmarks(true),
    );

    let plan = planner.plan(&["ntttcp", "psping"], &UserConfig::new()).unwrap();
    assert_eq!(plan.len(), 2);

    let err = planner.plan(&[benchplan::STANDARD_SET], &UserConfig::new()).unwrap_err();
    assert!(matches!(err, PlanError::UnknownBenchmark { os_type: OsType::Windows, .. }));
}

#[test]
fn test_nested_group_is_rejected() {
    let registry = StaticModuleRegistry::builtin();
    let err = planner(&registry)
        .plan(&["(fio", "(ping)"], &UserConfig::new())
        .unwrap_err();
    assert!(matches!(err, PlanError::NestedGroup(ref token) if token == "(ping)"));
}
