//! Rendering of plans and benchmark sets.

use std::io::{self, Write};

use benchplan::{BenchmarkPlan, OsType, ParallelGroups, SetRegistry};
use benchplan_config::Flags;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_yaml::Value;

#[derive(Serialize)]
struct PlanView<'a> {
    os_type: OsType,
    configs: Vec<ConfigView<'a>>,
    groups: Option<&'a ParallelGroups>,
}

#[derive(Serialize)]
struct ConfigView<'a> {
    name: &'a str,
    variant: usize,
    module: &'a str,
    flags: &'a Flags,
}

fn view(plan: &BenchmarkPlan, os_type: OsType) -> PlanView<'_> {
    PlanView {
        os_type,
        configs: plan
            .configs
            .iter()
            .map(|(key, config)| ConfigView {
                name: &key.name,
                variant: key.variant,
                module: config.module.name(),
                flags: &config.flags,
            })
            .collect(),
        groups: plan.groups.as_ref(),
    }
}

/// Writes the plan as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, plan: &BenchmarkPlan, os_type: OsType) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &view(plan, os_type))?;
    writeln!(out).map_err(serde_json::Error::io)
}

/// Writes a human-readable plan.
pub fn write_text<W: Write>(out: &mut W, plan: &BenchmarkPlan, os_type: OsType) -> io::Result<()> {
    writeln!(
        out,
        "{} ({os_type}): {} configuration(s)",
        "Benchmark plan".bold(),
        plan.len()
    )?;
    for (key, config) in &plan.configs {
        let flags = config
            .flags
            .iter()
            .map(|(name, value)| format!("{name}={}", display_value(value)))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "  {}[{}]  module={}  {}",
            key.name.cyan(),
            key.variant,
            config.module.name(),
            flags.dimmed()
        )?;
    }

    match &plan.groups {
        None => writeln!(out, "Execution: sequential")?,
        Some(groups) => {
            writeln!(out, "Execution groups:")?;
            for (i, group) in groups.iter().enumerate() {
                let mode = if group.len() > 1 { "parallel" } else { "sequential" };
                writeln!(out, "  {}. {} ({mode})", i + 1, group.join(", "))?;
            }
        }
    }
    Ok(())
}

/// Writes every benchmark set with its description and members.
pub fn write_sets<W: Write>(out: &mut W, sets: &SetRegistry) -> io::Result<()> {
    for set in sets.iter() {
        writeln!(out, "{}: {}", set.name.bold(), set.description)?;
        writeln!(out, "    {}", set.members.join(", "))?;
    }
    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchplan::{Planner, StaticModuleRegistry};
    use benchplan_config::UserConfig;

    fn sample_plan() -> BenchmarkPlan {
        let registry = StaticModuleRegistry::builtin();
        let user_config = UserConfig::new()
            .with_flag("zone", "us-east1-b")
            .with_flag("num_vms", 2);
        Planner::new(&registry)
            .plan(&["ping", "(fio", "iperf)"], &user_config)
            .unwrap()
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_json(&mut out, &sample_plan(), OsType::Linux).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["os_type"], "linux");
        assert_eq!(json["configs"].as_array().unwrap().len(), 3);
        assert_eq!(json["configs"][0]["name"], "fio");
        assert_eq!(json["configs"][0]["flags"]["num_vms"], 2);
        assert_eq!(json["groups"][1][1], "iperf");
    }

    #[test]
    fn test_text_output() {
        let mut out = Vec::new();
        write_text(&mut out, &sample_plan(), OsType::Linux).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("3 configuration(s)"));
        assert!(text.contains("module=iperf"));
        assert!(text.contains("zone=us-east1-b"));
        assert!(text.contains("1. ping (sequential)"));
        assert!(text.contains("2. fio, iperf (parallel)"));
    }

    #[test]
    fn test_sets_output() {
        let mut out = Vec::new();
        write_sets(&mut out, &SetRegistry::builtin()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("cloudharmony_set"));
        assert!(text.contains("speccpu2006, unixbench"));
    }
}
