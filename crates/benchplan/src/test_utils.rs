//! Shared fixtures for planner tests.

use benchplan_config::Flags;
use serde_yaml::Value;

use crate::context::OsType;
use crate::registry::StaticModuleRegistry;

/// A small registry: a few Linux benchmarks and one Windows benchmark.
pub fn small_registry() -> StaticModuleRegistry {
    StaticModuleRegistry::new()
        .with_module(OsType::Linux, "fio", "Flexible I/O tester")
        .with_module(OsType::Linux, "iperf", "iperf network throughput")
        .with_module(OsType::Linux, "netperf", "netperf")
        .with_module(OsType::Linux, "ping", "ICMP latency")
        .with_module(OsType::Windows, "ntttcp", "NTttcp network throughput")
}

/// Builds a flag map from name/value pairs.
pub fn flags<V: Into<Value> + Clone>(pairs: &[(&str, V)]) -> Flags {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone().into()))
        .collect()
}
