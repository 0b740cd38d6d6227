//! Benchmark-module registry seam.
//!
//! The planner never executes anything; it only needs to know whether a
//! benchmark name maps to a module on the target OS. [`StaticModuleRegistry`]
//! is the in-memory implementation shipped with the crate.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::context::OsType;

/// Reference to an executable benchmark definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BenchmarkModule {
    name: Arc<str>,
    description: Arc<str>,
}

impl BenchmarkModule {
    pub fn new(name: impl Into<Arc<str>>, description: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Maps a benchmark name to its module for a given OS.
pub trait ModuleRegistry {
    fn lookup(&self, os_type: OsType, name: &str) -> Option<BenchmarkModule>;
}

/// Per-OS tables of benchmark modules.
#[derive(Debug, Clone, Default)]
pub struct StaticModuleRegistry {
    tables: HashMap<OsType, BTreeMap<String, BenchmarkModule>>,
}

impl StaticModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module under `name` for `os_type`.
    pub fn with_module(
        mut self,
        os_type: OsType,
        name: &str,
        description: impl Into<Arc<str>>,
    ) -> Self {
        self.register(os_type, BenchmarkModule::new(name, description));
        self
    }

    pub fn register(&mut self, os_type: OsType, module: BenchmarkModule) {
        self.tables
            .entry(os_type)
            .or_default()
            .insert(module.name().to_string(), module);
    }

    /// Returns the module names registered for `os_type`, sorted.
    pub fn names(&self, os_type: OsType) -> Vec<&str> {
        self.tables
            .get(&os_type)
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Registry containing every benchmark the built-in sets reference.
    ///
    /// # Example
    ///
    /// ```
    /// use benchplan::{ModuleRegistry, OsType, StaticModuleRegistry};
    ///
    /// let registry = StaticModuleRegistry::builtin();
    /// assert!(registry.lookup(OsType::Linux, "fio").is_some());
    /// assert!(registry.lookup(OsType::Windows, "ntttcp").is_some());
    /// assert!(registry.lookup(OsType::Windows, "cassandra_stress").is_none());
    /// ```
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for &(name, description) in LINUX_BENCHMARKS {
            registry.register(OsType::Linux, BenchmarkModule::new(name, description));
        }
        for &(name, description) in WINDOWS_BENCHMARKS {
            registry.register(OsType::Windows, BenchmarkModule::new(name, description));
        }
        registry
    }
}

impl ModuleRegistry for StaticModuleRegistry {
    fn lookup(&self, os_type: OsType, name: &str) -> Option<BenchmarkModule> {
        self.tables.get(&os_type)?.get(name).cloned()
    }
}

const LINUX_BENCHMARKS: &[(&str, &str)] = &[
    ("aerospike", "Aerospike key-value store throughput"),
    ("aerospike_ycsb", "YCSB against Aerospike"),
    ("block_storage_workload", "Block storage database, streaming and logging workloads"),
    ("cassandra_stress", "Cassandra stress tool"),
    ("cassandra_ycsb", "YCSB against Cassandra"),
    ("cloudsuite_data_analytics", "CloudSuite data analytics"),
    ("cloudsuite_data_caching", "CloudSuite data caching"),
    ("cloudsuite_graph_analytics", "CloudSuite graph analytics"),
    ("cloudsuite_in_memory_analytics", "CloudSuite in-memory analytics"),
    ("cloudsuite_media_streaming", "CloudSuite media streaming"),
    ("cloudsuite_web_search", "CloudSuite web search"),
    ("cloudsuite_web_serving", "CloudSuite web serving"),
    ("cluster_boot", "Time to boot a cluster of VMs"),
    ("copy_throughput", "Copy throughput between disks and VMs"),
    ("coremark", "EEMBC CoreMark processor benchmark"),
    ("fio", "Flexible I/O tester"),
    ("gpu_pcie_bandwidth", "GPU PCIe bandwidth"),
    ("hadoop_terasort", "Hadoop TeraSort"),
    ("hpcc", "HPC Challenge"),
    ("iperf", "iperf network throughput"),
    ("mesh_network", "Full-mesh network throughput"),
    ("mongodb_ycsb", "YCSB against MongoDB"),
    ("multichase", "Memory latency and bandwidth"),
    ("netperf", "netperf network throughput and latency"),
    ("object_storage_service", "Object storage upload and download"),
    ("oldisim", "OLDIsim scale-out workload"),
    ("ping", "ICMP round trip latency"),
    ("redis", "Redis benchmark"),
    ("redis_ycsb", "YCSB against Redis"),
    ("silo", "Silo in-memory database"),
    ("speccpu2006", "SPEC CPU2006"),
    ("sysbench_oltp", "sysbench OLTP against a database"),
    ("tomcat_wrk", "wrk against Apache Tomcat"),
    ("unixbench", "UnixBench system benchmark"),
];

const WINDOWS_BENCHMARKS: &[(&str, &str)] = &[
    ("diskspd", "DiskSpd storage benchmark"),
    ("fio", "Flexible I/O tester"),
    ("iperf3", "iperf3 network throughput"),
    ("ntttcp", "NTttcp network throughput"),
    ("psping", "PsPing network latency"),
];
