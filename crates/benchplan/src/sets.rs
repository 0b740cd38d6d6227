//! Benchmark set registry.
//!
//! A benchmark set is a named, reusable list of members. A member is either a
//! concrete benchmark name or the name of another set.

/// Set planned when the request names no benchmarks at all.
pub const STANDARD_SET: &str = "standard_set";

/// A named group of benchmarks and nested sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkSet {
    pub name: &'static str,
    pub description: &'static str,
    pub members: &'static [&'static str],
}

/// Read-only lookup over a table of benchmark sets.
///
/// # Example
///
/// ```
/// use benchplan::{SetRegistry, STANDARD_SET};
///
/// let sets = SetRegistry::builtin();
/// let standard = sets.lookup(STANDARD_SET).unwrap();
/// assert!(standard.members.contains(&"fio"));
/// assert!(sets.lookup("fio").is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SetRegistry {
    sets: &'static [BenchmarkSet],
}

impl SetRegistry {
    /// Creates a registry over a custom table.
    pub const fn new(sets: &'static [BenchmarkSet]) -> Self {
        Self { sets }
    }

    /// The table shipped with benchplan.
    pub const fn builtin() -> Self {
        Self::new(BENCHMARK_SETS)
    }

    pub fn lookup(&self, name: &str) -> Option<&'static BenchmarkSet> {
        self.sets.iter().find(|set| set.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static BenchmarkSet> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl Default for SetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Built-in benchmark sets.
pub const BENCHMARK_SETS: &[BenchmarkSet] = &[
    BenchmarkSet {
        name: STANDARD_SET,
        description:
            "The standard_set is a community agreed upon set of benchmarks to measure Cloud performance.",
        members: &[
            "aerospike", "block_storage_workload", "cassandra_stress", "cluster_boot",
            "copy_throughput", "coremark", "fio", "hadoop_terasort", "hpcc", "iperf",
            "mesh_network", "mongodb_ycsb", "netperf", "object_storage_service", "ping", "redis",
            "speccpu2006", "sysbench_oltp", "unixbench",
        ],
    },
    BenchmarkSet {
        name: "arm_set",
        description: "ARM benchmark set.",
        members: &[STANDARD_SET],
    },
    BenchmarkSet {
        name: "alicloud_set",
        description: "AliCloud benchmark set.",
        members: &[STANDARD_SET],
    },
    BenchmarkSet {
        name: "broadcom_set",
        description: "Broadcom benchmark set.",
        members: &[STANDARD_SET],
    },
    BenchmarkSet {
        name: "canonical_set",
        description: "Canonical benchmark set.",
        members: &[STANDARD_SET],
    },
    BenchmarkSet {
        name: "centurylinkcloud_set",
        description: "This benchmark set is supported on CenturyLink Cloud.",
        members: &[
            "hpcc", "unixbench", "sysbench_oltp", "mongodb_ycsb", "mesh_network", "ping", "iperf",
            "redis", "cassandra_stress", "copy_throughput",
        ],
    },
    BenchmarkSet {
        name: "cisco_set",
        description: "Cisco benchmark set.",
        members: &[STANDARD_SET],
    },
    BenchmarkSet {
        name: "cloudharmony_set",
        description: "CloudHarmony benchmark set.",
        members: &["speccpu2006", "unixbench"],
    },
    BenchmarkSet {
        name: "cloudspectator_set",
        description: "CloudSpectator benchmark set.",
        members: &[STANDARD_SET],
    },
    BenchmarkSet {
        name: "google_set",
        description: "This benchmark set is maintained by Google Cloud Platform Performance Team.",
        members: &[
            "aerospike_ycsb", "block_storage_workload", "cassandra_stress", "cassandra_ycsb",
            "cluster_boot", "copy_throughput", "fio", "gpu_pcie_bandwidth", "hadoop_terasort",
            "hpcc", "iperf", "multichase", "mesh_network", "mongodb_ycsb", "netperf",
            "object_storage_service", "oldisim", "ping", "redis_ycsb", "speccpu2006",
            "sysbench_oltp", "tomcat_wrk", "unixbench",
        ],
    },
    BenchmarkSet {
        name: "intel_set",
        description: "Intel benchmark set.",
        members: &[
            "fio", "iperf", "unixbench", "hpcc", "cluster_boot", "redis", "cassandra_stress",
            "object_storage_service", "sysbench_oltp",
        ],
    },
    BenchmarkSet {
        name: "kubernetes_set",
        description: "Kubernetes benchmark set.",
        members: &[
            "block_storage_workload", "cassandra_ycsb", "cassandra_stress", "cluster_boot", "fio",
            "iperf", "mesh_network", "mongodb_ycsb", "netperf", "redis", "sysbench_oltp",
        ],
    },
    BenchmarkSet {
        name: "mellanox_set",
        description: "Mellanox benchmark set.",
        members: &[STANDARD_SET],
    },
    BenchmarkSet {
        name: "microsoft_set",
        description: "Microsoft benchmark set.",
        members: &[STANDARD_SET],
    },
    BenchmarkSet {
        name: "qualcomm_technologies_set",
        description: "Qualcomm Technologies, Inc. benchmark set.",
        members: &[STANDARD_SET],
    },
    BenchmarkSet {
        name: "rackspace_set",
        description: "Rackspace benchmark set.",
        members: &[
            "aerospike", "cassandra_stress", "cluster_boot", "copy_throughput", "fio", "hpcc",
            "iperf", "mesh_network", "mongodb_ycsb", "netperf", "ping", "redis",
            "block_storage_workload", "sysbench_oltp", "unixbench", "oldisim", "silo",
        ],
    },
    BenchmarkSet {
        name: "red_hat_set",
        description: "Red Hat benchmark set.",
        members: &[STANDARD_SET],
    },
    BenchmarkSet {
        name: "tradeworx_set",
        description: "Tradeworx Inc. benchmark set.",
        members: &[STANDARD_SET],
    },
    BenchmarkSet {
        name: "thesys_technologies_set",
        description: "Thesys Technologies LLC. benchmark set.",
        members: &[STANDARD_SET],
    },
    BenchmarkSet {
        name: "stanford_set",
        description: "Stanford University benchmark set.",
        members: &[STANDARD_SET, "oldisim"],
    },
    BenchmarkSet {
        name: "mit_set",
        description: "Massachusetts Institute of Technology benchmark set.",
        members: &[STANDARD_SET, "silo"],
    },
    BenchmarkSet {
        name: "cloudsuite_set",
        description: "CloudSuite benchmark set.",
        members: &[
            "cloudsuite_data_analytics", "cloudsuite_data_caching", "cloudsuite_graph_analytics",
            "cloudsuite_in_memory_analytics", "cloudsuite_media_streaming", "cloudsuite_web_search",
            "cloudsuite_web_serving",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_names_are_unique() {
        let sets = SetRegistry::builtin();
        for (i, set) in sets.iter().enumerate() {
            assert!(
                sets.iter().skip(i + 1).all(|other| other.name != set.name),
                "duplicate set {}",
                set.name
            );
        }
    }

    #[test]
    fn test_lookup() {
        let sets = SetRegistry::builtin();
        let stanford = sets.lookup("stanford_set").unwrap();
        assert_eq!(stanford.members, &[STANDARD_SET, "oldisim"]);
        assert!(!sets.contains("oldisim"));
        assert!(!sets.is_empty());
    }

    #[test]
    fn test_custom_table() {
        static TABLE: &[BenchmarkSet] = &[BenchmarkSet {
            name: "net",
            description: "Network",
            members: &["ping", "iperf"],
        }];

        let sets = SetRegistry::new(TABLE);
        assert_eq!(sets.len(), 1);
        assert!(sets.contains("net"));
        assert!(!sets.contains(STANDARD_SET));
    }
}
