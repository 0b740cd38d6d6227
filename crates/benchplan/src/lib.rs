//! Benchmark planning for benchplan.
//!
//! Turns a request made of benchmark set names, benchmark names and
//! parenthesised parallel groups into a concrete plan: one resolved
//! configuration per benchmark (and per accepted flag matrix combination),
//! plus the grouping that says which benchmarks run together.
//!
//! # Overview
//!
//! - [`resolve_sets`] flattens nested [`BenchmarkSet`]s into benchmark names
//! - [`expand_matrix`] computes the filtered cartesian product of a flag matrix
//! - [`ConfigBuilder`] merges default flags, overrides and matrix combinations
//! - [`parse_groups`] splits the request into parallel and sequential groups
//! - [`Planner`] ties them together
//!
//! # Example
//!
//! ```
//! use benchplan::{ConfigKey, OsType, Planner, ResolutionContext, StaticModuleRegistry};
//! use benchplan_config::UserConfig;
//!
//! let user_config = UserConfig::from_yaml_str(r#"
//!     flags:
//!       zone: us-central1-a
//!     fio:
//!       flag_matrix: depth
//!       flag_matrix_defs:
//!         depth:
//!           io_depth: [1, 16, 64]
//!       flag_matrix_filters:
//!         depth: "io_depth > 1"
//! "#).unwrap();
//!
//! let registry = StaticModuleRegistry::builtin();
//! let planner = Planner::new(&registry)
//!     .with_context(ResolutionContext::new().with_os_type(OsType::Linux));
//!
//! let plan = planner.plan(&["(fio", "ping)"], &user_config).unwrap();
//! assert_eq!(plan.len(), 3);
//! assert_eq!(plan.configs[&ConfigKey::new("fio", 1)].flags["io_depth"], 64);
//! assert_eq!(plan.groups, Some(vec![vec!["fio".to_string(), "ping".to_string()]]));
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod filter;
pub mod groups;
pub mod matrix;
pub mod planner;
pub mod registry;
pub mod resolver;
pub mod sets;

#[cfg(test)]
mod test_utils;

pub use builder::{ConfigBuilder, ConfigKey, ResolvedConfig, ResolvedConfigs};
pub use context::{OsType, ResolutionContext};
pub use error::{PlanError, Result};
pub use filter::{FilterEvaluationError, FlagFilter};
pub use groups::{parse_groups, ParallelGroups};
pub use matrix::expand_matrix;
pub use planner::{plan, BenchmarkPlan, Planner};
pub use registry::{BenchmarkModule, ModuleRegistry, StaticModuleRegistry};
pub use resolver::resolve_sets;
pub use sets::{BenchmarkSet, SetRegistry, BENCHMARK_SETS, STANDARD_SET};
