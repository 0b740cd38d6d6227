//! Error types for benchmark planning

use benchplan_config::ConfigError;
use thiserror::Error;

use crate::context::OsType;
use crate::filter::FilterEvaluationError;

/// Main error type for planning operations
#[derive(Debug, Error)]
pub enum PlanError {
    /// Requested or aliased benchmark has no module for the target OS
    #[error("Benchmark \"{name}\" not valid on os_type \"{os_type}\"")]
    UnknownBenchmark { name: String, os_type: OsType },

    /// A parallel group was opened inside another one
    #[error("Already in a parallel section: {0}")]
    NestedGroup(String),

    /// A parallel group was closed without being opened
    #[error("Not in a parallel section: {0}")]
    UnmatchedClose(String),

    /// The request ended inside a parallel group
    #[error("Ended parsing while in a parallel section")]
    UnclosedGroup,

    /// A flag matrix filter failed to parse or evaluate
    #[error("Flag matrix filter for \"{benchmark}\" failed: {source}")]
    FilterEvaluation {
        benchmark: String,
        #[source]
        source: FilterEvaluationError,
    },

    /// Error in the user configuration document
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for planning operations
pub type Result<T> = std::result::Result<T, PlanError>;
