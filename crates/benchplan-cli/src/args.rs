//! Command-line arguments for the `benchplan` binary.

use std::path::PathBuf;

use benchplan::{OsType, ResolutionContext};
use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "benchplan",
    version,
    about = "Resolve benchmark sets, flag matrices and parallel groups into a run plan."
)]
pub struct Args {
    /// Benchmarks or benchmark sets, comma separated. Wrap a run in
    /// parentheses to execute it in parallel: `ping,(fio,iperf)`.
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub benchmarks: Option<Vec<String>>,

    /// User configuration document (YAML, or TOML with a `.toml` extension).
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Operating system of the benchmark VMs.
    #[arg(long, default_value = "linux")]
    pub os_type: OsType,

    /// Flag matrix to expand for every benchmark.
    #[arg(long)]
    pub flag_matrix: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// List the built-in benchmark sets and exit.
    #[arg(long)]
    pub list_sets: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

impl Args {
    /// Requested tokens; empty when `--benchmarks` was not given.
    pub fn tokens(&self) -> &[String] {
        self.benchmarks.as_deref().unwrap_or_default()
    }

    pub fn context(&self) -> ResolutionContext {
        let mut ctx = ResolutionContext::new()
            .with_os_type(self.os_type)
            .with_explicit_benchmarks(self.benchmarks.is_some());
        ctx.flag_matrix = self.flag_matrix.clone();
        ctx
    }
}
