//! Command-line front end for benchplan.

pub mod args;
pub mod console;
pub mod output;

use std::io::{self, Write};

use benchplan::{PlanError, Planner, SetRegistry, StaticModuleRegistry};
use benchplan_config::{ConfigError, UserConfig};
use thiserror::Error;
use tracing::debug;

pub use args::{Args, Format};

/// Errors surfaced by the command line.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runs the command described by `args`, writing to `out`.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), CliError> {
    let sets = SetRegistry::builtin();
    if args.list_sets {
        output::write_sets(out, &sets)?;
        return Ok(());
    }

    let user_config = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "Loading user config");
            UserConfig::load(path)?
        }
        None => UserConfig::default(),
    };

    let registry = StaticModuleRegistry::builtin();
    let ctx = args.context();
    let plan = Planner::new(&registry)
        .with_sets(sets)
        .with_context(ctx.clone())
        .plan(args.tokens(), &user_config)?;

    match args.format {
        Format::Text => output::write_text(out, &plan, ctx.os_type)?,
        Format::Json => output::write_json(out, &plan, ctx.os_type)?,
    }
    Ok(())
}
