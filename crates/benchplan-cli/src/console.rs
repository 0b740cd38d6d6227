//! Log output for the command line.
//!
//! Planning events go to stderr so stdout carries only the plan.
//! `RUST_LOG` overrides the default `benchplan=info` filter.

use std::io;
use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "benchplan=info,benchplan_cli=info";

/// Installs the tracing subscriber.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr).with_target(false))
            .try_init();
    });
}
