//! Diagnostic logging for the binary.
//!
//! Events go to stderr so stdout stays empty on every path. The level comes
//! from the verbosity flags unless `RUST_LOG` is set, in which case that wins.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Install the stderr subscriber. Call once, first thing after flag parsing.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(derive_level(args))));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(ansi_enabled(args, std::io::stderr().is_terminal()))
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

/// Same level for the binary and both library crates.
fn filter_directives(level: &str) -> String {
    format!("clusterval={level},clusterval_core={level},clusterval_adapters={level}")
}

/// `-q` forces errors only; otherwise each `-v` lowers the threshold one step
/// from `warn`.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    ["warn", "info", "debug", "trace"][usize::from(args.verbose.min(3))]
}

fn ansi_enabled(args: &GlobalArgs, stderr_is_terminal: bool) -> bool {
    stderr_is_terminal && !args.no_color
}
