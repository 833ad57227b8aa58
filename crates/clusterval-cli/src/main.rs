//! # clusterval
//!
//! Pre-flight validation of cluster node prerequisites.
//!
//! ## Startup sequence
//!
//! 1. Read the global flags that precede the domain (bootstrap parse).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env).
//! 4. Build the adapters and every registered command, parse once, bind one.
//! 5. Run it; translate any [`CliError`] into a report and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                          |
//! |------|----------------------------------|
//! |  0   | Validation passed, or usage shown |
//! |  22  | Anything failed (`EINVAL`)        |

use std::ffi::OsString;
use std::process::ExitCode;

use tracing::{debug, info, instrument};

use crate::{
    cli::GlobalArgs,
    commands::Adapters,
    config::AppConfig,
    context::InvocationContext,
    error::{CliError, CliResult},
    factory::CommandFactory,
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod context;
mod error;
mod factory;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    let argv: Vec<OsString> = std::env::args_os().collect();
    let ctx = InvocationContext::from_argv(&argv);

    // ── 1. Global flags ───────────────────────────────────────────────────
    let global = GlobalArgs::bootstrap(&argv);

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&global) {
        let output = OutputManager::new(&global, &AppConfig::default());
        return fail(
            &output,
            &ctx,
            CliError::internal("Failed to initialise logging", e),
        );
    }

    debug!(
        verbose = global.verbose,
        quiet = global.quiet,
        no_color = global.no_color,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(global.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            let output = OutputManager::new(&global, &AppConfig::default());
            return fail(
                &output,
                &ctx,
                CliError::config("Failed to load configuration", e),
            );
        }
    };

    let output = OutputManager::new(&global, &config);
    debug!(color = output.supports_color(), "Configuration loaded");

    // ── 4. Select + 5. Run ────────────────────────────────────────────────
    match run(&argv, &ctx, &config) {
        Ok(true) => {
            info!("Validation passed");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            if let Err(e) = output.usage(&ctx) {
                debug!(error = %e, "Could not write usage");
            }
            ExitCode::SUCCESS
        }
        Err(e) => fail(&output, &ctx, e),
    }
}

/// Select and run one command; `Ok(false)` when there was none to run.
#[instrument(skip_all)]
fn run(argv: &[OsString], ctx: &InvocationContext, config: &AppConfig) -> CliResult<bool> {
    let adapters = Adapters::from_config(config);
    let factory = CommandFactory::new(&adapters, ctx);

    let Some(command) = factory.get_command(argv)? else {
        return Ok(false);
    };

    command.process()?;
    Ok(true)
}

/// The single place where errors become output and an exit status.
fn fail(output: &OutputManager, ctx: &InvocationContext, err: CliError) -> ExitCode {
    err.log();
    if let Err(e) = output.report(&err, ctx) {
        debug!(error = %e, "Could not write error report");
    }
    ExitCode::from(err.exit_code())
}
