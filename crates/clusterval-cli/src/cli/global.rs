//! Global arguments accepted before the domain.
//!
//! Unlike per-domain arguments these are needed before the full command tree
//! exists (the tree is built from configuration), so they are also parsed in
//! a lenient bootstrap pass by [`GlobalArgs::bootstrap`].

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, FromArgMatches};

/// Global arguments for all commands.
#[derive(Debug, Default, Clone, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO (`-v`), twice for DEBUG (`-vv`), three times for
    /// TRACE (`-vvv`).  Conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Only warnings and errors
    -v      - Info level (one line per passed check)
    -vv     - Debug level (every probe)
    -vvv    - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        conflicts_with = "verbose",
        help = "Only log errors"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    #[arg(
        long = "no-color",
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// Read the global flags that precede the domain, ignoring everything else.
    ///
    /// Never fails: unparseable input yields the defaults, and the full
    /// parse later reports the real problem.
    pub fn bootstrap(argv: &[OsString]) -> Self {
        let cmd = Self::augment_args(
            clap::Command::new("bootstrap")
                .disable_help_flag(true)
                .disable_version_flag(true)
                .allow_external_subcommands(true)
                .ignore_errors(true),
        );

        cmd.try_get_matches_from(argv)
            .ok()
            .and_then(|m| Self::from_arg_matches(&m).ok())
            .unwrap_or_default()
    }
}
