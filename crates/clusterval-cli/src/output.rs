//! Output management and formatting.
//!
//! Everything the binary prints goes to stderr; stdout stays empty so the
//! exit status is the only machine-readable result.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::{GlobalArgs, synopsis};
use crate::config::AppConfig;
use crate::context::InvocationContext;
use crate::error::CliError;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let no_color = args.no_color || config.output.no_color || !io::stderr().is_terminal();
        Self {
            no_color,
            term: Term::stderr(),
        }
    }

    /// The usage synopsis, shown when no command was selected.
    pub fn usage(&self, ctx: &InvocationContext) -> io::Result<()> {
        self.term.write_str(&self.render_usage(ctx))
    }

    /// An error, its diagnostic trace, then the usage synopsis.
    pub fn report(&self, err: &CliError, ctx: &InvocationContext) -> io::Result<()> {
        let body = if self.no_color {
            err.format_plain()
        } else {
            err.format_colored()
        };
        self.term.write_str(&body)?;
        self.term.write_str(&self.render_usage(ctx))
    }

    fn render_usage(&self, ctx: &InvocationContext) -> String {
        let text = synopsis(ctx);
        if self.no_color {
            return text;
        }
        match text.split_once(' ') {
            Some((head, rest)) => format!("{} {rest}", head.bold()),
            None => text,
        }
    }

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }
}
