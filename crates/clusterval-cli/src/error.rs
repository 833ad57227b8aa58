//! Error handling for the clusterval CLI.
//!
//! Provides structured errors with:
//! - the validator's message, unchanged
//! - a diagnostic trace (category, errno, cause chain)
//! - actionable suggestions
//!
//! Whatever went wrong, the process exits with `EINVAL`.

use std::error::Error;

use clusterval_core::error::{ErrorCategory, ErrorCode, ValidationError};
use owo_colors::OwoColorize;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Exit status for every failure.
pub const EXIT_FAILURE: u8 = ErrorCode::InvalidArgument.errno() as u8;

#[derive(Debug, Error)]
pub enum CliError {
    /// A validator rejected the request or found the cluster unhealthy.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The command line named a domain but did not parse under it.
    #[error("invalid `{domain}` invocation: {}", clap_summary(.source))]
    Usage {
        domain: &'static str,
        #[source]
        source: clap::Error,
    },

    /// The flags before the domain did not parse.
    #[error("invalid global flags: {}", clap_summary(.source))]
    GlobalFlags {
        #[source]
        source: clap::Error,
    },

    /// A configuration file or variable could not be read.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// Startup failed for a reason unrelated to the request.
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },
}

impl CliError {
    pub fn config(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn internal(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The errno-style code shown in the diagnostic trace.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(e) => e.code(),
            Self::Usage { .. } | Self::GlobalFlags { .. } | Self::Config { .. } => {
                ErrorCode::InvalidArgument
            }
            Self::Internal { .. } => ErrorCode::Io,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(e) => e.category(),
            Self::Usage { .. } | Self::GlobalFlags { .. } => ErrorCategory::Usage,
            Self::Config { .. } | Self::Internal { .. } => ErrorCategory::Environment,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(e) => e.suggestions(),
            Self::Usage { domain, .. } => vec![format!(
                "Run with `{domain} --help` to list what it accepts"
            )],
            Self::GlobalFlags { .. } => {
                vec!["Run with `--help` to list the global flags".into()]
            }
            Self::Config { .. } => vec![
                "Check the file passed with --config and any CLUSTERVAL_* variables".into(),
            ],
            Self::Internal { .. } => vec![],
        }
    }

    /// Exit code to pass to the OS.
    pub fn exit_code(&self) -> u8 {
        EXIT_FAILURE
    }

    /// Each cause's first line, outermost first.
    fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut source = self.source();
        while let Some(err) = source {
            causes.push(first_line(&err.to_string()));
            source = err.source();
        }
        causes
    }

    /// Format the error with colors, trace and suggestions.
    pub fn format_colored(&self) -> String {
        let mut out = format!("{} {}\n", "error:".red().bold(), self.to_string().red());

        out.push_str(&format!(
            "  {} {:?}\n  {} {}\n",
            "kind:".dimmed(),
            self.category(),
            "errno:".dimmed(),
            self.code()
        ));
        for cause in self.causes() {
            out.push_str(&format!("  {} {}\n", "caused by:".dimmed(), cause.dimmed()));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!("{}\n", "suggestions:".yellow().bold()));
            for suggestion in suggestions {
                out.push_str(&format!("  {suggestion}\n"));
            }
        }
        out
    }

    /// Plain-text version of [`Self::format_colored`].
    pub fn format_plain(&self) -> String {
        let mut out = format!("error: {self}\n");

        out.push_str(&format!(
            "  kind: {:?}\n  errno: {}\n",
            self.category(),
            self.code()
        ));
        for cause in self.causes() {
            out.push_str(&format!("  caused by: {cause}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("suggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }
        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::Usage => tracing::warn!("Usage error: {}", self),
            ErrorCategory::Health => tracing::error!("Validation failed: {}", self),
            ErrorCategory::Environment => tracing::error!("Environment error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// clap renders multi-line errors prefixed with `error: `; keep the gist.
fn clap_summary(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let line = first_line(&rendered);
    line.strip_prefix("error: ").unwrap_or(&line).to_owned()
}

fn first_line(s: &str) -> String {
    s.lines().next().unwrap_or_default().trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn usage_error() -> CliError {
        let err = clap::Command::new("clusterval")
            .subcommand(
                clap::Command::new("pacemaker")
                    .subcommand_required(true)
                    .subcommand(clap::Command::new("stonith")),
            )
            .try_get_matches_from(["clusterval", "pacemaker", "bogus"])
            .unwrap_err();
        CliError::Usage {
            domain: "pacemaker",
            source: err,
        }
    }

    #[test]
    fn always_exits_einval() {
        let health = CliError::from(ValidationError::new(ErrorCode::NotRunning, "stopped"));
        assert_eq!(health.exit_code(), 22);
        assert_eq!(usage_error().exit_code(), 22);
        assert_eq!(
            CliError::internal("x", anyhow::anyhow!("y")).exit_code(),
            22
        );
    }

    #[test]
    fn validation_message_is_unchanged() {
        let err = CliError::from(ValidationError::invalid_argument("Invalid ip 999.1.1.1."));
        assert_eq!(err.to_string(), "Invalid ip 999.1.1.1. [EINVAL(22)]");
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[test]
    fn usage_error_is_one_line() {
        let err = usage_error();
        let msg = err.to_string();
        assert!(msg.starts_with("invalid `pacemaker` invocation:"));
        assert!(msg.contains("bogus"));
        assert!(!msg.contains('\n'));
        assert!(!msg.contains("error: error:"));
    }

    #[test]
    fn global_flag_error_names_no_domain() {
        let err = clap::Command::new("clusterval")
            .arg(clap::Arg::new("quiet").short('q').action(clap::ArgAction::SetTrue))
            .try_get_matches_from(["clusterval", "-x"])
            .unwrap_err();
        let err = CliError::GlobalFlags { source: err };
        let msg = err.to_string();
        assert!(msg.starts_with("invalid global flags:"));
        assert!(msg.contains("-x"));
        assert_eq!(err.category(), ErrorCategory::Usage);
        assert_eq!(err.exit_code(), 22);
    }

    #[test]
    fn plain_format_has_trace() {
        let err = CliError::from(
            ValidationError::new(ErrorCode::ConnectionRefused, "Consul service is down")
                .with_source(io::Error::new(io::ErrorKind::ConnectionRefused, "refused")),
        );
        let s = err.format_plain();
        assert!(s.starts_with("error: Consul service is down [ECONNREFUSED(111)]\n"));
        assert!(s.contains("kind: Health"));
        assert!(s.contains("errno: ECONNREFUSED(111)"));
        assert!(s.contains("caused by: refused"));
        assert!(s.contains("suggestions:"));
    }

    #[test]
    fn config_error_chains_anyhow() {
        let err = CliError::config(
            "Failed to load configuration",
            anyhow::anyhow!("missing file").context("reading /etc/x.toml"),
        );
        let s = err.format_plain();
        assert!(s.contains("caused by: reading /etc/x.toml"));
        assert!(s.contains("CLUSTERVAL_"));
    }
}
