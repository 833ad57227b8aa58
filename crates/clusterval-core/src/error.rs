//! Unified error handling for clusterval core.
//!
//! Every validator failure resolves to a [`ValidationError`] whose
//! [`ErrorCode`] is drawn from a small, closed set of POSIX errno values.
//! Domains never invent free-form codes: a new failure mode must map onto
//! one of the existing variants (or a new variant must be added here).

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// POSIX-style error codes understood by every validator.
///
/// Numeric values follow Linux `errno.h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// `EINVAL`: malformed or missing input, unsupported subtype.
    InvalidArgument,
    /// `ECONNREFUSED`: a connectivity check failed.
    ConnectionRefused,
    /// `EHOSTUNREACH`: a host or node did not respond.
    HostUnreachable,
    /// `ENODATA`: expected configuration or devices are absent.
    NoData,
    /// `ESRCH`: a resource that should be running is not.
    NotRunning,
    /// `EIO`: an external tool could not be executed or its output parsed.
    Io,
}

impl ErrorCode {
    /// The numeric errno value.
    pub const fn errno(self) -> i32 {
        match self {
            Self::InvalidArgument => 22,
            Self::ConnectionRefused => 111,
            Self::HostUnreachable => 113,
            Self::NoData => 61,
            Self::NotRunning => 3,
            Self::Io => 5,
        }
    }

    /// The symbolic errno name, e.g. `EINVAL`.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::InvalidArgument => "EINVAL",
            Self::ConnectionRefused => "ECONNREFUSED",
            Self::HostUnreachable => "EHOSTUNREACH",
            Self::NoData => "ENODATA",
            Self::NotRunning => "ESRCH",
            Self::Io => "EIO",
        }
    }

    pub const fn category(self) -> ErrorCategory {
        match self {
            Self::InvalidArgument => ErrorCategory::Usage,
            Self::Io => ErrorCategory::Environment,
            Self::ConnectionRefused | Self::HostUnreachable | Self::NoData | Self::NotRunning => {
                ErrorCategory::Health
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.symbol(), self.errno())
    }
}

/// Error categories for CLI display and log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller used the tool wrong.
    Usage,
    /// The target system is unhealthy.
    Health,
    /// A probe could not be carried out on this machine.
    Environment,
}

/// A failed validation: an errno-style code plus a human message.
#[derive(Debug, Error)]
#[error("{message} [{code}]")]
pub struct ValidationError {
    code: ErrorCode,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ValidationError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for the most common failure.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    /// Attach the underlying cause (an I/O error, usually).
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The message without the code suffix.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self.code {
            ErrorCode::InvalidArgument => vec![
                "Check the arguments against the usage synopsis below".into(),
            ],
            ErrorCode::ConnectionRefused | ErrorCode::HostUnreachable => vec![
                "Verify the target hosts are powered on and on the expected network".into(),
                "Check firewall rules between this node and the targets".into(),
            ],
            ErrorCode::NoData | ErrorCode::NotRunning => vec![
                "Inspect the cluster configuration on the affected nodes".into(),
            ],
            ErrorCode::Io => vec![
                "Ensure the required tool is installed and in your PATH".into(),
            ],
        }
    }
}

/// Convenient result type alias.
pub type ValidationResult<T> = Result<T, ValidationError>;
