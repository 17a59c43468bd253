//! Error taxonomy for package copying.
//!
//! Every error carries two strings: a formatted `message` meant for the
//! user, and a terser `diagnostic` used as the `Display` text.

use std::fmt;

use thiserror::Error;

/// Severity class of a [`PcpError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    /// Something unexpected, usually I/O that has no better class.
    Internal,
    /// A specific package failed to resolve, copy, or fetch.
    Operation,
    /// Malformed caller input.
    Usage,
}

impl ErrorKind {
    /// Exit code for this kind.
    ///
    /// Usage errors always exit 2. The other kinds exit 1 when they stop the
    /// program and 3 when the run carried on past them.
    pub fn exit_code(self, fatal: bool) -> i32 {
        match (self, fatal) {
            (ErrorKind::Usage, _) => 2,
            (_, true) => 1,
            (_, false) => 3,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Internal => write!(f, "internal"),
            ErrorKind::Operation => write!(f, "operation"),
            ErrorKind::Usage => write!(f, "usage"),
        }
    }
}

/// An error produced while building a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PcpError {
    #[error("{diagnostic}")]
    Usage { message: String, diagnostic: String },

    #[error("{diagnostic}")]
    Operation { message: String, diagnostic: String },

    #[error("{diagnostic}")]
    Internal { message: String, diagnostic: String },
}

impl PcpError {
    pub fn usage(message: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        PcpError::Usage {
            message: message.into(),
            diagnostic: diagnostic.into(),
        }
    }

    pub fn operation(message: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        PcpError::Operation {
            message: message.into(),
            diagnostic: diagnostic.into(),
        }
    }

    pub fn internal(message: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        PcpError::Internal {
            message: message.into(),
            diagnostic: diagnostic.into(),
        }
    }

    /// The severity class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PcpError::Usage { .. } => ErrorKind::Usage,
            PcpError::Operation { .. } => ErrorKind::Operation,
            PcpError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// The user-facing message.
    pub fn message(&self) -> &str {
        match self {
            PcpError::Usage { message, .. }
            | PcpError::Operation { message, .. }
            | PcpError::Internal { message, .. } => message,
        }
    }

    /// The short diagnostic text.
    pub fn diagnostic(&self) -> &str {
        match self {
            PcpError::Usage { diagnostic, .. }
            | PcpError::Operation { diagnostic, .. }
            | PcpError::Internal { diagnostic, .. } => diagnostic,
        }
    }
}

/// Result alias for operations that fail with a single [`PcpError`].
pub type PcpResult<T> = std::result::Result<T, PcpError>;
