//! Error types for decoration and restoration passes

use std::path::PathBuf;

use decor_syntax::PositionError;
use thiserror::Error;

use crate::resolver::ResolveError;

/// Main error type for decor operations
#[derive(Debug, Error)]
pub enum DecorError {
    /// A resolver could not classify an identifier or import path
    #[error("Resolve error for '{subject}': {source}")]
    ResolveError {
        subject: String,
        #[source]
        source: ResolveError,
    },

    /// No printable name could be found for a package path
    #[error("Cannot determine package name for '{path}': {message}")]
    PackageName { path: String, message: String },

    /// A node position does not belong to any known file
    #[error("Position error: {source}")]
    PositionOutOfFile {
        #[from]
        source: PositionError,
    },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Defects in the per-kind tables or the linker
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Resolve,
    PackageName,
    Position,
    Config,
    Io,
    Internal,
}

impl DecorError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecorError::ResolveError { .. } => ErrorKind::Resolve,
            DecorError::PackageName { .. } => ErrorKind::PackageName,
            DecorError::PositionOutOfFile { .. } => ErrorKind::Position,
            DecorError::ConfigError { .. } => ErrorKind::Config,
            DecorError::IoError { .. } => ErrorKind::Io,
            DecorError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (other files can still be processed)
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Resolve | ErrorKind::PackageName)
    }

    /// Create a resolve error
    pub fn resolve_error(subject: impl Into<String>, source: ResolveError) -> Self {
        Self::ResolveError {
            subject: subject.into(),
            source,
        }
    }

    /// Create a package name error
    pub fn package_name(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PackageName {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = DecorError::resolve_error("fmt", ResolveError::NotFound("fmt".into()));
        assert_eq!(err.kind(), ErrorKind::Resolve);
        assert!(err.is_recoverable());

        let err = DecorError::internal_error("no slot reachable");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = DecorError::package_name("example.com/x", "package not found");
        assert_eq!(
            err.to_string(),
            "Cannot determine package name for 'example.com/x': package not found"
        );

        let err: DecorError = PositionError::InvalidBase { base: 1, next: 5 }.into();
        assert_eq!(err.kind(), ErrorKind::Position);
    }
}
