//! Result type alias for decor operations

use crate::error::DecorError;

/// Standard Result type for decor operations
pub type Result<T> = std::result::Result<T, DecorError>;

/// Lenient handling of pass errors
pub trait ResultExt<T> {
    /// Log the error and continue with `None`
    ///
    /// Recoverable errors are logged as warnings, anything else as an error.
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn log_and_continue(self) -> Option<T> {
        let err = match self {
            Ok(value) => return Some(value),
            Err(err) => err,
        };
        if err.is_recoverable() {
            tracing::warn!("Continuing after error: {}", err);
        } else {
            tracing::error!("Continuing after fatal error: {}", err);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolveError;

    #[test]
    fn test_log_and_continue() {
        let ok: Result<u8> = Ok(3);
        assert_eq!(ok.log_and_continue(), Some(3));

        let soft: Result<u8> = Err(DecorError::resolve_error(
            "x",
            ResolveError::Ambiguous("x".into()),
        ));
        assert_eq!(soft.log_and_continue(), None);
    }
}
