//! Crate-level error type

use thiserror::Error;

use crate::session::SessionError;
use crate::store::StoreError;

/// Errors surfaced by the application controller and front-ends.
///
/// Unknown records and rejected logins are not errors; they come back as
/// absent views and inline notices.
#[derive(Error, Debug)]
pub enum AppError {
    /// Dataset failed integrity validation
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Session backend failed
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Configuration could not be loaded
    #[cfg(feature = "native")]
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let err: AppError = SessionError::Unavailable("no storage".to_string()).into();
        assert!(matches!(err, AppError::Session(_)));
        assert_eq!(err.to_string(), "Session error: Storage unavailable: no storage");
    }
}
