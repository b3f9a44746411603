//! Error types for the monitor service.

use ac3_eurlex::FetchError;

/// Top-level error type for the monitor service.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP server error (bind, serve).
    #[error("server error: {0}")]
    Server(String),

    /// Document source error.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let err: MonitorError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, MonitorError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: missing");
    }

    #[test]
    fn fetch_error_converts() {
        let err: MonitorError = FetchError::Config("result_limit must be greater than 0".into()).into();
        assert_eq!(
            err.to_string(),
            "fetch error: config error: result_limit must be greater than 0"
        );
    }
}
