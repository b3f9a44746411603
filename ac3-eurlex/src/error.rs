//! Error types for the ac3-eurlex crate.
//!
//! Messages are stable strings suitable for the `warning`/`error` fields of
//! the API envelope. Payload contents never appear in them.

/// Errors that can occur while fetching from a document source.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The source did not answer within the configured timeout.
    #[error("source timed out after {0}s")]
    Timeout(u64),

    /// The source answered with a non-success status code.
    #[error("source returned status {status}")]
    Status { status: u16 },

    /// The payload could not be parsed into records.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid fetch configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl FetchError {
    /// Map a `reqwest` failure onto the taxonomy, keeping timeouts distinct.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_seconds: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_seconds)
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else {
            Self::Http(err.to_string())
        }
    }
}

/// Convenience type alias for ac3-eurlex results.
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = FetchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let err = FetchError::Timeout(30);
        assert_eq!(err.to_string(), "source timed out after 30s");
    }

    #[test]
    fn display_status() {
        let err = FetchError::Status { status: 503 };
        assert_eq!(err.to_string(), "source returned status 503");
    }

    #[test]
    fn display_parse() {
        let err = FetchError::Parse("missing results.bindings".into());
        assert_eq!(err.to_string(), "parse error: missing results.bindings");
    }

    #[test]
    fn display_config() {
        let err = FetchError::Config("user_agent must not be empty".into());
        assert_eq!(err.to_string(), "config error: user_agent must not be empty");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FetchError>();
    }
}
