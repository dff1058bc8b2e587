use std::fmt;

/// Message surfaced for any non-2xx response, regardless of its body.
pub const STATUS_FAILURE_MESSAGE: &str = "could not fetch the data for that resource";

/// Everything that can go wrong between dispatching a request and holding
/// decoded data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Server answered with a non-success status.
    Status(u16),
    /// Transport-level failure (DNS, refused connection, reset). Carries the
    /// transport's own message.
    Network(String),
    /// Success status, but the body was not the JSON we expected.
    Decode(String),
    /// Request was cancelled before it settled.
    Cancelled,
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Status(_) => f.write_str(STATUS_FAILURE_MESSAGE),
            FetchError::Network(msg) => f.write_str(msg),
            FetchError::Decode(msg) => f.write_str(msg),
            FetchError::Cancelled => f.write_str("fetch aborted"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_uses_fixed_message() {
        assert_eq!(FetchError::Status(404).to_string(), STATUS_FAILURE_MESSAGE);
        assert_eq!(FetchError::Status(500).to_string(), STATUS_FAILURE_MESSAGE);
    }

    #[test]
    fn test_network_error_surfaces_transport_message() {
        let err = FetchError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_decode_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = FetchError::from(serde_err);
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_cancelled_is_cancelled() {
        assert!(FetchError::Cancelled.is_cancelled());
    }
}
