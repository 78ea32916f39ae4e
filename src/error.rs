//! Error type shared by the logging pipeline.

/// Errors that can occur while building or emitting a log record.
///
/// Missing request data is never an error; it maps to `"N/A"` or `null`.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The JSON encoder rejected a value, typically one returned by an
    /// extra attributes function.
    #[error("Failed to serialize log record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Unknown log level: '{0}' (expected debug, info, warn or error)")]
    InvalidLevel(String),
}

/// Result type for logging operations.
pub type LoggerResult<T> = Result<T, LoggerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_message() {
        let err = LoggerError::InvalidLevel("loud".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown log level: 'loud' (expected debug, info, warn or error)"
        );
    }

    #[test]
    fn test_serialize_error_from() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LoggerError = source.into();
        assert!(matches!(err, LoggerError::Serialize(_)));
        assert!(err.to_string().starts_with("Failed to serialize log record"));
    }
}
