//! Error types module
//!
//! Every failure a request can hit is one of three kinds: a missing setting,
//! bad client input, or a failure reported by the storage provider. Status codes
//! are attached at the HTTP boundary through [`ErrorMetadata`].

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for upstream issues outside our control
    Warn,
    /// Error level - for misconfiguration that needs an operator
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "CONFIG_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// A required setting is missing or unusable.
    #[error("{0}")]
    Config(String),

    /// The request is missing a required parameter.
    #[error("{0}")]
    BadRequest(String),

    /// The storage provider failed; the message embeds the provider's text.
    #[error("{0}")]
    Upstream(String),
}

impl AppError {
    /// The error returned by every bucket-backed endpoint when no bucket is set.
    pub fn bucket_not_configured() -> Self {
        AppError::Config("S3_BUCKET is not configured".to_string())
    }

    /// Variant name for structured logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Upstream(_) => "Upstream",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::Config(_) => 500,
            AppError::BadRequest(_) => 400,
            AppError::Upstream(_) => 502,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::Config(_) => LogLevel::Error,
            AppError::BadRequest(_) => LogLevel::Debug,
            AppError::Upstream(_) => LogLevel::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::bucket_not_configured().http_status_code(), 500);
        assert_eq!(
            AppError::BadRequest("key is required".into()).http_status_code(),
            400
        );
        assert_eq!(AppError::Upstream("boom".into()).http_status_code(), 502);
    }

    #[test]
    fn test_client_message_is_bare_text() {
        assert_eq!(
            AppError::bucket_not_configured().client_message(),
            "S3_BUCKET is not configured"
        );
        assert_eq!(
            AppError::Upstream("S3 list error: denied".into()).client_message(),
            "S3 list error: denied"
        );
    }
}
