use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// The error type for mqsign operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    body: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credentials are missing or malformed
    CredentialInvalid,

    /// Request cannot be built or signed (invalid uri, header, etc.)
    RequestInvalid,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Request payload could not be encoded
    EncodeFailed,

    /// Connection could not be established or the response could not be read
    TransportFailed,

    /// The service answered with a status outside of 2xx/3xx
    ServiceRejected,

    /// Unexpected errors
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the response returned by the service.
    pub fn with_response(mut self, status: StatusCode, body: impl Into<String>) -> Self {
        self.status = Some(status);
        self.body = Some(body.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message without the kind prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status returned by the service, if the request reached it.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Raw response body returned by the service, if the request reached it.
    ///
    /// The service reports failures as an XML document, callers can parse it
    /// to learn the error code and request id.
    pub fn response_body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Check if the request has been rejected by the service.
    pub fn is_service_error(&self) -> bool {
        self.kind == ErrorKind::ServiceRejected
    }
}

// Convenience constructors
impl Error {
    /// Create a credential invalid error
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an encode failed error
    pub fn encode_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EncodeFailed, message)
    }

    /// Create a transport failed error
    pub fn transport_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransportFailed, message)
    }

    /// Create a service rejected error carrying the response.
    ///
    /// The message follows `Code:<status>,Content:<body>`.
    pub fn service_rejected(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(
            ErrorKind::ServiceRejected,
            format!("Code:{},Content:{}", status.as_u16(), body),
        )
        .with_response(status, body)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::EncodeFailed => write!(f, "encode failed"),
            ErrorKind::TransportFailed => write!(f, "transport failed"),
            ErrorKind::ServiceRejected => write!(f, "rejected by service"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::method::InvalidMethod> for Error {
    fn from(err: http::method::InvalidMethod) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_rejected_carries_response() {
        let err = Error::service_rejected(StatusCode::NOT_FOUND, "<Error>QueueNotExist</Error>");

        assert_eq!(err.kind(), ErrorKind::ServiceRejected);
        assert!(err.is_service_error());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.response_body(), Some("<Error>QueueNotExist</Error>"));
        assert_eq!(
            err.to_string(),
            "rejected by service: Code:404,Content:<Error>QueueNotExist</Error>"
        );
    }

    #[test]
    fn test_local_errors_have_no_response() {
        let err = Error::encode_failed("bad payload");

        assert_eq!(err.kind(), ErrorKind::EncodeFailed);
        assert!(!err.is_service_error());
        assert!(err.status().is_none());
        assert!(err.response_body().is_none());
    }

    #[test]
    fn test_from_http_error_is_request_invalid() {
        let err: Error = http::HeaderValue::from_str("bad\nvalue").unwrap_err().into();

        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }
}
