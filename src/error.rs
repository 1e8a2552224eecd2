//! Error types for the MailerLite API client.
//!
//! Every call through the request pipeline fails with a single [`Error`]
//! type. Non-success HTTP statuses become [`Error::Api`], carrying the
//! decoded [`ErrorResponse`] together with the response envelope so the
//! status code and headers stay inspectable.

use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::client::{Response, TransportError};

/// A specialized `Result` type for MailerLite operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all MailerLite API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success status.
    ///
    /// Displays as `"<METHOD> <URL>: <STATUS> <MESSAGE>"`.
    #[error(transparent)]
    Api(Box<ErrorResponse>),

    /// The transport failed before a response was received
    #[error("Transport error: {0}")]
    Transport(#[source] TransportError),

    /// The call's cancellation token fired
    #[error("Request cancelled")]
    Cancelled,

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if the API rejected the credentials (HTTP 401).
    ///
    /// # Example
    ///
    /// ```
    /// use mailerlite_rs::Error;
    ///
    /// fn handle_error(err: &Error) {
    ///     if err.is_auth_error() {
    ///         println!("Check MAILERLITE_API_KEY");
    ///     }
    /// }
    /// ```
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Api(resp) if resp.kind == ErrorKind::Auth)
    }

    /// Returns the decoded API error, if this is one.
    pub fn api_error(&self) -> Option<&ErrorResponse> {
        match self {
            Error::Api(resp) => Some(resp),
            _ => None,
        }
    }

    /// Returns the response envelope that triggered this error, if any.
    pub fn response(&self) -> Option<&Response> {
        self.api_error().map(|resp| &resp.response)
    }

    /// Returns the HTTP status for API errors.
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(Response::status)
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api(resp) => resp.response.status().is_client_error(),
            Error::InvalidInput(_) | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|status| status.is_server_error())
    }

    pub(crate) fn from_transport(err: TransportError) -> Self {
        let timed_out = err
            .downcast_ref::<reqwest::Error>()
            .is_some_and(reqwest::Error::is_timeout);
        if timed_out {
            Error::Timeout
        } else {
            Error::Transport(err)
        }
    }
}

impl From<ErrorResponse> for Error {
    fn from(resp: ErrorResponse) -> Self {
        Error::Api(Box::new(resp))
    }
}

/// Which failure a non-success status represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Any failing status other than 401.
    Generic,
    /// HTTP 401: the API key was missing, malformed or revoked.
    Auth,
}

/// A MailerLite API error response.
///
/// The wire shape is `{"message": string, "errors": any}`. When the body is
/// not JSON, the raw text becomes the message.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    /// Generic or authentication failure.
    pub kind: ErrorKind,
    /// Envelope of the response that caused this error.
    pub response: Response,
    /// Human-readable error message.
    pub message: String,
    /// Validation details; the schema varies per endpoint.
    pub errors: Value,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {}",
            self.response.method(),
            self.response.url(),
            self.response.status().as_u16(),
            self.message
        )
    }
}

impl std::error::Error for ErrorResponse {}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;
    use reqwest::Method;
    use url::Url;

    fn error_response(kind: ErrorKind, status: u16) -> ErrorResponse {
        let url = Url::parse("https://connect.mailerlite.com/api/subscribers").unwrap();
        ErrorResponse {
            kind,
            response: Response::new(
                Method::GET,
                url,
                StatusCode::from_u16(status).unwrap(),
                HeaderMap::new(),
            ),
            message: "The given data was invalid.".to_string(),
            errors: serde_json::json!([{"filter": "The filter must be an array."}]),
        }
    }

    #[test]
    fn test_api_error_display() {
        let err = Error::from(error_response(ErrorKind::Generic, 400));
        assert_eq!(
            err.to_string(),
            "GET https://connect.mailerlite.com/api/subscribers: 400 The given data was invalid."
        );
    }

    #[test]
    fn test_error_auth() {
        assert!(Error::from(error_response(ErrorKind::Auth, 401)).is_auth_error());
        assert!(!Error::from(error_response(ErrorKind::Generic, 400)).is_auth_error());
        assert!(!Error::Timeout.is_auth_error());
    }

    #[test]
    fn test_error_status_helpers() {
        let err = Error::from(error_response(ErrorKind::Generic, 422));
        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = Error::from(error_response(ErrorKind::Generic, 503));
        assert!(err.is_server_error());

        assert!(Error::InvalidInput("bad".into()).is_client_error());
        assert_eq!(Error::Cancelled.status(), None);
    }

    #[test]
    fn test_timeout_detection_from_transport() {
        let err = Error::from_transport("connection reset".into());
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(err.to_string(), "Transport error: connection reset");
    }
}
