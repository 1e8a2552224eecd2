//! Response envelope and status classification.

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::{ErrorKind, ErrorResponse};

/// A MailerLite API response envelope.
///
/// Exposes the status and headers of a completed exchange independent of
/// the decoded payload. Returned alongside successful results and embedded
/// in [`ErrorResponse`] for failures.
#[derive(Debug, Clone)]
pub struct Response {
    method: Method,
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
}

impl Response {
    pub(crate) fn new(method: Method, url: Url, status: StatusCode, headers: HeaderMap) -> Self {
        Self {
            method,
            url,
            status,
            headers,
        }
    }

    /// Method of the request that produced this response.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// URL of the request that produced this response.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Wire shape of an error body.
#[derive(Debug, Default, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Value,
}

/// Returns `true` for 202 and every status in `200..=299`.
pub fn is_success(status: StatusCode) -> bool {
    status == StatusCode::ACCEPTED || (200..=299).contains(&status.as_u16())
}

/// Classify a completed response.
///
/// Success statuses yield `Ok(())`. Anything else decodes `body` into an
/// [`ErrorResponse`]; a body that is not a JSON error object becomes the
/// message verbatim. Status 401 selects [`ErrorKind::Auth`].
///
/// The function only reads its inputs, so classifying the same response
/// twice yields the same verdict.
pub fn check_response(response: &Response, body: &[u8]) -> Result<(), ErrorResponse> {
    if is_success(response.status()) {
        return Ok(());
    }

    let (message, errors) = if body.is_empty() {
        (String::new(), Value::Null)
    } else {
        match serde_json::from_slice::<Option<ErrorBody>>(body) {
            Ok(decoded) => {
                let decoded = decoded.unwrap_or_default();
                (decoded.message.unwrap_or_default(), decoded.errors)
            }
            Err(_) => (String::from_utf8_lossy(body).into_owned(), Value::Null),
        }
    };

    let kind = if response.status() == StatusCode::UNAUTHORIZED {
        ErrorKind::Auth
    } else {
        ErrorKind::Generic
    };

    Err(ErrorResponse {
        kind,
        response: response.clone(),
        message,
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> Response {
        Response::new(
            Method::GET,
            Url::parse("https://connect.mailerlite.com/api/subscribers").unwrap(),
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
        )
    }

    #[test]
    fn test_success_statuses() {
        for status in 200..=299 {
            assert!(check_response(&response(status), b"").is_ok(), "{status}");
        }
        assert!(check_response(&response(202), b"OK").is_ok());
    }

    #[test]
    fn test_failure_statuses() {
        for status in [100, 301, 304, 400, 401, 404, 422, 429, 500, 503] {
            assert!(check_response(&response(status), b"").is_err(), "{status}");
        }
    }

    #[test]
    fn test_json_error_body() {
        let body = br#"{"message":"The given data was invalid.","errors":{"email":["The email must be a valid email address."]}}"#;
        let err = check_response(&response(422), body).unwrap_err();

        assert_eq!(err.kind, ErrorKind::Generic);
        assert_eq!(err.message, "The given data was invalid.");
        assert_eq!(
            err.errors["email"][0],
            "The email must be a valid email address."
        );
        assert_eq!(
            err.to_string(),
            "GET https://connect.mailerlite.com/api/subscribers: 422 The given data was invalid."
        );
    }

    #[test]
    fn test_unauthorized_is_auth_kind() {
        let err = check_response(&response(401), br#"{"message": "Unauthenticated."}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Auth);
        assert_eq!(err.errors, Value::Null);
        assert_eq!(
            err.to_string(),
            "GET https://connect.mailerlite.com/api/subscribers: 401 Unauthenticated."
        );

        let err = check_response(&response(403), br#"{"message": "Forbidden."}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Generic);
    }

    #[test]
    fn test_non_json_body_becomes_message() {
        let err = check_response(&response(500), b"Bad Gateway upstream").unwrap_err();
        assert_eq!(err.message, "Bad Gateway upstream");

        let err = check_response(&response(404), b"[1, 2]").unwrap_err();
        assert_eq!(err.message, "[1, 2]");
    }

    #[test]
    fn test_empty_body_has_empty_message() {
        let err = check_response(&response(404), b"").unwrap_err();
        assert_eq!(err.message, "");
        assert_eq!(
            err.to_string(),
            "GET https://connect.mailerlite.com/api/subscribers: 404 "
        );
    }

    #[test]
    fn test_null_body_has_empty_message() {
        let err = check_response(&response(500), b"null").unwrap_err();
        assert_eq!(err.message, "");
        assert_eq!(err.errors, Value::Null);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let resp = response(400);
        let body = br#"{"message":"nope","errors":[1]}"#;
        let first = check_response(&resp, body).unwrap_err();
        let second = check_response(&resp, body).unwrap_err();

        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(first.kind, second.kind);
        assert_eq!(first.errors, second.errors);
        assert!(check_response(&response(201), body).is_ok());
        assert!(check_response(&response(201), body).is_ok());
    }
}
