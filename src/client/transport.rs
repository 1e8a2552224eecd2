//! Pluggable HTTP transport.

use async_trait::async_trait;

/// Error produced by an [`HttpTransport`] when no response was received.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Sends a fully built request and returns the raw response.
///
/// The client owns one transport behind an `Arc`. The default is a
/// [`reqwest::Client`]; tests substitute a deterministic fake.
///
/// Implementations must not interpret the status code. Classification
/// happens after the response comes back.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Dispatch `request` and wait for the response head.
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response, TransportError>;
}

#[async_trait]
impl HttpTransport for reqwest::Client {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response, TransportError> {
        self.execute(request).await.map_err(Into::into)
    }
}
