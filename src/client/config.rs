//! Client configuration options.

use std::time::Duration;

/// Base URL of the MailerLite API.
pub const API_BASE: &str = "https://connect.mailerlite.com/api";

/// User-Agent sent with every request.
pub const USER_AGENT: &str = "Mailerlite-Client-Rust-v1";

/// Configuration for the MailerLite client.
///
/// # Example
///
/// ```
/// use mailerlite_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_strict_query_encoding(true);
/// assert_eq!(config.base_url, "https://connect.mailerlite.com/api");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL; request paths are appended verbatim
    pub base_url: String,
    /// Request timeout for the default transport
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Abort GET requests whose query options fail to encode.
    ///
    /// Off by default: the request is sent without the options.
    pub strict_query_encoding: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: USER_AGENT.to_string(),
            strict_query_encoding: false,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another base URL (a proxy or a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Choose whether query encoding failures abort GET requests.
    pub fn with_strict_query_encoding(mut self, strict: bool) -> Self {
        self.strict_query_encoding = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, API_BASE);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.user_agent, "Mailerlite-Client-Rust-v1");
        assert!(!config.strict_query_encoding);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new()
            .with_base_url("http://127.0.0.1:8080/api")
            .with_user_agent("my-app/1.0")
            .with_strict_query_encoding(true);
        assert_eq!(config.base_url, "http://127.0.0.1:8080/api");
        assert_eq!(config.user_agent, "my-app/1.0");
        assert!(config.strict_query_encoding);
    }
}
