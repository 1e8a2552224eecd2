//! HTTP client implementation for the MailerLite API.

use std::sync::Arc;

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::api::SubscribersService;
use crate::{Error, Result};

use super::config::ClientConfig;
use super::query::{add_options, QueryOptions};
use super::response::{check_response, Response};
use super::transport::HttpTransport;

/// Environment variable read by [`MailerLiteClient::from_env`].
pub const API_KEY_ENV: &str = "MAILERLITE_API_KEY";

/// The main client for interacting with the MailerLite API.
///
/// Every call takes a [`CancellationToken`] as its context. Cancelling the
/// token aborts the in-flight exchange and the call fails with
/// [`Error::Cancelled`].
///
/// The API key and transport are replaced through `&mut self` setters, so
/// they cannot change while a call borrowed from the same client is in
/// flight. Clones taken earlier keep the previous values.
///
/// # Example
///
/// ```no_run
/// use mailerlite_rs::{MailerLiteClient, ListSubscriberOptions, Filter};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> mailerlite_rs::Result<()> {
/// let client = MailerLiteClient::new("your-api-key")?;
/// let ctx = CancellationToken::new();
///
/// let options = ListSubscriberOptions::new()
///     .with_limit(25)
///     .with_filter(Filter::new("status", "active"));
/// let (page, response) = client.subscribers().list(&ctx, Some(&options)).await?;
/// println!("{} subscribers, status {}", page.data.len(), response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MailerLiteClient {
    api_key: SecretString,
    transport: Arc<dyn HttpTransport>,
    config: ClientConfig,
}

/// What a request carries besides its method and path.
///
/// GET requests encode [`Payload::Options`] into the query string.
/// POST, PUT and DELETE requests send the payload as a JSON body; payloads
/// other than [`Payload::Json`] encode as `null` there.
pub enum Payload<'a> {
    /// No options and no body.
    Empty,
    /// Read options for a GET request.
    Options(&'a dyn QueryOptions),
    /// JSON body for a mutating request.
    Json(Value),
}

impl<'a> Payload<'a> {
    /// Serialize `body` into a JSON payload.
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        Ok(Payload::Json(serde_json::to_value(body)?))
    }

    fn options(&self) -> Option<&'a dyn QueryOptions> {
        match self {
            Payload::Options(options) => Some(*options),
            _ => None,
        }
    }

    fn to_body(&self) -> Result<Vec<u8>> {
        match self {
            Payload::Json(value) => Ok(serde_json::to_vec(value)?),
            Payload::Empty | Payload::Options(_) => Ok(serde_json::to_vec(&Value::Null)?),
        }
    }
}

impl MailerLiteClient {
    /// Create a client with the default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client with a custom configuration.
    ///
    /// The default transport is a [`reqwest::Client`] using the configured
    /// timeout.
    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_transport(api_key, config, http))
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(
        api_key: impl Into<String>,
        config: ClientConfig,
        transport: impl HttpTransport + 'static,
    ) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            transport: Arc::new(transport),
            config,
        }
    }

    /// Create a client from the `MAILERLITE_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| Error::Config(format!("{API_KEY_ENV} is not set")))?;
        Self::new(api_key)
    }

    /// Get the subscribers service.
    pub fn subscribers(&self) -> SubscribersService<'_> {
        SubscribersService::new(self)
    }

    /// The API key used for the bearer token.
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Replace the API key used by subsequent requests.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = SecretString::from(api_key.into());
    }

    /// The transport requests are sent through.
    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Replace the transport.
    pub fn set_transport(&mut self, transport: impl HttpTransport + 'static) {
        self.transport = Arc::new(transport);
    }

    /// Replace the transport with one shared with other clients.
    pub fn set_shared_transport(&mut self, transport: Arc<dyn HttpTransport>) {
        self.transport = transport;
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a request for `path`, relative to the configured base URL.
    ///
    /// POST, PUT and DELETE serialize `payload` as the JSON body. GET merges
    /// the payload's options into the query string; when that fails the
    /// request goes out without them unless
    /// [`strict_query_encoding`](ClientConfig::strict_query_encoding) is set.
    /// Other methods ignore the payload.
    pub fn new_request(
        &self,
        method: Method,
        path: &str,
        payload: Payload<'_>,
    ) -> Result<reqwest::Request> {
        let mut url = format!("{}{}", self.config.base_url, path);
        let mut body = None;

        if method == Method::POST || method == Method::PUT || method == Method::DELETE {
            body = Some(payload.to_body()?);
        } else if method == Method::GET {
            match add_options(&url, payload.options()) {
                Ok(encoded) => url = encoded,
                Err(err) if self.config.strict_query_encoding => return Err(err),
                Err(err) => {
                    tracing::debug!(error = %err, url = %url, "query options not encoded; sending without them");
                }
            }
        }

        let mut request = reqwest::Request::new(method, Url::parse(&url)?);
        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.api_key.expose_secret()))
            .map_err(|_| Error::InvalidInput("API key is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        let user_agent = HeaderValue::from_str(&self.config.user_agent)
            .map_err(|_| Error::Config("User-Agent is not a valid header value".to_string()))?;

        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, user_agent);

        Ok(request)
    }

    /// Send `request` and decode a successful body into `T`.
    ///
    /// API errors carry the response envelope; decode failures do not.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        ctx: &CancellationToken,
        request: reqwest::Request,
    ) -> Result<(T, Response)> {
        let (response, body) = self.dispatch(ctx, request).await?;
        let decoded = serde_json::from_slice(&body)?;
        Ok((decoded, response))
    }

    /// Send `request` without decoding the body.
    pub async fn execute_empty(
        &self,
        ctx: &CancellationToken,
        request: reqwest::Request,
    ) -> Result<Response> {
        let (response, _) = self.dispatch(ctx, request).await?;
        Ok(response)
    }

    /// Send `request`, read the body and classify the status.
    async fn dispatch(
        &self,
        ctx: &CancellationToken,
        request: reqwest::Request,
    ) -> Result<(Response, Vec<u8>)> {
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, %url, "sending request");

        let sent = tokio::select! {
            biased;
            () = ctx.cancelled() => return Err(Error::Cancelled),
            sent = self.transport.send(request) => sent,
        };

        let raw = match sent {
            Ok(raw) => raw,
            Err(_) if ctx.is_cancelled() => return Err(Error::Cancelled),
            Err(err) => return Err(Error::from_transport(err)),
        };

        let response = Response::new(method, url, raw.status(), raw.headers().clone());

        let body = tokio::select! {
            biased;
            () = ctx.cancelled() => return Err(Error::Cancelled),
            body = raw.bytes() => body,
        };

        match check_response(&response, body.as_deref().unwrap_or_default()) {
            Ok(()) => Ok((response, body?.to_vec())),
            Err(api_error) => {
                tracing::debug!(
                    status = api_error.response.status().as_u16(),
                    message = %api_error.message,
                    "API returned an error"
                );
                Err(api_error.into())
            }
        }
    }

    /// GET a collection with optional read options.
    pub async fn list<T: DeserializeOwned>(
        &self,
        ctx: &CancellationToken,
        path: &str,
        options: Option<&dyn QueryOptions>,
    ) -> Result<(T, Response)> {
        let payload = options.map_or(Payload::Empty, Payload::Options);
        let request = self.new_request(Method::GET, path, payload)?;
        self.execute(ctx, request).await
    }

    /// GET a single resource.
    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &CancellationToken,
        path: &str,
    ) -> Result<(T, Response)> {
        let request = self.new_request(Method::GET, path, Payload::Empty)?;
        self.execute(ctx, request).await
    }

    /// POST `body` as JSON.
    pub async fn create<T, B>(
        &self,
        ctx: &CancellationToken,
        path: &str,
        body: &B,
    ) -> Result<(T, Response)>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.new_request(Method::POST, path, Payload::json(body)?)?;
        self.execute(ctx, request).await
    }

    /// PUT `body` as JSON.
    pub async fn update<T, B>(
        &self,
        ctx: &CancellationToken,
        path: &str,
        body: &B,
    ) -> Result<(T, Response)>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.new_request(Method::PUT, path, Payload::json(body)?)?;
        self.execute(ctx, request).await
    }

    /// DELETE a resource; the body is not decoded.
    pub async fn delete(&self, ctx: &CancellationToken, path: &str) -> Result<Response> {
        let request = self.new_request(Method::DELETE, path, Payload::Empty)?;
        self.execute_empty(ctx, request).await
    }
}

impl std::fmt::Debug for MailerLiteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailerLiteClient")
            .field("api_key", &"[REDACTED]")
            .field("config", &self.config)
            .finish()
    }
}
