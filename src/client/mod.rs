//! HTTP client and request pipeline for the MailerLite API.
//!
//! This module provides the main entry point [`MailerLiteClient`] together
//! with the pieces every call goes through: query encoding ([`add_options`]),
//! the pluggable [`HttpTransport`], and status classification
//! ([`check_response`]).
//!
//! # Example
//!
//! ```no_run
//! use mailerlite_rs::MailerLiteClient;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> mailerlite_rs::Result<()> {
//! let client = MailerLiteClient::from_env()?;
//! let ctx = CancellationToken::new();
//!
//! let (subscriber, _) = client.subscribers().get(&ctx, "client@example.com").await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;
mod query;
mod response;
mod transport;

pub use config::{ClientConfig, API_BASE, USER_AGENT};
pub use http::{MailerLiteClient, Payload, API_KEY_ENV};
pub use paginated::{BoxFuture, PaginatedStream};
pub use query::{add_options, Filter, QueryOptions, QueryPairs};
pub use response::{check_response, is_success, Response};
pub use transport::{HttpTransport, TransportError};
