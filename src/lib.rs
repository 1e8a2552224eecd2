//! # mailerlite-rs
//!
//! An async Rust client for the MailerLite subscriber management API.
//!
//! Every call goes through one pipeline: the request is built with the
//! bearer key and standard JSON headers, read options are encoded into the
//! query string, the request is sent through a pluggable
//! [`HttpTransport`](client::HttpTransport), and the response status is
//! classified into either a decoded payload or a typed [`Error`].
//!
//! ## Features
//!
//! - **Typed errors**: API failures display as `"<METHOD> <URL>: <STATUS> <MESSAGE>"`
//!   and keep the response envelope; 401s are flagged by [`Error::is_auth_error`]
//! - **Cancellation**: each call takes a `CancellationToken` and reports
//!   [`Error::Cancelled`] when it fires
//! - **Pagination**: page tokens are read from `next`/`prev` links, and
//!   [`PaginatedStream`] walks every page lazily
//! - **Testable transport**: swap the `reqwest` transport for a fake
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mailerlite_rs::{Filter, ListSubscriberOptions, MailerLiteClient};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> mailerlite_rs::Result<()> {
//!     let client = MailerLiteClient::new("your-api-key")?;
//!     let ctx = CancellationToken::new();
//!
//!     let options = ListSubscriberOptions::new()
//!         .with_limit(25)
//!         .with_filter(Filter::new("status", "active"));
//!
//!     let (page, _) = client.subscribers().list(&ctx, Some(&options)).await?;
//!     for subscriber in &page.data {
//!         println!("{} ({})", subscriber.email, subscriber.status);
//!     }
//!
//!     if let Some(token) = page.next_page_token()? {
//!         let next = options.clone().with_page_token(token);
//!         let (page, _) = client.subscribers().list(&ctx, Some(&next)).await?;
//!         println!("next page has {} subscribers", page.data.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Handling Errors
//!
//! ```rust,no_run
//! use mailerlite_rs::{Error, MailerLiteClient};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(client: MailerLiteClient) {
//! let ctx = CancellationToken::new();
//! match client.subscribers().get(&ctx, "missing@example.com").await {
//!     Ok((subscriber, _)) => println!("found {}", subscriber.id),
//!     Err(err) if err.is_auth_error() => eprintln!("bad API key: {err}"),
//!     Err(Error::Api(api)) => eprintln!("{} ({:?})", api, api.errors),
//!     Err(err) => eprintln!("request failed: {err}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use client::{
    add_options, ClientConfig, Filter, MailerLiteClient, PaginatedStream, Payload, QueryOptions,
    QueryPairs, Response,
};
pub use error::{Error, ErrorKind, ErrorResponse, Result};
pub use models::{
    Links, ListResponse, ListSubscriberOptions, Meta, MetaLink, Subscriber, SubscriberId,
    UpsertSubscriber,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use mailerlite_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{
        ClientConfig, Filter, HttpTransport, MailerLiteClient, PaginatedStream, QueryOptions,
        QueryPairs, Response,
    };
    pub use crate::error::{Error, ErrorKind, ErrorResponse, Result};
    pub use crate::models::{
        Links, ListResponse, ListSubscriberOptions, Meta, MetaLink, Subscriber, SubscriberId,
        UpsertSubscriber,
    };
}
