//! Paginated stream for lazy iteration over list results.
//!
//! This module provides a [`PaginatedStream`] that implements the `Stream` trait,
//! following `page_token` cursors from each page's `next` link until the
//! terminal page.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;

use crate::models::ListResponse;
use crate::{Error, Result};

/// Boxed future returned by page fetchers.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Where the next fetch starts.
enum Cursor {
    /// The first page; no token yet.
    Start,
    /// A token read from the previous page's `next` link.
    Token(String),
}

/// A stream that lazily fetches pages from a list endpoint.
///
/// Yields individual items, fetching the next page when the current one is
/// exhausted. The stream ends after the page without a `next` link, or
/// after the first error. A malformed `next` link is reported once the
/// items of its page have been yielded.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use mailerlite_rs::ListSubscriberOptions;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example(client: mailerlite_rs::MailerLiteClient) -> mailerlite_rs::Result<()> {
/// let ctx = CancellationToken::new();
/// let options = ListSubscriberOptions::new().with_limit(100);
/// let mut stream = client.subscribers().list_stream(&ctx, options);
///
/// while let Some(result) = stream.next().await {
///     let subscriber = result?;
///     println!("{}", subscriber.email);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedStream<T> {
    /// Function to fetch a page; `None` asks for the first page.
    fetch_page: Box<dyn Fn(Option<String>) -> BoxFuture<'static, Result<ListResponse<T>>> + Send + Sync>,
    /// Current page of items being yielded, in reverse order.
    current_items: Vec<T>,
    /// Next page to fetch, None if exhausted.
    next_cursor: Option<Cursor>,
    /// Error from reading the last page's `next` link, yielded after its items.
    cursor_error: Option<Error>,
    /// Current in-flight fetch future.
    pending_fetch: Option<BoxFuture<'static, Result<ListResponse<T>>>>,
}

impl<T> PaginatedStream<T>
where
    T: Send + 'static,
{
    /// Create a new paginated stream.
    pub fn new<F>(fetch_page: F) -> Self
    where
        F: Fn(Option<String>) -> BoxFuture<'static, Result<ListResponse<T>>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            current_items: Vec::new(),
            next_cursor: Some(Cursor::Start),
            cursor_error: None,
            pending_fetch: None,
        }
    }
}

impl<T> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if let Some(item) = this.current_items.pop() {
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(e) = this.cursor_error.take() {
                return Poll::Ready(Some(Err(e)));
            }

            if let Some(fut) = this.pending_fetch.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;
                        this.next_cursor = match next_cursor(&page) {
                            Ok(cursor) => cursor,
                            Err(e) => {
                                this.cursor_error = Some(e);
                                None
                            }
                        };
                        this.current_items = page.data;
                        this.current_items.reverse();
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.next_cursor = None; // Stop on error
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            match this.next_cursor.take() {
                Some(cursor) => {
                    let token = match cursor {
                        Cursor::Start => None,
                        Cursor::Token(token) => Some(token),
                    };
                    this.pending_fetch = Some((this.fetch_page)(token));
                }
                None => return Poll::Ready(None),
            }
        }
    }
}

impl<T> Unpin for PaginatedStream<T> {}

fn next_cursor<T>(page: &ListResponse<T>) -> Result<Option<Cursor>> {
    if page.is_last_page() {
        return Ok(None);
    }
    match page.next_page_token()? {
        Some(token) => Ok(Some(Cursor::Token(token))),
        None => {
            tracing::warn!("next link carries no page_token; stopping pagination");
            Ok(None)
        }
    }
}
