//! Subscribers service.

use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::client::{MailerLiteClient, PaginatedStream, QueryOptions, Response};
use crate::models::{ListResponse, ListSubscriberOptions, Subscriber, SubscriberId, UpsertSubscriber};
use crate::Result;

/// Single-resource responses wrap the item in `data`.
#[derive(Deserialize)]
struct Envelope {
    data: Subscriber,
}

/// Service for subscriber operations.
///
/// # Example
///
/// ```no_run
/// use mailerlite_rs::{Filter, ListSubscriberOptions, UpsertSubscriber};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example(client: mailerlite_rs::MailerLiteClient) -> mailerlite_rs::Result<()> {
/// let ctx = CancellationToken::new();
///
/// let created = client
///     .subscribers()
///     .create(&ctx, &UpsertSubscriber::new("client@example.com"))
///     .await?
///     .0;
///
/// let options = ListSubscriberOptions::new().with_filter(Filter::new("status", "active"));
/// let (page, _) = client.subscribers().list(&ctx, Some(&options)).await?;
/// if page.is_last_page() {
///     println!("{} active subscribers", page.data.len());
/// }
///
/// client.subscribers().delete(&ctx, &created.id).await?;
/// # Ok(())
/// # }
/// ```
pub struct SubscribersService<'a> {
    client: &'a MailerLiteClient,
}

impl<'a> SubscribersService<'a> {
    pub(crate) fn new(client: &'a MailerLiteClient) -> Self {
        Self { client }
    }

    /// List one page of subscribers.
    pub async fn list(
        &self,
        ctx: &CancellationToken,
        options: Option<&ListSubscriberOptions>,
    ) -> Result<(ListResponse<Subscriber>, Response)> {
        let options = options.map(|o| o as &dyn QueryOptions);
        self.client.list(ctx, "/subscribers", options).await
    }

    /// Stream every subscriber matching `options`, following page tokens.
    ///
    /// Any `page_token` already in `options` selects the starting page.
    pub fn list_stream(
        &self,
        ctx: &CancellationToken,
        options: ListSubscriberOptions,
    ) -> PaginatedStream<Subscriber> {
        let client = self.client.clone();
        let ctx = ctx.clone();

        PaginatedStream::new(move |token: Option<String>| {
            let client = client.clone();
            let ctx = ctx.clone();
            let mut options = options.clone();
            if token.is_some() {
                options.page_token = token;
            }

            Box::pin(async move {
                client
                    .subscribers()
                    .list(&ctx, Some(&options))
                    .await
                    .map(|(page, _)| page)
            })
        })
    }

    /// Get a subscriber by ID or email address.
    pub async fn get(
        &self,
        ctx: &CancellationToken,
        id_or_email: &str,
    ) -> Result<(Subscriber, Response)> {
        let (envelope, response): (Envelope, _) = self
            .client
            .get(ctx, &subscriber_path(id_or_email))
            .await?;
        Ok((envelope.data, response))
    }

    /// Create a subscriber, or update the one with the same email.
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        subscriber: &UpsertSubscriber,
    ) -> Result<(Subscriber, Response)> {
        let (envelope, response): (Envelope, _) =
            self.client.create(ctx, "/subscribers", subscriber).await?;
        Ok((envelope.data, response))
    }

    /// Update an existing subscriber.
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        id: &SubscriberId,
        subscriber: &UpsertSubscriber,
    ) -> Result<(Subscriber, Response)> {
        let (envelope, response): (Envelope, _) = self
            .client
            .update(ctx, &subscriber_path(id.as_str()), subscriber)
            .await?;
        Ok((envelope.data, response))
    }

    /// Delete a subscriber.
    pub async fn delete(&self, ctx: &CancellationToken, id: &SubscriberId) -> Result<Response> {
        self.client.delete(ctx, &subscriber_path(id.as_str())).await
    }
}

/// IDs and emails are escaped so `/`, `?` and `#` stay inside the segment.
fn subscriber_path(id_or_email: &str) -> String {
    format!("/subscribers/{}", urlencoding::encode(id_or_email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_path_escapes_segment() {
        assert_eq!(subscriber_path("123456789"), "/subscribers/123456789");
        assert_eq!(
            subscriber_path("client@example.com"),
            "/subscribers/client%40example.com"
        );
        assert_eq!(subscriber_path("a/b?c#d"), "/subscribers/a%2Fb%3Fc%23d");
    }
}
