//! Subscriber resource shapes.
//!
//! These mirror the wire format only; status values and custom fields are
//! passed through as the API sends them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{Filter, QueryOptions, QueryPairs};
use crate::Result;

use super::SubscriberId;

/// A subscriber as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscriber {
    /// Subscriber ID
    pub id: SubscriberId,
    /// Email address
    pub email: String,
    /// Status such as `active`, `unsubscribed`, `bounced`, `junk`, `unconfirmed`
    pub status: String,
    /// How the subscriber was added
    pub source: Option<String>,
    /// Number of emails sent
    pub sent: u64,
    /// Number of opens
    pub opens_count: u64,
    /// Number of clicks
    pub clicks_count: u64,
    /// Open rate
    pub open_rate: f64,
    /// Click rate
    pub click_rate: f64,
    /// Signup IP address
    pub ip_address: Option<String>,
    /// Subscription timestamp, `YYYY-MM-DD HH:MM:SS`
    pub subscribed_at: Option<String>,
    /// Unsubscription timestamp
    pub unsubscribed_at: Option<String>,
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Last update timestamp
    pub updated_at: Option<String>,
    /// Custom field values keyed by field key
    pub fields: HashMap<String, Value>,
    /// Groups the subscriber belongs to
    pub groups: Vec<Value>,
    /// Double opt-in confirmation timestamp
    pub opted_in_at: Option<String>,
    /// Double opt-in confirmation IP
    pub optin_ip: Option<String>,
}

/// Body for creating or updating a subscriber.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpsertSubscriber {
    /// Email address; required on create
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    /// Custom field values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, Value>>,
    /// Group IDs to add the subscriber to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    /// Status to set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Subscription timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed_at: Option<String>,
    /// Signup IP address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Double opt-in confirmation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opted_in_at: Option<String>,
    /// Double opt-in confirmation IP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optin_ip: Option<String>,
    /// Unsubscription timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribed_at: Option<String>,
}

impl UpsertSubscriber {
    /// Body for the given email address.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }
}

/// Query options for listing subscribers.
///
/// # Example
///
/// ```
/// use mailerlite_rs::{Filter, ListSubscriberOptions};
///
/// let options = ListSubscriberOptions::new()
///     .with_limit(100)
///     .with_filter(Filter::new("status", "active"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSubscriberOptions {
    /// Filter criterion, e.g. `status=active`
    pub filter: Option<Filter>,
    /// Results per page
    pub limit: Option<u32>,
    /// Page number
    pub page: Option<u32>,
    /// Cursor taken from a previous page's links
    pub page_token: Option<String>,
}

impl ListSubscriberOptions {
    /// Options with no parameters set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page cursor.
    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }
}

impl QueryOptions for ListSubscriberOptions {
    fn query_pairs(&self) -> Result<QueryPairs> {
        Ok(QueryPairs::new()
            .push_opt("limit", self.limit)
            .push_opt("page", self.page)
            .push_non_empty("page_token", self.page_token.as_deref().unwrap_or_default()))
    }

    fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }
}
