//! Newtype identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A strongly-typed subscriber ID.
///
/// The API returns IDs as numeric strings; they are kept as strings to
/// avoid precision loss.
///
/// # Example
///
/// ```
/// use mailerlite_rs::SubscriberId;
///
/// let id = SubscriberId::new("31897397363737859");
/// assert_eq!(id.to_string(), "31897397363737859");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(String);

impl SubscriberId {
    /// Create a new subscriber ID.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubscriberId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for SubscriberId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SubscriberId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
