//! Data models for the MailerLite API.
//!
//! - [`primitives`] - Newtype identifiers like `SubscriberId`
//! - [`pagination`] - List envelope, navigation links and page metadata
//! - [`subscriber`] - Subscriber shapes and list options

pub mod pagination;
pub mod primitives;
pub mod subscriber;

pub use pagination::*;
pub use primitives::*;
pub use subscriber::*;
