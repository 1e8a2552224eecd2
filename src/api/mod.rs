//! API service modules for MailerLite endpoints.
//!
//! Services are thin: they pick a path and payload shape and hand the call
//! to the client's request pipeline.

mod subscribers;

pub use subscribers::SubscribersService;
