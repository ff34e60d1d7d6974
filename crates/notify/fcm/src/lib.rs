//! FCM Push Notifications
//!
//! Firebase Cloud Messaging HTTP v1 delivery authenticated with a service account.

mod auth;
mod client;
mod credentials;
mod global;
mod traits;

pub use client::*;
pub use credentials::*;
pub use global::*;
pub use traits::*;
