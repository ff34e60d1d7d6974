//! Notification Core Types
//!
//! Request, message and result types shared by the send-push crates.

mod message;
mod request;
mod result;

pub use message::*;
pub use request::*;
pub use result::*;
