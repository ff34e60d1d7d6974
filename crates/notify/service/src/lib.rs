//! Notification Service Layer
//!
//! Turns validated send-push requests into provider calls.

mod dispatcher;

pub use dispatcher::Dispatcher;
