//! Device Token Storage
//!
//! Read-only access to the device tokens registered on user profiles.

mod backend;
mod postgres;
mod rest;
mod schema;
mod traits;

pub use backend::TokenBackend;
pub use postgres::PgTokenStore;
pub use rest::RestTokenStore;
pub use traits::*;
