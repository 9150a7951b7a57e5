//! Domain models for storefront.
//!
//! Everything the storefront keeps between requests lives in the session:
//! the cart lines, the customer's details and a one-shot notification.

pub mod session;

pub use session::{StoredCartLine, keys as session_keys};
