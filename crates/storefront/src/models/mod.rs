//! Storefront models.
//!
//! Domain types live in `firecracker-core`; this module only adds how a
//! shopper is recognised across requests.

pub mod session;

pub use session::ShopperId;
