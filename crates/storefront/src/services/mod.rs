//! Business logic services for storefront.
//!
//! # Services
//!
//! - `shoppers` - In-memory carts and trails keyed by shopper
//! - `cart` - Cart operations with activity logging
//! - `trail` - Pointer trail recording

pub mod cart;
pub mod shoppers;
pub mod trail;

pub use cart::{ActivityLog, current_cart, with_cart};
pub use shoppers::ShopperStore;
pub use trail::{current_trail, record_point};
