//! Firecracker Core - catalog, cart and trail domain library.
//!
//! This crate provides the domain logic used by the storefront:
//! - `storefront` - The single-page shop served over HTTP
//!
//! # Architecture
//!
//! The core crate contains only types and state machines - no I/O, no
//! sessions, no HTTP. Request handlers load a [`Cart`], drive it through a
//! [`CartManager`] and store it back.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices and pointer positions
//! - [`catalog`] - The fixed product list
//! - [`cart`] - Cart lines, totals and checkout receipts
//! - [`manager`] - Add, remove and checkout with observer notifications
//! - [`events`] - Cart events and the observer trait
//! - [`trail`] - Bounded pointer trail

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod events;
pub mod manager;
pub mod trail;
pub mod types;

pub use cart::{Cart, CartLine, Receipt};
pub use catalog::{Catalog, CatalogError, Product};
pub use events::{CartEvent, CartObserver, channel_observer};
pub use manager::CartManager;
pub use trail::{DEFAULT_TRAIL_CAPACITY, Trail};
pub use types::*;
