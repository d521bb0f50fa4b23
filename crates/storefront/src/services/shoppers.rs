//! Server-side shopper state.
//!
//! Carts and pointer trails are kept in memory, keyed by [`ShopperId`],
//! each behind its own lock. A request holds the lock for the whole
//! read-modify-write, so concurrent cart clicks and trail updates from one
//! shopper are applied one after another instead of overwriting each other.
//! Entries idle for longer than the session lifetime are evicted.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use firecracker_core::{Cart, Trail};
use moka::sync::Cache;

use crate::error::AppError;
use crate::models::ShopperId;

/// Upper bound on concurrently tracked shoppers.
const MAX_SHOPPERS: u64 = 100_000;

/// In-memory carts and trails for all shoppers.
///
/// Cheaply cloneable; clones share the same entries.
#[derive(Clone)]
pub struct ShopperStore {
    carts: Cache<ShopperId, Arc<Mutex<Cart>>>,
    trails: Cache<ShopperId, Arc<Mutex<Trail>>>,
    trail_capacity: usize,
}

impl ShopperStore {
    /// Create an empty store.
    ///
    /// # Arguments
    ///
    /// * `idle` - How long an untouched cart or trail is kept
    /// * `trail_capacity` - Length of every new trail
    #[must_use]
    pub fn new(idle: Duration, trail_capacity: usize) -> Self {
        Self {
            carts: Cache::builder()
                .max_capacity(MAX_SHOPPERS)
                .time_to_idle(idle)
                .build(),
            trails: Cache::builder()
                .max_capacity(MAX_SHOPPERS)
                .time_to_idle(idle)
                .build(),
            trail_capacity,
        }
    }

    /// The shopper's cart, created empty on first use.
    #[must_use]
    pub fn cart(&self, shopper: ShopperId) -> Arc<Mutex<Cart>> {
        self.carts
            .get_with(shopper, || Arc::new(Mutex::new(Cart::new())))
    }

    /// The shopper's cart, if they have one.
    #[must_use]
    pub fn find_cart(&self, shopper: ShopperId) -> Option<Arc<Mutex<Cart>>> {
        self.carts.get(&shopper)
    }

    /// The shopper's trail, created empty on first use.
    #[must_use]
    pub fn trail(&self, shopper: ShopperId) -> Arc<Mutex<Trail>> {
        let capacity = self.trail_capacity;
        self.trails
            .get_with(shopper, || Arc::new(Mutex::new(Trail::with_capacity(capacity))))
    }

    /// The shopper's trail, if they have one.
    #[must_use]
    pub fn find_trail(&self, shopper: ShopperId) -> Option<Arc<Mutex<Trail>>> {
        self.trails.get(&shopper)
    }

    /// An empty trail of the configured length.
    #[must_use]
    pub fn empty_trail(&self) -> Trail {
        Trail::with_capacity(self.trail_capacity)
    }
}

/// Lock a shopper entry.
///
/// # Errors
///
/// Returns `AppError::Internal` if a previous holder panicked.
pub fn lock<T>(entry: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
    entry
        .lock()
        .map_err(|_| AppError::Internal("shopper state lock poisoned".to_string()))
}
