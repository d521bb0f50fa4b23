//! Cart change notifications.
//!
//! Rendering and logging layers subscribe to a [`crate::CartManager`] with a
//! [`CartObserver`] instead of polling the cart. Observers run synchronously,
//! after the cart has already changed, in the order they were subscribed.

use std::sync::mpsc::Sender;

use serde::Serialize;

use crate::cart::{Cart, Receipt};
use crate::types::ProductId;

/// A state change on a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    /// One unit was added; `quantity` is the line's new quantity.
    ItemAdded {
        product_id: ProductId,
        quantity: u32,
    },
    /// One unit was removed; `remaining` is 0 when the line was deleted.
    ItemRemoved {
        product_id: ProductId,
        remaining: u32,
    },
    /// The cart was checked out and reset.
    CheckedOut(Receipt),
}

/// Receives cart events.
pub trait CartObserver {
    /// Called after every cart mutation with the cart's new state.
    fn on_event(&mut self, event: &CartEvent, cart: &Cart);
}

impl<F> CartObserver for F
where
    F: FnMut(&CartEvent, &Cart),
{
    fn on_event(&mut self, event: &CartEvent, cart: &Cart) {
        self(event, cart);
    }
}

/// An observer that forwards events into a channel.
///
/// Sends to a dropped receiver are ignored.
pub fn channel_observer(tx: Sender<CartEvent>) -> impl CartObserver + Send {
    move |event: &CartEvent, _cart: &Cart| {
        let _ = tx.send(event.clone());
    }
}
