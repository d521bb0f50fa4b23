//! Cart operations on the shopper's server-side cart.
//!
//! Every cart mutation follows the same shape: lock the shopper's cart,
//! drive it through a [`CartManager`] with an [`ActivityLog`] subscribed,
//! and put the result back before unlocking. The lock is taken after the
//! last `.await`, so neither the guard nor the manager crosses one.

use std::sync::Mutex;

use firecracker_core::{Cart, CartEvent, CartManager, CartObserver};
use tower_sessions::Session;

use crate::error::{AppError, add_breadcrumb};
use crate::models::session::{find_shopper_id, shopper_id};
use crate::services::shoppers::lock;
use crate::state::AppState;

/// Logs cart events and records them as Sentry breadcrumbs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityLog;

impl CartObserver for ActivityLog {
    fn on_event(&mut self, event: &CartEvent, cart: &Cart) {
        let total = cart.total().to_string();
        match event {
            CartEvent::ItemAdded {
                product_id,
                quantity,
            } => {
                tracing::info!(%product_id, quantity, %total, "Added to cart");
                add_breadcrumb(
                    "cart",
                    "Added to cart",
                    Some(&[("product_id", product_id.to_string().as_str())]),
                );
            }
            CartEvent::ItemRemoved {
                product_id,
                remaining,
            } => {
                tracing::info!(%product_id, remaining, %total, "Removed from cart");
                add_breadcrumb(
                    "cart",
                    "Removed from cart",
                    Some(&[("product_id", product_id.to_string().as_str())]),
                );
            }
            CartEvent::CheckedOut(receipt) => {
                tracing::info!(
                    total = %receipt.total,
                    items = receipt.item_count,
                    "Checked out"
                );
                add_breadcrumb(
                    "cart",
                    "Checked out",
                    Some(&[("total", receipt.total.to_string().as_str())]),
                );
            }
        }
    }
}

/// Run `operation` against the shopper's cart.
///
/// Returns the operation's output together with the updated cart.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store cannot be read or
/// written, or `AppError::Internal` if the cart lock is poisoned.
pub async fn with_cart<T, F>(
    state: &AppState,
    session: &Session,
    operation: F,
) -> Result<(T, Cart), AppError>
where
    F: FnOnce(&mut CartManager) -> T + Send,
{
    let shopper = shopper_id(session).await?;
    let entry = state.shoppers().cart(shopper);
    apply(&entry, operation)
}

/// The shopper's current cart; empty if they have none yet.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store cannot be read, or
/// `AppError::Internal` if the cart lock is poisoned.
pub async fn current_cart(state: &AppState, session: &Session) -> Result<Cart, AppError> {
    let Some(shopper) = find_shopper_id(session).await? else {
        return Ok(Cart::new());
    };
    let Some(entry) = state.shoppers().find_cart(shopper) else {
        return Ok(Cart::new());
    };
    let cart = lock(&entry)?.clone();
    Ok(cart)
}

fn apply<T, F>(entry: &Mutex<Cart>, operation: F) -> Result<(T, Cart), AppError>
where
    F: FnOnce(&mut CartManager) -> T,
{
    let mut cart = lock(entry)?;
    let mut manager = CartManager::from_cart(std::mem::take(&mut *cart));
    manager.subscribe(ActivityLog);

    let output = operation(&mut manager);
    *cart = manager.into_cart();
    Ok((output, cart.clone()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use firecracker_core::{Catalog, Point, Price, ProductId};
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::config::StorefrontConfig;

    fn state() -> AppState {
        AppState::new(StorefrontConfig::default(), Catalog::firecrackers())
    }

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_with_cart_keeps_cart_between_calls() {
        let state = state();
        let session = session();
        let sparkler = state.catalog().lookup(ProductId::new(1)).unwrap().clone();

        with_cart(&state, &session, |manager| manager.add(&sparkler))
            .await
            .unwrap();
        let (quantity, cart) = with_cart(&state, &session, |manager| manager.add(&sparkler))
            .await
            .unwrap();

        assert_eq!(quantity, 2);
        assert_eq!(cart.total(), Price::new(10));
        assert_eq!(current_cart(&state, &session).await.unwrap(), cart);
    }

    #[tokio::test]
    async fn test_current_cart_without_shopper_is_empty() {
        let state = state();
        let session = session();
        assert!(current_cart(&state, &session).await.unwrap().is_empty());
        assert_eq!(find_shopper_id(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_trail_update_during_add_keeps_item() {
        let state = state();
        let session = session();
        let rocket = state.catalog().lookup(ProductId::new(3)).unwrap().clone();
        let shopper = shopper_id(&session).await.unwrap();
        let trail = state.shoppers().trail(shopper);

        // The pointer moves while the add holds the cart.
        let (_, cart) = with_cart(&state, &session, |manager| {
            lock(&trail).unwrap().push(Point::new(4, 2));
            manager.add(&rocket)
        })
        .await
        .unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(current_cart(&state, &session).await.unwrap().total(), Price::new(15));
        assert_eq!(lock(&trail).unwrap().cursor(), Some(Point::new(4, 2)));
    }
}
