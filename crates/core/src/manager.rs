//! The cart manager: the only place a cart is mutated.
//!
//! # Operations
//!
//! - [`CartManager::add`] - one more unit of a product (new line at quantity 1)
//! - [`CartManager::remove`] - one less unit; deletes the line at quantity 1;
//!   silent no-op when the product is not in the cart
//! - [`CartManager::checkout`] - report the total, then reset to empty
//!
//! None of these can fail. After each effective mutation every subscribed
//! [`CartObserver`] receives a [`CartEvent`].

use std::fmt;

use crate::cart::{Cart, CartLine, Receipt};
use crate::catalog::Product;
use crate::events::{CartEvent, CartObserver};
use crate::types::{Price, ProductId};

/// Owns a cart and notifies observers about changes to it.
#[derive(Default)]
pub struct CartManager {
    cart: Cart,
    observers: Vec<Box<dyn CartObserver + Send>>,
}

impl CartManager {
    /// Create a manager with an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume managing an existing cart (e.g. one loaded from a session).
    #[must_use]
    pub fn from_cart(cart: Cart) -> Self {
        Self {
            cart,
            observers: Vec::new(),
        }
    }

    /// Register an observer for all subsequent mutations.
    pub fn subscribe(&mut self, observer: impl CartObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Add one unit of `product`, returning the line's new quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        let quantity = self.cart.add(product);
        self.notify(&CartEvent::ItemAdded {
            product_id: product.id,
            quantity,
        });
        quantity
    }

    /// Remove one unit of `product`.
    ///
    /// Returns `None` (and changes nothing) if the product is not in the
    /// cart, otherwise the remaining quantity, which is `0` when the line
    /// was deleted.
    pub fn remove(&mut self, product: &Product) -> Option<u32> {
        let remaining = self.cart.remove(product.id)?;
        self.notify(&CartEvent::ItemRemoved {
            product_id: product.id,
            remaining,
        });
        Some(remaining)
    }

    /// Check out: report the current total and reset the cart.
    ///
    /// Always succeeds; an empty cart yields a receipt with a zero total.
    pub fn checkout(&mut self) -> Receipt {
        let receipt = Receipt::from_lines(self.cart.take());
        self.notify(&CartEvent::CheckedOut(receipt.clone()));
        receipt
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current total, recomputed from the lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.cart.line(product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Give up the cart, dropping all observers.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    fn notify(&mut self, event: &CartEvent) {
        for observer in &mut self.observers {
            observer.on_event(event, &self.cart);
        }
    }
}

impl fmt::Debug for CartManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::catalog::Catalog;
    use crate::events::channel_observer;

    fn product(catalog: &Catalog, id: u32) -> Product {
        catalog.lookup(ProductId::new(id)).unwrap().clone()
    }

    #[test]
    fn test_sparkler_scenario() {
        let catalog = Catalog::firecrackers();
        let sparkler = product(&catalog, 1);
        let mut manager = CartManager::new();

        manager.add(&sparkler);
        manager.add(&sparkler);
        assert_eq!(manager.cart().lines().len(), 1);
        assert_eq!(manager.line(sparkler.id).unwrap().quantity(), 2);
        assert_eq!(manager.total(), Price::new(10));

        assert_eq!(manager.remove(&sparkler), Some(1));
        assert_eq!(manager.line(sparkler.id).unwrap().quantity(), 1);
        assert_eq!(manager.total(), Price::new(5));

        assert_eq!(manager.remove(&sparkler), Some(0));
        assert!(manager.is_empty());
        assert_eq!(manager.total(), Price::ZERO);
    }

    #[test]
    fn test_remove_missing_product_is_noop() {
        let catalog = Catalog::firecrackers();
        let mut manager = CartManager::new();
        assert_eq!(manager.remove(&product(&catalog, 4)), None);
        assert!(manager.is_empty());

        manager.add(&product(&catalog, 2));
        let before = manager.cart().clone();
        assert_eq!(manager.remove(&product(&catalog, 5)), None);
        assert_eq!(manager.cart(), &before);
        assert_eq!(manager.total(), Price::new(10));
    }

    #[test]
    fn test_checkout_reports_total_then_resets() {
        let catalog = Catalog::firecrackers();
        let mut manager = CartManager::new();
        manager.add(&product(&catalog, 3));
        manager.add(&product(&catalog, 5));
        manager.add(&product(&catalog, 5));

        let receipt = manager.checkout();
        assert_eq!(receipt.total, Price::new(65));
        assert_eq!(receipt.item_count, 3);
        assert_eq!(receipt.lines.len(), 2);

        assert!(manager.is_empty());
        assert_eq!(manager.total(), Price::ZERO);
        assert_eq!(manager.item_count(), 0);
    }

    #[test]
    fn test_checkout_empty_cart_reports_zero() {
        let mut manager = CartManager::new();
        let receipt = manager.checkout();
        assert_eq!(receipt.total, Price::ZERO);
        assert!(receipt.lines.is_empty());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_observers_receive_events_in_order() {
        let catalog = Catalog::firecrackers();
        let bomb = product(&catalog, 4);
        let (tx, rx) = mpsc::channel();
        let mut manager = CartManager::new();
        manager.subscribe(channel_observer(tx));

        manager.add(&bomb);
        manager.add(&bomb);
        manager.remove(&bomb);
        manager.remove(&product(&catalog, 1));
        let receipt = manager.checkout();

        let events: Vec<CartEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                CartEvent::ItemAdded {
                    product_id: bomb.id,
                    quantity: 1
                },
                CartEvent::ItemAdded {
                    product_id: bomb.id,
                    quantity: 2
                },
                CartEvent::ItemRemoved {
                    product_id: bomb.id,
                    remaining: 1
                },
                CartEvent::CheckedOut(receipt),
            ]
        );
    }

    #[test]
    fn test_observer_sees_updated_cart() {
        let catalog = Catalog::firecrackers();
        let (tx, rx) = mpsc::channel();
        let mut manager = CartManager::new();
        manager.subscribe(move |_: &CartEvent, cart: &Cart| {
            let _ = tx.send(cart.total());
        });

        manager.add(&product(&catalog, 2));
        manager.add(&product(&catalog, 3));
        manager.checkout();

        let totals: Vec<Price> = rx.try_iter().collect();
        assert_eq!(totals, [Price::new(10), Price::new(25), Price::ZERO]);
    }

    #[test]
    fn test_from_cart_resumes_state() {
        let catalog = Catalog::firecrackers();
        let mut first = CartManager::new();
        first.add(&product(&catalog, 1));
        let cart = first.into_cart();

        let mut resumed = CartManager::from_cart(cart);
        resumed.add(&product(&catalog, 1));
        assert_eq!(resumed.total(), Price::new(10));
    }

    mod property {
        use std::collections::BTreeMap;

        use proptest::prelude::*;

        use super::*;

        #[derive(Debug, Clone, Copy)]
        enum Op {
            Add(u32),
            Remove(u32),
            Checkout,
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => (1_u32..=5).prop_map(Op::Add),
                4 => (1_u32..=6).prop_map(Op::Remove),
                1 => Just(Op::Checkout),
            ]
        }

        /// Quantities per product and a running total, kept by the cart rules
        /// independently of `Cart`.
        #[derive(Debug, Default)]
        struct Model {
            quantities: BTreeMap<ProductId, u32>,
            total: u64,
        }

        impl Model {
            fn add(&mut self, product: &Product) -> u32 {
                let quantity = self.quantities.entry(product.id).or_insert(0);
                *quantity += 1;
                self.total += product.price.amount();
                *quantity
            }

            fn remove(&mut self, product: &Product) -> Option<u32> {
                let quantity = self.quantities.get_mut(&product.id)?;
                *quantity -= 1;
                self.total -= product.price.amount();
                let remaining = *quantity;
                if remaining == 0 {
                    self.quantities.remove(&product.id);
                }
                Some(remaining)
            }

            fn checkout(&mut self) -> u64 {
                self.quantities.clear();
                std::mem::take(&mut self.total)
            }
        }

        proptest! {
            #[test]
            fn cart_follows_model_after_every_step(ops in prop::collection::vec(arb_op(), 0..64)) {
                let mut products = Catalog::firecrackers().iter().cloned().collect::<Vec<_>>();
                // An id outside the catalog, to exercise removal of absent products.
                products.push(Product::new(6, "Ghost", 7));
                let product = |id: u32| products.iter().find(|p| p.id.as_u32() == id).unwrap();

                let mut manager = CartManager::new();
                let mut model = Model::default();
                for op in ops {
                    match op {
                        Op::Add(id) => {
                            let product = product(id);
                            prop_assert_eq!(manager.add(product), model.add(product));
                        }
                        Op::Remove(id) => {
                            let product = product(id);
                            prop_assert_eq!(manager.remove(product), model.remove(product));
                        }
                        Op::Checkout => {
                            let receipt = manager.checkout();
                            prop_assert_eq!(receipt.total, Price::new(model.checkout()));
                        }
                    }

                    prop_assert_eq!(manager.total(), Price::new(model.total));
                    let quantities: BTreeMap<ProductId, u32> = manager
                        .cart()
                        .lines()
                        .iter()
                        .map(|line| (line.product_id, line.quantity()))
                        .collect();
                    prop_assert_eq!(manager.cart().lines().len(), quantities.len());
                    prop_assert_eq!(&quantities, &model.quantities);
                }
            }
        }
    }
}
