//! Cart contents and checkout receipts.
//!
//! A [`Cart`] holds at most one [`CartLine`] per product, in the order the
//! products were first added. Quantities are never zero: a line whose
//! quantity would drop to zero is removed. The total is always derived from
//! the lines, never stored alongside them.
//!
//! Mutation goes through [`crate::CartManager`], which also notifies
//! observers. `Cart` itself is plain data so it can live in a session store.

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// One product's entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price captured from the catalog when the line was created.
    pub unit_price: Price,
    quantity: NonZeroU32,
}

impl CartLine {
    fn new(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Number of units of this product in the cart (always at least 1).
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity())
    }
}

/// An ordered collection of cart lines keyed by product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// All lines, in the order their products were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `product`, returning the line's new quantity.
    pub(crate) fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity();
        }

        self.lines.push(CartLine::new(product));
        1
    }

    /// Remove one unit of a product.
    ///
    /// Returns `None` if the product is not in the cart, otherwise the
    /// remaining quantity (`0` once the line has been deleted).
    pub(crate) fn remove(&mut self, product_id: ProductId) -> Option<u32> {
        let index = self
            .lines
            .iter()
            .position(|line| line.product_id == product_id)?;
        let line = self.lines.get_mut(index)?;

        if let Some(remaining) = NonZeroU32::new(line.quantity() - 1) {
            line.quantity = remaining;
            Some(remaining.get())
        } else {
            self.lines.remove(index);
            Some(0)
        }
    }

    /// Empty the cart, returning the lines it held.
    pub(crate) fn take(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }
}

/// What a checkout reports back to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub lines: Vec<CartLine>,
    pub item_count: u32,
    pub total: Price,
    pub checked_out_at: DateTime<Utc>,
}

impl Receipt {
    pub(crate) fn from_lines(lines: Vec<CartLine>) -> Self {
        let total = lines.iter().map(CartLine::line_total).sum();
        let item_count = lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity()));
        Self {
            lines,
            item_count,
            total,
            checked_out_at: Utc::now(),
        }
    }
}
