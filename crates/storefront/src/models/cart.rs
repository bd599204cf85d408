//! Cart aggregate.
//!
//! [`Cart`] is a plain value: it knows how to mutate itself while keeping its
//! invariants, but not how to persist itself. Persistence lives in
//! [`CartManager`](crate::services::cart::CartManager).

use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopfront_core::{Price, ProductId};

use super::Product;

/// One product and quantity pairing within a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: ProductId,
    /// Copy of the product as it was when first added.
    pub product: Product,
    pub quantity: NonZeroU32,
}

impl CartLineItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity.get())
    }
}

/// Reasons a stored cart is rejected on decode.
#[derive(Debug, Error)]
pub enum CartShapeError {
    #[error("product {0} appears in more than one line item")]
    DuplicateProduct(ProductId),

    #[error("line item for {line} holds a snapshot of product {snapshot}")]
    MismatchedSnapshot { line: ProductId, snapshot: ProductId },
}

#[derive(Deserialize)]
struct CartRecord {
    items: Vec<CartLineItem>,
}

/// The in-progress shopping cart.
///
/// Line items keep insertion order and are unique per product id. The total
/// and item count are always computed from the lines, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CartRecord")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl TryFrom<CartRecord> for Cart {
    type Error = CartShapeError;

    fn try_from(record: CartRecord) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(record.items.len());
        for line in &record.items {
            if line.product_id != line.product.id {
                return Err(CartShapeError::MismatchedSnapshot {
                    line: line.product_id.clone(),
                    snapshot: line.product.id.clone(),
                });
            }
            if !seen.insert(&line.product_id) {
                return Err(CartShapeError::DuplicateProduct(line.product_id.clone()));
            }
        }
        Ok(Self {
            items: record.items,
        })
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| &line.product_id == product_id)
    }

    /// Sum of every line total.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Sum of every line quantity.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` units of `product`.
    ///
    /// Merges into an existing line for the same product. Returns `false`
    /// and does nothing when `quantity` is zero.
    pub fn add(&mut self, product: &Product, quantity: u32) -> bool {
        let Some(quantity) = NonZeroU32::new(quantity) else {
            return false;
        };
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(quantity.get());
        } else {
            self.items.push(CartLineItem {
                product_id: product.id.clone(),
                product: product.clone(),
                quantity,
            });
        }
        true
    }

    /// Replace the quantity of an existing line.
    ///
    /// Quantities below one are ignored rather than removing the line, as is
    /// an unknown product id. Returns whether the cart changed.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        let Some(quantity) = u32::try_from(quantity).ok().and_then(NonZeroU32::new) else {
            return false;
        };
        match self.line_mut(product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove the line for `product_id`, returning it if it was present.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartLineItem> {
        let index = self
            .items
            .iter()
            .position(|line| &line.product_id == product_id)?;
        Some(self.items.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLineItem> {
        self.items
            .iter_mut()
            .find(|line| &line.product_id == product_id)
    }
}
