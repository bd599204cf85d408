//! Cart manager.
//!
//! Owns the session's [`Cart`] and writes it through to the `cart` key after
//! every change. Out-of-range input (zero or negative quantities, unknown
//! product ids) is a silent no-op, never an error; the only failure a caller
//! can see is the store refusing a write.

use tracing::{debug, info, instrument, warn};

use shopfront_core::{Price, ProductId};

use crate::error::Result;
use crate::models::{Cart, CartLineItem, Product};
use crate::storage::{KeyValueStore, RecordError, keys, load_json, save_json};

/// Session-scoped cart with write-through persistence.
///
/// There is one manager per session; it is passed explicitly to whatever
/// needs the cart (the order workflow at checkout, sign-out).
#[derive(Debug)]
pub struct CartManager<S> {
    store: S,
    cart: Cart,
}

impl<S: KeyValueStore> CartManager<S> {
    /// Restore the cart saved in `store`, or start empty.
    ///
    /// A stored cart that cannot be decoded is treated as no prior state.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself cannot be read.
    #[instrument(skip(store))]
    pub fn load(store: S) -> Result<Self> {
        let cart = match load_json::<Cart, _>(&store, keys::CART) {
            Ok(Some(cart)) => {
                debug!(lines = cart.items().len(), "Restored cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(RecordError::Decode { source, .. }) => {
                warn!(error = %source, "Discarding unreadable stored cart");
                Cart::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { store, cart })
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// A zero quantity does nothing. Stock is not checked here.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be persisted.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) -> Result<()> {
        if !self.cart.add(product, quantity) {
            debug!("Ignoring add with zero quantity");
            return Ok(());
        }
        info!(quantity, item_count = self.cart.item_count(), "Added to cart");
        self.persist()
    }

    /// Replace the quantity of an existing line.
    ///
    /// Quantities below one and unknown product ids are ignored; use
    /// [`remove_from_cart`](Self::remove_from_cart) to drop a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: &ProductId, new_quantity: i64) -> Result<()> {
        if !self.cart.set_quantity(product_id, new_quantity) {
            debug!("Quantity update had no effect");
            return Ok(());
        }
        info!(item_count = self.cart.item_count(), "Updated cart quantity");
        self.persist()
    }

    /// Remove the line for `product_id`; absent ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> Result<()> {
        if self.cart.remove(product_id).is_none() {
            debug!("Product not in cart");
            return Ok(());
        }
        info!(item_count = self.cart.item_count(), "Removed from cart");
        self.persist()
    }

    /// Empty the cart and persist the empty state.
    ///
    /// # Errors
    ///
    /// Returns an error if the empty cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<()> {
        self.cart.clear();
        info!("Cleared cart");
        self.persist()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self) -> Result<()> {
        save_json(&self.store, keys::CART, &self.cart)?;
        Ok(())
    }
}
