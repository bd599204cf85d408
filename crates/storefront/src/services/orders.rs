//! Order workflow: checkout and order status changes.
//!
//! Orders live as one JSON array under the `orders` key. Every write is a
//! full read-modify-write of that array with no locking, so two processes
//! sharing a store can lose each other's updates. Within one process calls
//! are sequential and never interleave.

use tracing::{debug, info, instrument};

use shopfront_core::{OrderId, OrderStatus, UserId};

use crate::error::{Result, StoreError, ValidationError};
use crate::models::{CheckoutField, CustomerInfo, Order};
use crate::services::cart::CartManager;
use crate::storage::{KeyValueStore, keys, load_json, save_json};

/// Converts carts into orders and applies status transitions.
#[derive(Debug, Clone)]
pub struct OrderWorkflow<S> {
    store: S,
}

impl<S: KeyValueStore> OrderWorkflow<S> {
    /// Create a workflow over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Place an order for everything in `cart`.
    ///
    /// On success the order is appended to the stored collection with status
    /// `confirmed`, the cart is cleared, and the new order is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] naming every missing field when the
    /// cart is empty or any customer field is blank; nothing is changed in
    /// that case. Returns [`StoreError::Record`] if the order collection cannot
    /// be read or written, or if the cart cannot be cleared afterwards (the
    /// order is already stored at that point).
    #[instrument(skip(self, cart, customer_info), fields(user_id = %user_id))]
    pub fn checkout<C: KeyValueStore>(
        &self,
        cart: &mut CartManager<C>,
        customer_info: CustomerInfo,
        user_id: &UserId,
    ) -> Result<Order> {
        let mut missing = Vec::new();
        if cart.cart().is_empty() {
            missing.push(CheckoutField::Items);
        }
        missing.extend(customer_info.blank_fields());
        if !missing.is_empty() {
            debug!(?missing, "Rejecting checkout");
            return Err(ValidationError { fields: missing }.into());
        }

        let order = Order::confirmed(
            user_id.clone(),
            cart.items().to_vec(),
            cart.total(),
            customer_info,
        );

        let mut orders = self.load_orders()?;
        orders.push(order.clone());
        self.save_orders(&orders)?;
        info!(
            order_id = %order.id(),
            total = %order.total(),
            items = order.item_count(),
            "Order placed"
        );

        cart.clear_cart()?;
        Ok(order)
    }

    /// Orders placed by `user_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Record`] if the collection cannot be read.
    pub fn list_orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>> {
        let orders: Vec<Order> = self
            .load_orders()?
            .into_iter()
            .filter(|order| order.user_id() == user_id)
            .collect();
        debug!(%user_id, count = orders.len(), "Listed orders for user");
        Ok(orders)
    }

    /// Every stored order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Record`] if the collection cannot be read.
    pub fn list_all_orders(&self) -> Result<Vec<Order>> {
        self.load_orders()
    }

    /// Move an order to `new_status` if the lifecycle allows it.
    ///
    /// Returns the updated order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id and
    /// [`StoreError::InvalidTransition`] when the current status does not
    /// permit the change. Neither case writes anything.
    #[instrument(skip(self))]
    pub fn transition_status(&self, order_id: &OrderId, new_status: OrderStatus) -> Result<Order> {
        let mut orders = self.load_orders()?;
        let order = orders
            .iter_mut()
            .find(|order| order.id() == order_id)
            .ok_or_else(|| StoreError::NotFound(order_id.clone()))?;

        let from = order.status();
        if !from.can_transition_to(new_status) {
            return Err(StoreError::InvalidTransition {
                order_id: order_id.clone(),
                from,
                to: new_status,
            });
        }

        order.set_status(new_status);
        let updated = order.clone();
        self.save_orders(&orders)?;
        info!(%from, to = %new_status, "Order status changed");
        Ok(updated)
    }

    /// Cancel a confirmed order.
    ///
    /// # Errors
    ///
    /// See [`transition_status`](Self::transition_status).
    pub fn cancel(&self, order_id: &OrderId) -> Result<Order> {
        self.transition_status(order_id, OrderStatus::Cancelled)
    }

    /// Request a return for a confirmed order.
    ///
    /// # Errors
    ///
    /// See [`transition_status`](Self::transition_status).
    pub fn request_return(&self, order_id: &OrderId) -> Result<Order> {
        self.transition_status(order_id, OrderStatus::Returned)
    }

    fn load_orders(&self) -> Result<Vec<Order>> {
        Ok(load_json(&self.store, keys::ORDERS)?.unwrap_or_default())
    }

    fn save_orders(&self, orders: &[Order]) -> Result<()> {
        save_json(&self.store, keys::ORDERS, orders)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::{Price, ProductId};

    use super::*;
    use crate::models::Product;
    use crate::storage::{MemoryStore, RecordError};

    fn product(id: &str, cents: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(cents),
            images: Vec::new(),
            category: "Test".to_string(),
            stock: 10,
        }
    }

    fn valid_info() -> CustomerInfo {
        CustomerInfo {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "1 Loop Rd".to_string(),
            city: "Springfield".to_string(),
            payment_method: "PayPal".to_string(),
        }
    }

    fn setup() -> (MemoryStore, CartManager<MemoryStore>, OrderWorkflow<MemoryStore>) {
        let store = MemoryStore::new();
        let cart = CartManager::load(store.clone()).unwrap();
        let orders = OrderWorkflow::new(store.clone());
        (store, cart, orders)
    }

    #[test]
    fn test_checkout_creates_confirmed_order() {
        let (_, mut cart, orders) = setup();
        cart.add_to_cart(&product("a", 1000), 2).unwrap();
        cart.add_to_cart(&product("b", 500), 1).unwrap();
        assert_eq!(cart.total(), Price::from_cents(2500));
        assert_eq!(cart.item_count(), 3);

        let user = UserId::new("user1");
        let order = orders.checkout(&mut cart, valid_info(), &user).unwrap();

        assert_eq!(order.status(), OrderStatus::Confirmed);
        assert_eq!(order.total(), Price::from_cents(2500));
        assert_eq!(order.user_id(), &user);
        assert_eq!(cart.item_count(), 0);
        assert_eq!(orders.list_orders_for_user(&user).unwrap(), vec![order]);
    }

    #[test]
    fn test_checkout_snapshot_is_isolated_from_cart() {
        let (_, mut cart, orders) = setup();
        let a = product("a", 1000);
        cart.add_to_cart(&a, 2).unwrap();

        let order = orders
            .checkout(&mut cart, valid_info(), &UserId::new("u"))
            .unwrap();
        cart.add_to_cart(&a, 9).unwrap();

        assert_eq!(order.items().len(), 1);
        assert_eq!(order.items()[0].quantity.get(), 2);
        let stored = orders.list_all_orders().unwrap();
        assert_eq!(stored[0].items()[0].quantity.get(), 2);
    }

    #[test]
    fn test_checkout_rejects_blank_fields() {
        let (store, mut cart, orders) = setup();
        cart.add_to_cart(&product("a", 1000), 1).unwrap();

        let info = CustomerInfo {
            name: String::new(),
            ..valid_info()
        };
        let err = orders
            .checkout(&mut cart, info, &UserId::new("user1"))
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Validation(ValidationError { ref fields }) if fields == &[CheckoutField::Name]
        ));
        assert_eq!(cart.item_count(), 1);
        assert!(store.get(keys::ORDERS).unwrap().is_none());
    }

    #[test]
    fn test_checkout_rejects_empty_cart() {
        let (_, mut cart, orders) = setup();
        let info = CustomerInfo {
            phone: " ".to_string(),
            ..valid_info()
        };
        let err = orders
            .checkout(&mut cart, info, &UserId::new("user1"))
            .unwrap_err();
        let StoreError::Validation(validation) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(
            validation.fields,
            vec![CheckoutField::Items, CheckoutField::Phone]
        );
    }

    #[test]
    fn test_orders_filtered_by_user_in_insertion_order() {
        let (_, mut cart, orders) = setup();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        let mut placed = Vec::new();
        for (user, cents) in [(&alice, 100), (&bob, 200), (&alice, 300)] {
            cart.add_to_cart(&product("a", cents), 1).unwrap();
            placed.push(orders.checkout(&mut cart, valid_info(), user).unwrap());
        }

        let mine = orders.list_orders_for_user(&alice).unwrap();
        let totals: Vec<Price> = mine.iter().map(Order::total).collect();
        assert_eq!(totals, [Price::from_cents(100), Price::from_cents(300)]);
        assert_eq!(orders.list_all_orders().unwrap().len(), 3);
        assert!(orders.list_orders_for_user(&UserId::new("carol")).unwrap().is_empty());
    }

    #[test]
    fn test_cancel_succeeds_once() {
        let (_, mut cart, orders) = setup();
        cart.add_to_cart(&product("a", 100), 1).unwrap();
        let order = orders
            .checkout(&mut cart, valid_info(), &UserId::new("u"))
            .unwrap();

        let cancelled = orders.cancel(order.id()).unwrap();
        assert_eq!(cancelled.status(), OrderStatus::Cancelled);

        let err = orders.cancel(order.id()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidTransition {
                from: OrderStatus::Cancelled,
                to: OrderStatus::Cancelled,
                ..
            }
        ));
        assert_eq!(
            orders.list_all_orders().unwrap()[0].status(),
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn test_return_then_cancel_is_rejected() {
        let (_, mut cart, orders) = setup();
        cart.add_to_cart(&product("a", 100), 1).unwrap();
        let order = orders
            .checkout(&mut cart, valid_info(), &UserId::new("u"))
            .unwrap();

        orders.request_return(order.id()).unwrap();
        assert!(matches!(
            orders.cancel(order.id()),
            Err(StoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_transition_to_confirmed_is_rejected() {
        let (_, mut cart, orders) = setup();
        cart.add_to_cart(&product("a", 100), 1).unwrap();
        let order = orders
            .checkout(&mut cart, valid_info(), &UserId::new("u"))
            .unwrap();

        for target in [OrderStatus::Confirmed, OrderStatus::Pending] {
            assert!(matches!(
                orders.transition_status(order.id(), target),
                Err(StoreError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_transition_unknown_order() {
        let (_, _, orders) = setup();
        let missing = OrderId::new("nope");
        assert!(matches!(
            orders.cancel(&missing),
            Err(StoreError::NotFound(id)) if id == missing
        ));
    }

    #[test]
    fn test_corrupt_order_collection_is_reported() {
        let (store, _, orders) = setup();
        store.set(keys::ORDERS, "[{\"id\": 1}]").unwrap();
        assert!(matches!(
            orders.list_all_orders(),
            Err(StoreError::Record(RecordError::Decode { .. }))
        ));
    }
}
