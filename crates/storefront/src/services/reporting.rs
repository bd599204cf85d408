//! Read-only store summary for the admin view.

use std::collections::HashSet;

use shopfront_core::{OrderStatus, Price};

use crate::models::Order;

/// Aggregate figures over a set of orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderSummary {
    /// Sum of every order total, whatever its status.
    pub revenue: Price,
    pub order_count: usize,
    pub pending_count: usize,
    /// Number of distinct user ids that placed an order.
    pub customer_count: usize,
}

impl OrderSummary {
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        let customers: HashSet<_> = orders.iter().map(Order::user_id).collect();
        Self {
            revenue: orders.iter().map(Order::total).sum(),
            order_count: orders.len(),
            pending_count: orders
                .iter()
                .filter(|o| o.status() == OrderStatus::Pending)
                .count(),
            customer_count: customers.len(),
        }
    }
}
