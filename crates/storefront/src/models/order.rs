//! Order records and checkout input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_core::{OrderId, OrderStatus, Price, UserId};

use super::CartLineItem;

/// A value that must be present for checkout to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutField {
    /// The cart itself must hold at least one line.
    Items,
    Name,
    Email,
    Phone,
    Address,
    City,
    PaymentMethod,
}

impl CheckoutField {
    /// Wire name, matching the stored JSON field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::PaymentMethod => "paymentMethod",
        }
    }
}

impl std::fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shipping and payment details captured at checkout.
///
/// Every field is required. Nothing beyond presence is checked: the email is
/// not parsed, the address is not verified and the payment method is a label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub payment_method: String,
}

impl CustomerInfo {
    /// Fields that are empty or whitespace-only, in form order.
    #[must_use]
    pub fn blank_fields(&self) -> Vec<CheckoutField> {
        [
            (CheckoutField::Name, &self.name),
            (CheckoutField::Email, &self.email),
            (CheckoutField::Phone, &self.phone),
            (CheckoutField::Address, &self.address),
            (CheckoutField::City, &self.city),
            (CheckoutField::PaymentMethod, &self.payment_method),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// A completed checkout.
///
/// Everything except `status` is fixed at creation. The line items are an
/// owned copy of the cart, so nothing done to the cart or catalog afterwards
/// can reach a stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    items: Vec<CartLineItem>,
    total: Price,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    customer_info: CustomerInfo,
}

impl Order {
    /// Build a freshly confirmed order.
    pub(crate) fn confirmed(
        user_id: UserId,
        items: Vec<CartLineItem>,
        total: Price,
        customer_info: CustomerInfo,
    ) -> Self {
        Self {
            id: OrderId::generate(),
            user_id,
            items,
            total,
            status: OrderStatus::Confirmed,
            created_at: Utc::now(),
            customer_info,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Cart total at the moment of checkout.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn customer_info(&self) -> &CustomerInfo {
        &self.customer_info
    }

    /// Total units across every line.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    pub(crate) const fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled_info() -> CustomerInfo {
        CustomerInfo {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "1 Loop Rd".to_string(),
            city: "Springfield".to_string(),
            payment_method: "Credit Card".to_string(),
        }
    }

    #[test]
    fn test_blank_fields_none() {
        assert!(filled_info().blank_fields().is_empty());
    }

    #[test]
    fn test_blank_fields_reports_each() {
        let info = CustomerInfo {
            name: String::new(),
            city: "   ".to_string(),
            ..filled_info()
        };
        assert_eq!(
            info.blank_fields(),
            vec![CheckoutField::Name, CheckoutField::City]
        );
        assert_eq!(CustomerInfo::default().blank_fields().len(), 6);
    }

    #[test]
    fn test_order_json_shape() {
        let order = Order::confirmed(
            UserId::new("user1"),
            Vec::new(),
            Price::from_cents(2500),
            filled_info(),
        );
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["status"], "confirmed");
        assert_eq!(value["userId"], "user1");
        assert_eq!(value["total"], "25.00");
        assert_eq!(value["customerInfo"]["paymentMethod"], "Credit Card");
        assert!(value["createdAt"].is_string());

        let decoded: Order = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, order);
    }
}
