//! Domain models for the storefront.
//!
//! Every record here is persisted as JSON with camelCase field names and is
//! validated on decode: a quantity of zero, a negative price or a malformed
//! email is rejected rather than coerced.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartLineItem};
pub use order::{CheckoutField, CustomerInfo, Order};
pub use product::Product;
pub use user::User;
