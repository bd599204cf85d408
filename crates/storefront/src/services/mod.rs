//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `cart` - Session cart with write-through persistence
//! - `orders` - Checkout and order status transitions
//! - `auth` - Email sign-in and the current-user accessor
//! - `reporting` - Admin summary over the order collection

pub mod auth;
pub mod cart;
pub mod orders;
pub mod reporting;

pub use auth::{AuthError, AuthSession};
pub use cart::CartManager;
pub use orders::OrderWorkflow;
pub use reporting::OrderSummary;
