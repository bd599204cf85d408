//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart to order, end to end, over a file-backed store
//! - `cart_properties` - Cart invariants across sequences of mutations
//! - `order_lifecycle` - Status transitions and persistence of order records
//!
//! This library holds the fixtures those tests share.

use std::path::Path;

use shopfront_core::{Email, Price, ProductId};
use shopfront_storefront::models::{CustomerInfo, Product};
use shopfront_storefront::{AuthSession, CartManager, FileStore, OrderWorkflow};

/// A product with the given id and price in cents.
#[must_use]
pub fn product(id: &str, cents: u64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        description: format!("Description of {id}"),
        price: Price::from_cents(cents),
        images: vec![format!("https://img.example/{id}.jpg")],
        category: "Test".to_string(),
        stock: 100,
    }
}

/// Customer details with every field filled in.
#[must_use]
pub fn valid_customer_info() -> CustomerInfo {
    CustomerInfo {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "555-0100".to_string(),
        address: "1 Analytical Way".to_string(),
        city: "London".to_string(),
        payment_method: "Credit Card".to_string(),
    }
}

/// One shopper session over a store directory.
pub struct Session {
    pub auth: AuthSession<FileStore>,
    pub cart: CartManager<FileStore>,
    pub orders: OrderWorkflow<FileStore>,
}

impl Session {
    /// Open (or reopen) a session rooted at `dir`.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be opened.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn open(dir: &Path) -> Self {
        let store = FileStore::open(dir).expect("Failed to open store");
        let admin = Email::parse("admin@gmail.com").expect("valid admin email");
        Self {
            auth: AuthSession::new(store.clone(), admin),
            cart: CartManager::load(store.clone()).expect("Failed to load cart"),
            orders: OrderWorkflow::new(store),
        }
    }
}
