//! Shopfront storefront library.
//!
//! Cart and order state for a single shopper session, persisted to an
//! injected key-value store.
//!
//! # Architecture
//!
//! ```text
//! Catalog ──> CartManager ──(checkout)──> OrderWorkflow ──> KeyValueStore
//! ```
//!
//! - [`catalog`] - Read-only product lookup and browsing
//! - [`services::cart`] - Session cart, written through on every change
//! - [`services::orders`] - Checkout and the order status lifecycle
//! - [`services::auth`] - Email sign-in, current user, sign-out
//! - [`storage`] - `KeyValueStore` trait with in-memory and file backends
//!
//! All operations are synchronous and run to completion; nothing here spawns
//! work or retries.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use catalog::{Catalog, CatalogError, ProductLookup};
pub use config::{ConfigError, ShopfrontConfig};
pub use error::{StoreError, ValidationError};
pub use services::{AuthError, AuthSession, CartManager, OrderSummary, OrderWorkflow};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
