//! CLI command implementations.
//!
//! Each invocation opens a [`Context`] over the file-backed store, runs one
//! command against it and exits.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod session;

use thiserror::Error;
use tracing::debug;

use shopfront_core::ProductId;
use shopfront_storefront::{
    AuthSession, CartManager, Catalog, FileStore, OrderWorkflow, ProductLookup, ShopfrontConfig,
};
use shopfront_storefront::models::Product;

/// Errors raised by the command layer itself.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The product id is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
}

/// Everything a command needs, wired to one store directory.
pub struct Context {
    pub catalog: Catalog,
    pub auth: AuthSession<FileStore>,
    pub cart: CartManager<FileStore>,
    pub orders: OrderWorkflow<FileStore>,
}

impl Context {
    /// Open the store and catalog named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory, catalog file or stored cart
    /// cannot be read.
    pub fn open(config: &ShopfrontConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let store = FileStore::open(&config.data_dir)?;
        debug!(data_dir = %store.root().display(), "Opened store");

        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::demo(),
        };

        Ok(Self {
            catalog,
            auth: AuthSession::new(store.clone(), config.admin_email.clone()),
            cart: CartManager::load(store.clone())?,
            orders: OrderWorkflow::new(store),
        })
    }

    /// Look up a catalog product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownProduct`] if no product has this id.
    pub fn product(&self, id: &str) -> Result<&Product, CommandError> {
        self.catalog
            .find_product_by_id(&ProductId::new(id))
            .ok_or_else(|| CommandError::UnknownProduct(id.to_string()))
    }
}
