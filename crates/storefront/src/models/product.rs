//! Catalog product.

use serde::{Deserialize, Serialize};

use shopfront_core::{Price, ProductId};

/// A catalog entry.
///
/// Read-only as far as the cart and order workflow are concerned. Carts and
/// orders hold their own copies, so later catalog edits never reach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Image references, first one is the primary image.
    pub images: Vec<String>,
    pub category: String,
    /// Units on hand. Informational only; nothing here decrements it.
    pub stock: u32,
}

impl Product {
    /// The primary image reference, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether at least one unit is on hand.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
