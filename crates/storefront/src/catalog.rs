//! Product catalog.
//!
//! The catalog is static for the lifetime of a session. It is either the
//! built-in demo assortment or a YAML file of the form:
//!
//! ```yaml
//! products:
//!   - id: "1"
//!     name: Premium Wireless Headphones
//!     description: Noise cancelling.
//!     price: 299.99
//!     images: ["https://example.com/headphones.jpg"]
//!     category: Electronics
//!     stock: 15
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use shopfront_core::{Price, ProductId};

use crate::models::Product;

/// Read-only product lookup consumed by the cart surface.
pub trait ProductLookup {
    /// Find a product by id.
    fn find_product_by_id(&self, id: &ProductId) -> Option<&Product>;
}

/// Errors raised while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    #[error("product {0} has a blank id or name")]
    BlankField(ProductId),

    #[error("product {0} has no image")]
    NoImages(ProductId),
}

/// Id, name, description, price in cents, image, category, stock.
type DemoRow = (&'static str, &'static str, &'static str, u64, &'static str, &'static str, u32);

const DEMO_PRODUCTS: [DemoRow; 6] = [
    (
        "1",
        "Premium Wireless Headphones",
        "High-quality wireless headphones with noise cancellation and premium sound quality.",
        29_999,
        "photo-1505740420928-5e560c06d30e",
        "Electronics",
        15,
    ),
    (
        "2",
        "Smart Fitness Watch",
        "Advanced fitness tracking with heart rate monitoring, GPS, and waterproof design.",
        19_999,
        "photo-1523275335684-37898b6baf30",
        "Electronics",
        8,
    ),
    (
        "3",
        "Professional Camera",
        "DSLR camera with 24MP sensor, 4K video recording, and professional lens kit.",
        89_999,
        "photo-1502920917128-1aa500764cbd",
        "Electronics",
        5,
    ),
    (
        "4",
        "Ergonomic Office Chair",
        "Comfortable office chair with lumbar support, adjustable height, and premium materials.",
        34_999,
        "photo-1586023492125-27b2c045efd7",
        "Furniture",
        12,
    ),
    (
        "5",
        "Wireless Charging Station",
        "Multi-device wireless charging pad compatible with all Qi-enabled devices.",
        7_999,
        "photo-1609592917680-89c3ec3e2b4a",
        "Electronics",
        25,
    ),
    (
        "6",
        "Premium Coffee Maker",
        "Automatic coffee maker with built-in grinder, programmable settings, and thermal carafe.",
        24_999,
        "photo-1544787219-7f47ccb76574",
        "Kitchen",
        18,
    ),
];

#[derive(Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// Ordered, in-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if ids repeat, a product has a blank id or
    /// name, or a product lists no non-blank image.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if product.id.as_str().trim().is_empty() || product.name.trim().is_empty() {
                return Err(CatalogError::BlankField(product.id.clone()));
            }
            if product.images.iter().all(|image| image.trim().is_empty()) {
                return Err(CatalogError::NoImages(product.id.clone()));
            }
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the YAML is malformed or fails validation.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::new(file.products)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&content)?;
        info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// The built-in demo assortment.
    #[must_use]
    pub fn demo() -> Self {
        let products = DEMO_PRODUCTS
            .iter()
            .map(|&(id, name, description, cents, image, category, stock)| Product {
                id: ProductId::new(id),
                name: name.to_string(),
                description: description.to_string(),
                price: Price::from_cents(cents),
                images: vec![format!(
                    "https://images.unsplash.com/{image}?w=500&h=500&fit=crop"
                )],
                category: category.to_string(),
                stock,
            })
            .collect();
        Self { products }
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct category labels in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Products in `category` (exact match).
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Products whose name or description contains `query`, ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        debug!(query = %needle, "Searching catalog");
        self.products
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl ProductLookup for Catalog {
    fn find_product_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_is_valid() {
        let demo = Catalog::demo();
        assert_eq!(demo.len(), 6);
        assert!(Catalog::new(demo.products().to_vec()).is_ok());
    }

    #[test]
    fn test_find_product_by_id() {
        let catalog = Catalog::demo();
        let found = catalog.find_product_by_id(&ProductId::new("3")).unwrap();
        assert_eq!(found.name, "Professional Camera");
        assert!(catalog.find_product_by_id(&ProductId::new("99")).is_none());
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(
            Catalog::demo().categories(),
            ["Electronics", "Furniture", "Kitchen"]
        );
    }

    #[test]
    fn test_by_category() {
        let catalog = Catalog::demo();
        let ids: Vec<&str> = catalog.by_category("Kitchen").map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["6"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::demo();
        let hits = catalog.search("WIRELESS");
        assert_eq!(hits.len(), 2);
        assert_eq!(catalog.search("").len(), 6);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
products:
  - id: "a"
    name: Widget
    description: A widget
    price: 10
    images: ["w.png"]
    category: Tools
    stock: 3
  - id: "b"
    name: Gadget
    description: A gadget
    price: "5.50"
    images: ["g.png"]
    category: Tools
    stock: 0
"#;
        let catalog = Catalog::from_yaml_str(yaml).unwrap();
        assert_eq!(catalog.len(), 2);
        let gadget = catalog.find_product_by_id(&ProductId::new("b")).unwrap();
        assert_eq!(gadget.price, Price::from_cents(550));
        assert!(!gadget.in_stock());
    }

    #[test]
    fn test_from_yaml_rejects_duplicates() {
        let yaml = r#"
products:
  - { id: "a", name: A, description: "", price: 1, images: [x.png], category: X, stock: 1 }
  - { id: "a", name: B, description: "", price: 1, images: [x.png], category: X, stock: 1 }
"#;
        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_from_yaml_rejects_negative_price() {
        let yaml = r#"
products:
  - { id: "a", name: A, description: "", price: -1, images: [x.png], category: X, stock: 1 }
"#;
        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::Yaml(_))
        ));
    }

    #[test]
    fn test_rejects_product_without_images() {
        let yaml = r#"
products:
  - { id: "a", name: A, description: "", price: 1, images: [], category: X, stock: 1 }
"#;
        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::NoImages(ref id)) if id.as_str() == "a"
        ));
    }

    #[test]
    fn test_rejects_blank_image_entries() {
        let yaml = r#"
products:
  - { id: "a", name: A, description: "", price: 1, images: ["", "  "], category: X, stock: 1 }
"#;
        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::NoImages(_))
        ));
    }
}
