//! Catalog browsing commands.

use tracing::info;

use shopfront_storefront::models::Product;

use super::{CommandError, Context};

fn log_product(product: &Product) {
    info!(
        "  [{}] {} - {} ({}, {} in stock)",
        product.id, product.name, product.price, product.category, product.stock
    );
}

/// List products, optionally narrowed by category and search text.
pub fn list(ctx: &Context, category: Option<&str>, search: Option<&str>) {
    let products: Vec<&Product> = ctx
        .catalog
        .search(search.unwrap_or_default())
        .into_iter()
        .filter(|p| category.is_none_or(|c| p.category.eq_ignore_ascii_case(c)))
        .collect();

    info!("{} product(s)", products.len());
    for product in products {
        log_product(product);
    }
}

/// Show a single product in full.
///
/// # Errors
///
/// Returns an error if the product id is unknown.
pub fn show(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let product = ctx.product(id)?;
    log_product(product);
    info!("  {}", product.description);
    for image in &product.images {
        info!("  image: {image}");
    }
    Ok(())
}

/// List category labels.
pub fn categories(ctx: &Context) {
    for category in ctx.catalog.categories() {
        let count = ctx.catalog.by_category(category).count();
        info!("  {category} ({count})");
    }
}
