//! Cart commands.
//!
//! Stock is enforced here, at the surface: `add` clamps the requested
//! quantity to what is left on hand. The cart manager itself never checks.

use tracing::{info, warn};

use shopfront_core::ProductId;

use super::Context;

/// Show the cart.
pub fn show(ctx: &Context) {
    if ctx.cart.items().is_empty() {
        info!("Your cart is empty");
        return;
    }
    for line in ctx.cart.items() {
        info!(
            "  [{}] {} x{} @ {} = {}",
            line.product_id,
            line.product.name,
            line.quantity,
            line.product.price,
            line.line_total()
        );
    }
    info!("{} item(s), total {}", ctx.cart.item_count(), ctx.cart.total());
}

/// Units of `requested` that fit in `stock` once `in_cart` are set aside.
const fn clamp_to_stock(requested: u32, stock: u32, in_cart: u32) -> u32 {
    let available = stock.saturating_sub(in_cart);
    if requested > available {
        available
    } else {
        requested
    }
}

/// Add a catalog product to the cart.
///
/// # Errors
///
/// Returns an error if the product is unknown or the cart cannot be saved.
pub fn add(ctx: &mut Context, id: &str, quantity: u32) -> Result<(), Box<dyn std::error::Error>> {
    let product = ctx.product(id)?.clone();
    let in_cart = ctx
        .cart
        .cart()
        .line(&product.id)
        .map_or(0, |line| line.quantity.get());
    let added = clamp_to_stock(quantity, product.stock, in_cart);
    if added < quantity {
        if added == 0 {
            warn!("No more {} in stock ({} already in cart)", product.name, in_cart);
            return Ok(());
        }
        warn!("Only {added} more {} available, adding {added}", product.name);
    }

    ctx.cart.add_to_cart(&product, added)?;
    show(ctx);
    Ok(())
}

/// Change a line's quantity.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn update(ctx: &mut Context, id: &str, quantity: i64) -> Result<(), Box<dyn std::error::Error>> {
    if quantity < 1 {
        warn!("Quantity must be at least 1; use `cart remove` to drop a product");
    }
    ctx.cart.update_quantity(&ProductId::new(id), quantity)?;
    show(ctx);
    Ok(())
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove(ctx: &mut Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    ctx.cart.remove_from_cart(&ProductId::new(id))?;
    show(ctx);
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear(ctx: &mut Context) -> Result<(), Box<dyn std::error::Error>> {
    ctx.cart.clear_cart()?;
    show(ctx);
    Ok(())
}
