//! Checkout and order history commands.

use tracing::info;

use shopfront_core::OrderId;
use shopfront_storefront::StoreError;
use shopfront_storefront::models::{CustomerInfo, Order};

use super::Context;

pub(super) fn log_order(order: &Order) {
    info!(
        "  #{} [{}] {} - {} item(s), total {}",
        order.id(),
        order.status(),
        order.created_at().format("%Y-%m-%d %H:%M"),
        order.item_count(),
        order.total()
    );
    for line in order.items() {
        info!("      {} x{}", line.product.name, line.quantity);
    }
}

/// Resolve `id` to an order owned by the signed-in user.
///
/// Other users' orders are reported as not found.
fn owned_order_id(ctx: &Context, id: &str) -> Result<OrderId, Box<dyn std::error::Error>> {
    let user = ctx.auth.require_user()?;
    let order_id = OrderId::new(id);
    let owned = ctx
        .orders
        .list_orders_for_user(&user.id)?
        .iter()
        .any(|order| order.id() == &order_id);
    if !owned {
        return Err(StoreError::NotFound(order_id).into());
    }
    Ok(order_id)
}

/// Place an order for the signed-in user.
///
/// # Errors
///
/// Returns an error if nobody is signed in, a field is missing, or the
/// order cannot be stored.
pub fn checkout(ctx: &mut Context, info: CustomerInfo) -> Result<(), Box<dyn std::error::Error>> {
    let user = ctx.auth.require_user()?;
    let order = ctx.orders.checkout(&mut ctx.cart, info, &user.id)?;
    info!("Order #{} has been confirmed", order.id());
    log_order(&order);
    Ok(())
}

/// List the signed-in user's orders.
///
/// # Errors
///
/// Returns an error if nobody is signed in or orders cannot be read.
pub fn list(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let user = ctx.auth.require_user()?;
    let orders = ctx.orders.list_orders_for_user(&user.id)?;
    if orders.is_empty() {
        info!("No orders yet");
    }
    for order in &orders {
        log_order(order);
    }
    Ok(())
}

/// Cancel one of the signed-in user's orders.
///
/// # Errors
///
/// Returns an error if the order is unknown or no longer confirmed.
pub fn cancel(ctx: &Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let order_id = owned_order_id(ctx, id)?;
    let order = ctx.orders.cancel(&order_id)?;
    info!("Order #{} cancelled", order.id());
    Ok(())
}

/// Request a return for one of the signed-in user's orders.
///
/// # Errors
///
/// Returns an error if the order is unknown or no longer confirmed.
pub fn request_return(ctx: &Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let order_id = owned_order_id(ctx, id)?;
    let order = ctx.orders.request_return(&order_id)?;
    info!("Order #{} returned", order.id());
    Ok(())
}
