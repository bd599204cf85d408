//! Admin views over every order.

use tracing::info;

use shopfront_storefront::OrderSummary;

use super::Context;
use super::orders::log_order;

/// List every order in the store.
///
/// # Errors
///
/// Returns an error if the signed-in user is not an admin.
pub fn orders(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    ctx.auth.require_admin()?;
    let orders = ctx.orders.list_all_orders()?;
    info!("{} order(s)", orders.len());
    for order in &orders {
        info!("  customer {} <{}>", order.user_id(), order.customer_info().email);
        log_order(order);
    }
    Ok(())
}

/// Show store-wide totals.
///
/// # Errors
///
/// Returns an error if the signed-in user is not an admin.
pub fn summary(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    ctx.auth.require_admin()?;
    let summary = OrderSummary::from_orders(&ctx.orders.list_all_orders()?);
    info!("Total revenue:   {}", summary.revenue);
    info!("Orders:          {}", summary.order_count);
    info!("Pending orders:  {}", summary.pending_count);
    info!("Customers:       {}", summary.customer_count);
    Ok(())
}
