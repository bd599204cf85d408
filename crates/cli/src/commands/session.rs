//! Sign-in commands.

use tracing::info;

use super::Context;

/// Sign in as `email`.
///
/// # Errors
///
/// Returns an error if the email is malformed or cannot be stored.
pub fn login(ctx: &Context, email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let user = ctx.auth.login(email)?;
    info!("Signed in as {} <{}> ({})", user.name, user.email, user.role);
    Ok(())
}

/// Sign out and empty the cart.
///
/// # Errors
///
/// Returns an error if the session or cart cannot be written.
pub fn logout(ctx: &mut Context) -> Result<(), Box<dyn std::error::Error>> {
    ctx.auth.logout(&mut ctx.cart)?;
    info!("Signed out");
    Ok(())
}

/// Show the signed-in user.
///
/// # Errors
///
/// Returns an error if the stored session cannot be read.
pub fn whoami(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match ctx.auth.current_user()? {
        Some(user) => info!("{} <{}> ({}, id {})", user.name, user.email, user.role, user.id),
        None => info!("Not signed in"),
    }
    Ok(())
}
