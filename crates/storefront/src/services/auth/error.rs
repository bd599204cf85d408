//! Authentication error types.

use thiserror::Error;

use crate::error::StoreError;
use crate::storage::RecordError;

/// Errors that can occur during sign-in and session checks.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] shopfront_core::EmailError),

    /// No user is signed in.
    #[error("not signed in")]
    NotSignedIn,

    /// The signed-in user lacks the admin role.
    #[error("admin access required")]
    Forbidden,

    /// Reading or writing the stored user failed.
    #[error("session storage error: {0}")]
    Record(#[from] RecordError),

    /// Clearing the cart on sign-out failed.
    #[error("failed to clear cart: {0}")]
    Cart(#[from] StoreError),
}
