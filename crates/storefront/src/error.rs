//! Unified error handling for cart and order operations.
//!
//! Every variant is recoverable and reported to the caller as-is. Nothing is
//! retried.

use thiserror::Error;

use shopfront_core::{OrderId, OrderStatus};

use crate::models::CheckoutField;
use crate::storage::{RecordError, StorageError};

/// Checkout was attempted with missing input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required checkout fields: {}", format_fields(.fields))]
pub struct ValidationError {
    /// Every offending field, in form order.
    pub fields: Vec<CheckoutField>,
}

fn format_fields(fields: &[CheckoutField]) -> String {
    fields
        .iter()
        .copied()
        .map(CheckoutField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error type for the cart manager and order workflow.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Checkout input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No order with this id exists.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The order's current status does not allow the requested change.
    #[error("order {order_id} cannot move from {from} to {to}")]
    InvalidTransition {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Reading, decoding or writing persisted state failed.
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        Self::Record(RecordError::Storage(err))
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
