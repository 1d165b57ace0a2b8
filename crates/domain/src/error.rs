//! Domain error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::order::OrderStatus;

/// Errors raised by the order aggregate when an invariant would be broken.
///
/// Every variant is either a validation failure (bad input, nothing changed) or
/// a state conflict (the current status forbids the operation).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Order has no items.
    #[error("order must contain at least one item")]
    NoItems,

    /// Item has an empty name.
    #[error("item name cannot be empty")]
    EmptyItemName,

    /// Item quantity is zero or negative.
    #[error("item quantity must be greater than zero")]
    InvalidQuantity { quantity: i32 },

    /// Item price is zero or negative.
    #[error("item price must be greater than zero")]
    InvalidPrice { price: Decimal },

    /// Quantity times price, or the sum over all items, does not fit in a decimal.
    #[error("order total is too large")]
    TotalOverflow,

    /// Customer name is empty.
    #[error("customer name cannot be empty")]
    EmptyCustomerName,

    /// Order identifier is empty.
    #[error("invalid order id")]
    InvalidId,

    /// Details can only change while the order is pending.
    #[error("order cannot be modified as it is not pending")]
    NotPending { current: OrderStatus },

    /// A terminal status cannot move to a different status.
    #[error("cannot change status of completed or canceled order")]
    TerminalStatus {
        current: OrderStatus,
        requested: OrderStatus,
    },
}

impl OrderError {
    /// Returns true for malformed-input errors.
    pub fn is_validation(&self) -> bool {
        !self.is_state_conflict()
    }

    /// Returns true when the order's current status forbids the operation.
    pub fn is_state_conflict(&self) -> bool {
        matches!(
            self,
            OrderError::NotPending { .. } | OrderError::TerminalStatus { .. }
        )
    }
}
