//! Use-case error types.

use common::OrderId;
use domain::OrderError;
use notifier::PublishError;
use order_store::RepositoryError;
use thiserror::Error;

/// Errors returned by the order use cases.
///
/// Validation and state-conflict errors are raised before any side effect.
/// A `Publish` error means the order *was* stored but never announced.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input; nothing was changed.
    #[error("{0}")]
    Validation(String),

    /// The referenced order does not exist.
    #[error("order not found")]
    NotFound(OrderId),

    /// The order's status forbids the requested operation.
    #[error("{0}")]
    StateConflict(String),

    /// Reading or writing storage failed; the write was rolled back.
    #[error("persistence error: {0}")]
    Persistence(#[source] RepositoryError),

    /// Announcing the order failed after it was committed.
    #[error("failed to publish order: {0}")]
    Publish(#[from] PublishError),
}

impl ServiceError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        ServiceError::StateConflict(message.into())
    }
}

impl From<OrderError> for ServiceError {
    fn from(err: OrderError) -> Self {
        if err.is_state_conflict() {
            ServiceError::StateConflict(err.to_string())
        } else {
            ServiceError::Validation(err.to_string())
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => ServiceError::NotFound(id),
            RepositoryError::InvalidOrder(order_err) => order_err.into(),
            other => ServiceError::Persistence(other),
        }
    }
}
