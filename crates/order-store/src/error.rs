use common::OrderId;
use domain::OrderError;
use thiserror::Error;

/// Errors that can occur when storing or loading orders.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No order is stored under the requested id.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The order failed its structural check and was not written.
    #[error("invalid order: {0}")]
    InvalidOrder(#[from] OrderError),

    /// A database error occurred; any open transaction was rolled back.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The storage backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    /// Returns true if this is the "no such order" signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_))
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
