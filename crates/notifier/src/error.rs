use common::OrderId;
use thiserror::Error;

/// Errors that can occur when announcing an order.
///
/// A publish error never undoes the storage write that preceded it.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The order could not be encoded as a message payload.
    #[error("failed to marshal order: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The broker connection or channel failed.
    #[error("failed to publish message: {0}")]
    Broker(#[from] lapin::Error),

    /// The broker negatively acknowledged the message.
    #[error("broker rejected message for order {order_id}")]
    Rejected { order_id: OrderId },

    /// The publisher is not able to deliver messages right now.
    #[error("publisher unavailable: {0}")]
    Unavailable(String),
}

/// Result type for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;
