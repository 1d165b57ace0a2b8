use async_trait::async_trait;
use domain::Order;

use crate::Result;

/// Port for announcing newly created orders to external subscribers.
///
/// Implementations give no transactional guarantee relative to storage: a
/// publish can fail after the order has already been committed.
#[async_trait]
pub trait OrderPublisher: Send + Sync {
    /// Delivers the full order snapshot to the configured destination.
    async fn publish_created_order(&self, order: &Order) -> Result<()>;
}
