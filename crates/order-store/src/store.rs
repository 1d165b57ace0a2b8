use async_trait::async_trait;
use common::OrderId;
use domain::Order;

use crate::Result;

/// Core trait for order persistence.
///
/// Stores and loads the current snapshot of an order aggregate, hiding how it
/// is decomposed in storage. All implementations must be thread-safe
/// (Send + Sync) and hold no state shared between calls beyond the store itself.
///
/// Every method is cancel-safe: dropping the returned future before it
/// completes leaves storage as it was before the call.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores the order and replaces its full item set atomically.
    ///
    /// Either the parent row and every item are written, or nothing is.
    /// Concurrent saves of the same id resolve as last-writer-wins.
    async fn save(&self, order: &Order) -> Result<()>;

    /// Loads a single order with all of its items.
    ///
    /// Returns `RepositoryError::NotFound` when no such order exists.
    async fn find_by_id(&self, id: &OrderId) -> Result<Order>;

    /// Loads every order with its items.
    ///
    /// Orders are returned oldest first (by creation time, then id).
    async fn list(&self) -> Result<Vec<Order>>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<()>;
}
