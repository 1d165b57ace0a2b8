use common::OrderId;
use order_store::OrderRepository;

use crate::dto::OrderOutput;
use crate::error::ServiceError;

/// Fetches a single order snapshot.
#[derive(Clone)]
pub struct GetOrder<R> {
    repository: R,
}

impl<R: OrderRepository> GetOrder<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self), fields(order_id = %id))]
    pub async fn execute(&self, id: &OrderId) -> Result<OrderOutput, ServiceError> {
        let order = self.repository.find_by_id(id).await?;
        Ok(OrderOutput::from(&order))
    }
}
