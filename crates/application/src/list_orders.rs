use order_store::OrderRepository;

use crate::dto::{ListOrdersOutput, OrderOutput};
use crate::error::ServiceError;

/// Lists every stored order, oldest first.
#[derive(Clone)]
pub struct ListOrders<R> {
    repository: R,
}

impl<R: OrderRepository> ListOrders<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self) -> Result<ListOrdersOutput, ServiceError> {
        let orders = self.repository.list().await?;
        tracing::debug!(count = orders.len(), "orders listed");

        Ok(ListOrdersOutput {
            orders: orders.iter().map(OrderOutput::from).collect(),
        })
    }
}
