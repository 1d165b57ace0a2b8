use common::OrderId;
use domain::OrderStatus;
use order_store::OrderRepository;

use crate::dto::OrderOutput;
use crate::error::ServiceError;

/// Cancels a pending order.
///
/// Stricter than the aggregate's own transition rules: an order that is
/// already processing cannot be canceled here.
#[derive(Clone)]
pub struct CancelOrder<R> {
    repository: R,
}

impl<R: OrderRepository> CancelOrder<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self), fields(order_id = %id))]
    pub async fn execute(&self, id: &OrderId) -> Result<OrderOutput, ServiceError> {
        let mut order = self.repository.find_by_id(id).await?;

        if order.status() != OrderStatus::Pending {
            return Err(ServiceError::conflict("only pending orders can be canceled"));
        }

        order.set_status(OrderStatus::Canceled)?;
        self.repository.save(&order).await?;

        metrics::counter!("orders_canceled_total").increment(1);
        tracing::info!("order canceled");

        Ok(OrderOutput::from(&order))
    }
}
