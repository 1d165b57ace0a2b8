use common::OrderId;
use domain::{OrderError, OrderStatus};
use order_store::OrderRepository;

use crate::dto::{OrderOutput, UpdateOrderInput, build_items};
use crate::error::ServiceError;

/// Replaces the customer name and items of a pending order.
#[derive(Clone)]
pub struct UpdateOrder<R> {
    repository: R,
}

impl<R: OrderRepository> UpdateOrder<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self, input), fields(order_id = %id))]
    pub async fn execute(
        &self,
        id: &OrderId,
        input: UpdateOrderInput,
    ) -> Result<OrderOutput, ServiceError> {
        if input.customer_name.is_empty() {
            return Err(ServiceError::validation(
                OrderError::EmptyCustomerName.to_string(),
            ));
        }
        if input.items.is_empty() {
            return Err(ServiceError::validation(OrderError::NoItems.to_string()));
        }

        let mut order = self.repository.find_by_id(id).await?;

        if order.status() != OrderStatus::Pending {
            return Err(ServiceError::conflict(
                "order cannot be updated as it is not pending",
            ));
        }

        let items = build_items(input.items)?;
        order.update_details(&input.customer_name, items)?;

        self.repository.save(&order).await?;

        metrics::counter!("orders_updated_total").increment(1);
        tracing::info!(items = order.items().len(), "order updated");

        Ok(OrderOutput::from(&order))
    }
}
