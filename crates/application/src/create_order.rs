use common::OrderId;
use domain::{Order, OrderError};
use notifier::OrderPublisher;
use order_store::OrderRepository;

use crate::dto::{CreateOrderInput, OrderOutput, build_items};
use crate::error::ServiceError;

/// Creates a pending order, stores it and announces it.
///
/// The announcement happens after the write commits. If it fails the order
/// stays stored and the caller gets [`ServiceError::Publish`]; nothing is
/// retried.
#[derive(Clone)]
pub struct CreateOrder<R, P> {
    repository: R,
    publisher: P,
}

impl<R, P> CreateOrder<R, P>
where
    R: OrderRepository,
    P: OrderPublisher,
{
    pub fn new(repository: R, publisher: P) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    #[tracing::instrument(skip(self, input), fields(items = input.items.len()))]
    pub async fn execute(&self, input: CreateOrderInput) -> Result<OrderOutput, ServiceError> {
        if input.items.is_empty() {
            return Err(ServiceError::validation(OrderError::NoItems.to_string()));
        }

        let items = build_items(input.items)?;
        let order = Order::create(OrderId::new(), input.customer_name, items)?;

        self.repository.save(&order).await?;

        if let Err(err) = self.publisher.publish_created_order(&order).await {
            metrics::counter!("orders_publish_failures_total").increment(1);
            tracing::warn!(
                order_id = %order.id(),
                error = %err,
                "order stored but creation notice was not published"
            );
            return Err(err.into());
        }

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %order.id(), total = %order.total(), "order created");

        Ok(OrderOutput::from(&order))
    }
}
