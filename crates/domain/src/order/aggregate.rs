//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::OrderId;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{Item, OrderError, OrderStatus};

/// Order aggregate root.
///
/// Owns its items and is the only place where order validity is decided.
/// Fields are private: state changes go through [`Order::update_details`] and
/// [`Order::set_status`], which either apply the whole change or none of it.
///
/// The serialized form is the order snapshot announced to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    id: OrderId,
    customer_name: String,
    items: Vec<Item>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

// Query methods
impl Order {
    /// Returns the order ID.
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Returns the customer name.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Returns the items in their original order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the sum of quantity * price over the current items.
    ///
    /// Never cached, so it cannot drift from the item list.
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.total()))
    }

    /// Returns true if the order is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Structural check run before persisting: the id must be non-empty.
    pub fn is_valid(&self) -> Result<(), OrderError> {
        if self.id.is_empty() {
            return Err(OrderError::InvalidId);
        }
        Ok(())
    }
}

// Command methods
impl Order {
    /// Creates a new pending order.
    ///
    /// Fails if `items` is empty or if any item is invalid. An empty customer
    /// name is accepted.
    pub fn create(
        id: OrderId,
        customer_name: impl Into<String>,
        items: Vec<Item>,
    ) -> Result<Self, OrderError> {
        validate_items(&items)?;

        let now = Utc::now();
        Ok(Self {
            id,
            customer_name: customer_name.into(),
            items,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the customer name and the full item set of a pending order.
    ///
    /// An empty `customer_name` keeps the current name. Items are never merged,
    /// only replaced. Nothing changes unless every check passes.
    pub fn update_details(
        &mut self,
        customer_name: &str,
        items: Vec<Item>,
    ) -> Result<(), OrderError> {
        if !self.status.can_modify_details() {
            return Err(OrderError::NotPending {
                current: self.status,
            });
        }

        validate_items(&items)?;

        if !customer_name.is_empty() {
            self.customer_name = customer_name.to_string();
        }
        self.items = items;
        self.updated_at = Utc::now();

        Ok(())
    }

    /// Moves the order to `status`.
    ///
    /// Re-setting the current status is a no-op and leaves `updated_at` alone.
    /// Any other move away from Completed or Canceled is rejected.
    pub fn set_status(&mut self, status: OrderStatus) -> Result<(), OrderError> {
        if self.status == status {
            return Ok(());
        }

        if !self.status.can_transition_to(status) {
            return Err(OrderError::TerminalStatus {
                current: self.status,
                requested: status,
            });
        }

        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }
}

// Rehydration from storage
impl Order {
    /// Rebuilds an order from stored fields without creation-time validation.
    ///
    /// Intended for persistence adapters assembling a previously saved snapshot.
    pub fn restore(
        id: OrderId,
        customer_name: String,
        items: Vec<Item>,
        status: OrderStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_name,
            items,
            status,
            created_at,
            updated_at,
        }
    }
}

fn validate_items(items: &[Item]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::NoItems);
    }
    items.iter().try_fold(Decimal::ZERO, |sum, item| {
        item.validate()?;
        item.checked_total()
            .and_then(|total| sum.checked_add(total))
            .ok_or(OrderError::TotalOverflow)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, quantity: i32, price: Decimal) -> Item {
        Item::new(id, format!("Item {id}"), quantity, price).unwrap()
    }

    fn pending_order() -> Order {
        Order::create(
            OrderId::from("order-1"),
            "John Doe",
            vec![item("item-1", 2, Decimal::new(100, 1))],
        )
        .unwrap()
    }

    fn order_with_status(status: OrderStatus) -> Order {
        let mut order = pending_order();
        order.set_status(status).unwrap();
        order
    }

    #[test]
    fn test_create_order() {
        let order = pending_order();
        assert_eq!(order.id().as_str(), "order-1");
        assert_eq!(order.customer_name(), "John Doe");
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.created_at(), order.updated_at());
        assert_eq!(order.total(), Decimal::from(20));
        assert_eq!(order.status().to_string(), "pending");
    }

    #[test]
    fn test_create_without_items_fails() {
        let result = Order::create(OrderId::new(), "John Doe", vec![]);
        let err = result.unwrap_err();
        assert_eq!(err, OrderError::NoItems);
        assert_eq!(err.to_string(), "order must contain at least one item");
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_with_deserialized_invalid_item_fails() {
        let bad: Item =
            serde_json::from_str(r#"{"id":"x","name":"Widget","quantity":1,"price":0.0}"#)
                .unwrap();
        let result = Order::create(OrderId::new(), "John Doe", vec![bad]);
        assert!(matches!(result, Err(OrderError::InvalidPrice { .. })));
    }

    #[test]
    fn test_create_with_empty_customer_name_is_accepted() {
        let order =
            Order::create(OrderId::new(), "", vec![item("item-1", 1, Decimal::ONE)]).unwrap();
        assert_eq!(order.customer_name(), "");
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn test_create_with_overflowing_item_fails() {
        let bad = Item::restore(
            "item-1".to_string(),
            "Widget".to_string(),
            1_000_000_000,
            Decimal::from_i128_with_scale(10_i128.pow(20), 0),
        );
        let err = Order::create(OrderId::new(), "John Doe", vec![bad]).unwrap_err();
        assert_eq!(err, OrderError::TotalOverflow);
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_with_overflowing_sum_fails() {
        let items = vec![item("item-1", 1, Decimal::MAX), item("item-2", 1, Decimal::MAX)];
        let err = Order::create(OrderId::new(), "John Doe", items).unwrap_err();
        assert_eq!(err, OrderError::TotalOverflow);
    }

    #[test]
    fn test_update_with_overflowing_sum_changes_nothing() {
        let mut order = pending_order();
        let before = order.clone();
        let result = order.update_details(
            "Jane",
            vec![item("item-1", 1, Decimal::MAX), item("item-2", 1, Decimal::MAX)],
        );

        assert_eq!(result, Err(OrderError::TotalOverflow));
        assert_eq!(order, before);
    }

    #[test]
    fn test_total_sums_every_item() {
        for count in 1..=10 {
            let items: Vec<Item> = (1..=count)
                .map(|n| item(&format!("item-{n}"), n, Decimal::new(i64::from(n) * 125, 2)))
                .collect();
            let expected: Decimal = (1..=count)
                .map(|n| Decimal::from(n) * Decimal::new(i64::from(n) * 125, 2))
                .sum();

            let order = Order::create(OrderId::new(), "John Doe", items).unwrap();
            assert_eq!(order.total(), expected);
        }
    }

    #[test]
    fn test_is_valid_requires_id() {
        assert!(pending_order().is_valid().is_ok());

        let order = Order::create(
            OrderId::from_string(""),
            "John Doe",
            vec![item("item-1", 1, Decimal::ONE)],
        )
        .unwrap();
        assert_eq!(order.is_valid(), Err(OrderError::InvalidId));
    }

    #[test]
    fn test_update_details_replaces_items_and_name() {
        let mut order = pending_order();
        let created_at = order.created_at();

        order
            .update_details("Jane", vec![item("item-2", 1, Decimal::from(5))])
            .unwrap();

        assert_eq!(order.customer_name(), "Jane");
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.items()[0].id(), "item-2");
        assert_eq!(order.total(), Decimal::from(5));
        assert_eq!(order.created_at(), created_at);
        assert!(order.updated_at() >= created_at);
    }

    #[test]
    fn test_update_details_with_empty_name_keeps_name() {
        let mut order = pending_order();
        order
            .update_details("", vec![item("item-1", 3, Decimal::ONE)])
            .unwrap();
        assert_eq!(order.customer_name(), "John Doe");
        assert_eq!(order.items()[0].quantity(), 3);
    }

    #[test]
    fn test_update_details_without_items_changes_nothing() {
        let mut order = pending_order();
        let before = order.clone();

        let result = order.update_details("Jane", vec![]);

        assert_eq!(result, Err(OrderError::NoItems));
        assert_eq!(order, before);
    }

    #[test]
    fn test_update_details_on_non_pending_order_fails() {
        for status in [
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Canceled,
        ] {
            let mut order = order_with_status(status);
            let before = order.clone();

            let err = order
                .update_details("Jane", vec![item("item-9", 1, Decimal::ONE)])
                .unwrap_err();

            assert!(err.is_state_conflict());
            assert_eq!(err.to_string(), "order cannot be modified as it is not pending");
            assert_eq!(order, before);
        }
    }

    #[test]
    fn test_set_status_refreshes_updated_at() {
        let mut order = pending_order();
        let before = order.updated_at();
        order.set_status(OrderStatus::Processing).unwrap();
        assert_eq!(order.status(), OrderStatus::Processing);
        assert!(order.updated_at() >= before);
    }

    #[test]
    fn test_set_same_status_is_noop_even_when_terminal() {
        for status in OrderStatus::ALL {
            let mut order = order_with_status(status);
            let before = order.clone();
            assert!(order.set_status(status).is_ok());
            assert_eq!(order, before);
        }
    }

    #[test]
    fn test_cannot_leave_terminal_status() {
        for terminal in [OrderStatus::Completed, OrderStatus::Canceled] {
            for next in OrderStatus::ALL.into_iter().filter(|s| *s != terminal) {
                let mut order = order_with_status(terminal);
                let err = order.set_status(next).unwrap_err();
                assert!(err.is_state_conflict());
                assert_eq!(
                    err.to_string(),
                    "cannot change status of completed or canceled order"
                );
                assert_eq!(order.status(), terminal);
            }
        }
    }

    #[test]
    fn test_processing_can_go_back_to_pending_or_be_canceled() {
        let mut order = order_with_status(OrderStatus::Processing);
        order.set_status(OrderStatus::Pending).unwrap();
        order.set_status(OrderStatus::Processing).unwrap();
        order.set_status(OrderStatus::Canceled).unwrap();
        assert!(order.is_terminal());
    }

    #[test]
    fn test_restore_keeps_stored_fields() {
        let created_at = Utc::now();
        let order = Order::restore(
            OrderId::from("123"),
            "John".to_string(),
            vec![Item::restore(
                "item-1".to_string(),
                "Item 1".to_string(),
                1,
                Decimal::from(10),
            )],
            OrderStatus::Completed,
            created_at,
            created_at,
        );
        assert_eq!(order.id().as_str(), "123");
        assert_eq!(order.status(), OrderStatus::Completed);
        assert_eq!(order.total(), Decimal::from(10));
    }

    #[test]
    fn test_serialized_snapshot_shape() {
        let order = pending_order();
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["id"], "order-1");
        assert_eq!(json["customer_name"], "John Doe");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["items"][0]["id"], "item-1");
        assert_eq!(json["items"][0]["name"], "Item item-1");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][0]["price"], 10.0);
        assert!(json["created_at"].is_string());
        assert!(json["updated_at"].is_string());
    }
}
