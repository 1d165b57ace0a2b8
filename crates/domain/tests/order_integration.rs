//! Integration tests for the Order aggregate.
//!
//! These tests walk an order through its full lifecycle using only the public
//! API, the way the use-case layer drives it.

use common::OrderId;
use domain::{Item, Order, OrderError, OrderStatus};
use rust_decimal::Decimal;

fn item(id: &str, quantity: i32, price: Decimal) -> Item {
    Item::new(id, "Widget", quantity, price).unwrap()
}

mod order_lifecycle {
    use super::*;

    #[test]
    fn pending_order_is_edited_then_completed() {
        let mut order = Order::create(
            OrderId::new(),
            "John Doe",
            vec![item("item-1", 2, Decimal::from(10))],
        )
        .unwrap();
        assert_eq!(order.total(), Decimal::from(20));

        order
            .update_details(
                "Jane",
                vec![
                    item("item-1", 1, Decimal::from(10)),
                    item("item-2", 4, Decimal::new(25, 1)),
                ],
            )
            .unwrap();
        assert_eq!(order.total(), Decimal::from(20));
        assert_eq!(order.items().len(), 2);

        order.set_status(OrderStatus::Processing).unwrap();
        order.set_status(OrderStatus::Completed).unwrap();
        assert!(order.is_terminal());

        // Completed -> Completed is fine, anything else is not.
        assert!(order.set_status(OrderStatus::Completed).is_ok());
        assert!(order.set_status(OrderStatus::Canceled).is_err());
        assert!(order.set_status(OrderStatus::Pending).is_err());
    }

    #[test]
    fn processing_order_rejects_edits_but_allows_cancel() {
        let mut order = Order::create(
            OrderId::new(),
            "John Doe",
            vec![item("item-1", 1, Decimal::ONE)],
        )
        .unwrap();
        order.set_status(OrderStatus::Processing).unwrap();

        let err = order
            .update_details("Jane", vec![item("item-2", 1, Decimal::ONE)])
            .unwrap_err();
        assert!(matches!(err, OrderError::NotPending { current: OrderStatus::Processing }));
        assert_eq!(order.customer_name(), "John Doe");
        assert_eq!(order.items()[0].id(), "item-1");

        order.set_status(OrderStatus::Canceled).unwrap();
        assert_eq!(order.status(), OrderStatus::Canceled);
    }
}

mod validation {
    use super::*;

    #[test]
    fn any_invalid_item_rejects_the_whole_order() {
        let good = item("item-1", 1, Decimal::ONE);
        let bad = Item::restore("item-2".into(), "Gadget".into(), -3, Decimal::ONE);

        let result = Order::create(OrderId::new(), "John Doe", vec![good, bad]);
        assert_eq!(result.unwrap_err(), OrderError::InvalidQuantity { quantity: -3 });
    }

    #[test]
    fn error_kinds_are_classified() {
        assert!(OrderError::NoItems.is_validation());
        assert!(OrderError::EmptyItemName.is_validation());
        assert!(OrderError::InvalidQuantity { quantity: 0 }.is_validation());
        assert!(OrderError::InvalidPrice { price: Decimal::ZERO }.is_validation());
        assert!(OrderError::EmptyCustomerName.is_validation());
        assert!(OrderError::TotalOverflow.is_validation());
        assert!(OrderError::InvalidId.is_validation());
        assert!(
            OrderError::NotPending {
                current: OrderStatus::Completed
            }
            .is_state_conflict()
        );
        assert!(
            OrderError::TerminalStatus {
                current: OrderStatus::Canceled,
                requested: OrderStatus::Pending,
            }
            .is_state_conflict()
        );
    }
}
