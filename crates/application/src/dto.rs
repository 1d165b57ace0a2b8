//! Input and output shapes for the order use cases.

use chrono::{DateTime, Utc};
use domain::{Item, Order, OrderError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An item as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    /// Caller-chosen id; a fresh one is generated when left empty.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl ItemInput {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: i32,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            price,
        }
    }
}

/// Input for creating an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderInput {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub items: Vec<ItemInput>,
}

/// Input for replacing a pending order's details.
pub type UpdateOrderInput = CreateOrderInput;

/// An item in an order snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemOutput {
    pub id: String,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub total: Decimal,
}

/// Snapshot of an order returned by every use case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderOutput {
    pub id: String,
    pub customer_name: String,
    pub items: Vec<ItemOutput>,
    pub total: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of listing orders.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListOrdersOutput {
    pub orders: Vec<OrderOutput>,
}

impl From<&Item> for ItemOutput {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id().to_string(),
            name: item.name().to_string(),
            quantity: item.quantity(),
            price: item.price(),
            total: item.total(),
        }
    }
}

impl From<&Order> for OrderOutput {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            customer_name: order.customer_name().to_string(),
            items: order.items().iter().map(ItemOutput::from).collect(),
            total: order.total(),
            status: order.status().to_string(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

/// Builds validated items, generating ids for items supplied without one.
pub(crate) fn build_items(inputs: Vec<ItemInput>) -> Result<Vec<Item>, OrderError> {
    inputs
        .into_iter()
        .map(|input| {
            let id = if input.id.is_empty() {
                Uuid::new_v4().to_string()
            } else {
                input.id
            };
            Item::new(id, input.name, input.quantity, input.price)
        })
        .collect()
}
