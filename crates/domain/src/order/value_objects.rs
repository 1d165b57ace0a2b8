//! Value objects for the order domain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderError;

/// A line item in an order.
///
/// Items have no lifecycle of their own: they are always created and replaced
/// as a whole set through their owning [`Order`](super::Order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: String,
    name: String,
    quantity: i32,
    price: Decimal,
}

impl Item {
    /// Creates a validated item.
    ///
    /// The id is taken as given; uniqueness within an order is not checked here.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: i32,
        price: Decimal,
    ) -> Result<Self, OrderError> {
        let item = Self {
            id: id.into(),
            name: name.into(),
            quantity,
            price,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks the item's own invariants.
    ///
    /// Items that arrive through deserialization bypass [`Item::new`], so the
    /// aggregate re-runs this on every item it accepts.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.name.is_empty() {
            return Err(OrderError::EmptyItemName);
        }
        if self.quantity <= 0 {
            return Err(OrderError::InvalidQuantity {
                quantity: self.quantity,
            });
        }
        if self.price <= Decimal::ZERO {
            return Err(OrderError::InvalidPrice { price: self.price });
        }
        self.checked_total().ok_or(OrderError::TotalOverflow)?;
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns quantity * price.
    ///
    /// Saturates at the decimal bounds for unvalidated items; validated items
    /// never reach them.
    pub fn total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Returns quantity * price, or `None` if it does not fit in a decimal.
    pub fn checked_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    /// Rebuilds an item from stored columns without validation.
    pub fn restore(id: String, name: String, quantity: i32, price: Decimal) -> Self {
        Self {
            id,
            name,
            quantity,
            price,
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Item{{id: {}, name: {}, quantity: {}, price: {:.2}}}",
            self.id, self.name, self.quantity, self.price
        )
    }
}
