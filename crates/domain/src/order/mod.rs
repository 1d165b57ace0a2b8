//! Order aggregate and related types.

mod aggregate;
mod state;
mod value_objects;

pub use aggregate::Order;
pub use state::{OrderStatus, UnknownStatus};
pub use value_objects::Item;

pub use crate::error::OrderError;
