//! Domain layer for the order service.
//!
//! This crate holds the order aggregate and nothing that performs I/O:
//! - `Order` aggregate root enforcing every business invariant
//! - `Item` value object owned by its order
//! - `OrderStatus` state machine with its terminal-state rule
//! - `OrderError` describing which invariant a rejected operation broke

pub mod error;
pub mod order;

pub use error::OrderError;
pub use order::{Item, Order, OrderStatus, UnknownStatus};
