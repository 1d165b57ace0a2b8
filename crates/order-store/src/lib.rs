//! Order persistence for the order service.
//!
//! Provides the [`OrderRepository`] port and two adapters:
//! - [`PostgresOrderRepository`] mapping an order onto `orders` + `order_items`
//!   inside one transaction per save
//! - [`InMemoryOrderRepository`] for tests, with scripted failures

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{RepositoryError, Result};
pub use memory::InMemoryOrderRepository;
pub use postgres::PostgresOrderRepository;
pub use store::OrderRepository;
