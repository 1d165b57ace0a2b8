//! Order-created notifications for the order service.
//!
//! Provides the [`OrderPublisher`] port and two adapters:
//! - [`AmqpOrderPublisher`] sending JSON to a durable direct exchange
//! - [`InMemoryOrderPublisher`] for tests, recording calls
//!
//! Publishing happens after the order is committed and is not covered by the
//! storage transaction. An order can therefore exist without ever having been
//! announced; nothing here retries or records undelivered notifications.

pub mod amqp;
pub mod error;
pub mod memory;
pub mod message;
pub mod publisher;

pub use amqp::{AmqpOrderPublisher, AmqpSettings};
pub use error::{PublishError, Result};
pub use memory::InMemoryOrderPublisher;
pub use publisher::OrderPublisher;
