//! Types shared by every layer of the order service.

mod types;

pub use types::OrderId;
