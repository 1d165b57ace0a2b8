//! Order use cases.
//!
//! Each use case is a small struct generic over the ports it needs. The
//! aggregate enforces its own invariants; the use cases add the checks that
//! depend on stored state and decide what to write and announce.

mod cancel_order;
mod create_order;
pub mod dto;
pub mod error;
mod get_order;
mod list_orders;
mod update_order;

pub use cancel_order::CancelOrder;
pub use create_order::CreateOrder;
pub use dto::{
    CreateOrderInput, ItemInput, ItemOutput, ListOrdersOutput, OrderOutput, UpdateOrderInput,
};
pub use error::ServiceError;
pub use get_order::GetOrder;
pub use list_orders::ListOrders;
pub use update_order::UpdateOrder;
