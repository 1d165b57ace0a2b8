//! Wire format for order-created notifications.

use domain::Order;

use crate::Result;

/// Content type attached to every published message.
pub const CONTENT_TYPE: &str = "application/json";

/// Encodes an order snapshot as the JSON notification body.
///
/// The document mirrors the aggregate: `id`, `customer_name`, `items` (each
/// with `id`, `name`, `quantity`, `price`), `status` as its lowercase name,
/// and the `created_at` / `updated_at` timestamps.
pub fn encode(order: &Order) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(order)?)
}
