//! Upserts a single item from a request body.

use serde_json::Value;
use tracing::{info, instrument};

use crate::config::ResponseMode;
use crate::error::{GatewayError, ValidationFault};
use crate::handlers::fault_response;
use crate::item::Item;
use crate::response::ResponseEnvelope;
use crate::store::TableClient;

/// Saves the item described by the event's `body`.
///
/// `body` must be a JSON-encoded string holding an object with `ItemId` and
/// `Data`. The item replaces any stored item with the same `ItemId`; nothing
/// is written if the event fails validation.
#[instrument(skip_all)]
pub async fn handle<T>(table: &T, mode: ResponseMode, event: &Value) -> ResponseEnvelope
where
    T: TableClient + ?Sized,
{
    let cors = mode == ResponseMode::Typed;
    match save(table, event).await {
        Ok(()) => ResponseEnvelope::saved(cors),
        Err(err) => fault_response(&err, mode, cors),
    }
}

async fn save<T>(table: &T, event: &Value) -> Result<(), GatewayError>
where
    T: TableClient + ?Sized,
{
    let item = parse_event(event)?;
    let item_id = item.item_id().to_string();
    table.put_item(item).await?;
    info!(item_id = %item_id, "item saved");
    Ok(())
}

/// Extracts the item from an API Gateway proxy style event.
pub fn parse_event(event: &Value) -> Result<Item, ValidationFault> {
    match event.get("body") {
        None | Some(Value::Null) => Err(ValidationFault::MissingBody),
        Some(Value::String(body)) => Item::from_body(body),
        Some(_) => Err(ValidationFault::BodyNotString),
    }
}
