//! Returns every item in the table.

use serde_json::Value;
use tracing::{info, instrument};

use crate::config::ResponseMode;
use crate::error::GatewayError;
use crate::handlers::fault_response;
use crate::response::ResponseEnvelope;
use crate::store::TableClient;

/// Scans the whole table and returns the items as a JSON array.
///
/// The event carries no parameters and is not inspected. Items are returned
/// as the table stores them. On a store fault no partial result is returned.
/// Read envelopes carry the CORS header set in every mode.
#[instrument(skip_all)]
pub async fn handle<T>(table: &T, mode: ResponseMode, _event: &Value) -> ResponseEnvelope
where
    T: TableClient + ?Sized,
{
    match scan(table).await {
        Ok(items) => ResponseEnvelope::ok(&items, true),
        Err(err) => fault_response(&err, mode, true),
    }
}

async fn scan<T>(table: &T) -> Result<Value, GatewayError>
where
    T: TableClient + ?Sized,
{
    let documents = table.scan_all().await?;
    info!(count = documents.len(), "items scanned");
    Ok(Value::Array(
        documents.into_iter().map(Value::Object).collect(),
    ))
}
