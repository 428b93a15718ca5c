//! Lambda function returning every item in the table.

use item_gateway::handlers::read_all;
use item_gateway::{GatewayRuntime, ResponseEnvelope};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{info_span, Instrument};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let runtime = GatewayRuntime::init().await?;
    let table = &runtime.table;
    let mode = runtime.config.response_mode();

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        let span = info_span!("invocation", request_id = %event.context.request_id);
        let response = read_all::handle(table, mode, &event.payload)
            .instrument(span)
            .await;
        Ok::<ResponseEnvelope, Error>(response)
    }))
    .await
}
