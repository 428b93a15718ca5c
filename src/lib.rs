//! Item-store gateway: read-all and write-one Lambda handlers over a
//! key-value table.
//!
//! - [`handlers::read_all`]: scans the table and returns every item.
//! - [`handlers::write_item`]: upserts one item parsed from the request body.
//! - [`TableClient`]: the table capability both handlers run against, with a
//!   DynamoDB implementation in [`dynamodb`] and an in-memory one in
//!   [`MemoryTable`].
//! - [`ResponseEnvelope`]: the API Gateway proxy shaped response.
//!
//! The table client is built once per process by [`GatewayRuntime::init`] and
//! passed by reference into every invocation.

pub mod config;
pub mod dynamodb;
pub mod error;
pub mod handlers;
pub mod item;
pub mod logging;
pub mod response;
pub mod runtime;
pub mod store;
pub mod utils;


pub use config::{GatewayConfig, ResponseMode};
pub use error::{GatewayError, StoreFault, ValidationFault};
pub use item::Item;
pub use response::ResponseEnvelope;
pub use runtime::GatewayRuntime;
pub use store::{Document, MemoryTable, TableClient};
