//! The table abstraction the handlers run against.
//!
//! - [`TableClient`]: scan-all and upsert over a key-value table.
//! - [`MemoryTable`]: in-process implementation for tests and local runs.
//!
//! The DynamoDB implementation lives in [`crate::dynamodb`].

mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreFault;
use crate::item::Item;

pub use memory::MemoryTable;

/// A stored item exactly as the table returns it, every attribute included.
pub type Document = Map<String, Value>;

/// Capability-scoped access to the backing table.
///
/// One instance is built at cold start and shared by reference across
/// invocations, so implementations must be safe for concurrent use.
#[async_trait]
pub trait TableClient: Send + Sync {
    /// Returns every item in the table.
    ///
    /// Implementations follow any store-side continuation themselves; callers
    /// always receive the complete result set or a fault.
    async fn scan_all(&self) -> Result<Vec<Document>, StoreFault>;

    /// Writes `item`, replacing any item with the same `ItemId`.
    async fn put_item(&self, item: Item) -> Result<(), StoreFault>;
}
