use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::error::StoreFault;
use crate::item::Item;
use crate::store::{Document, TableClient};

/// In-memory item table keyed by `ItemId`.
///
/// A table built with [`MemoryTable::failing`] answers every call with
/// [`StoreFault::Unavailable`] and never changes its contents.
#[derive(Debug, Default)]
pub struct MemoryTable {
    items: Mutex<BTreeMap<String, Document>>,
    fault: Option<String>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table whose every operation fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            items: Mutex::default(),
            fault: Some(message.into()),
        }
    }

    /// Stores a raw document, bypassing [`Item`] validation.
    ///
    /// Lets tests seed items carrying attributes beyond `ItemId` and `Data`.
    pub fn insert_document(&self, item_id: impl Into<String>, document: Document) {
        self.lock().insert(item_id.into(), document);
    }

    pub fn get(&self, item_id: &str) -> Option<Document> {
        self.lock().get(item_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Document>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self) -> Result<(), StoreFault> {
        match &self.fault {
            Some(message) => Err(StoreFault::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TableClient for MemoryTable {
    async fn scan_all(&self) -> Result<Vec<Document>, StoreFault> {
        self.check()?;
        let items: Vec<Document> = self.lock().values().cloned().collect();
        debug!(count = items.len(), "memory table scanned");
        Ok(items)
    }

    async fn put_item(&self, item: Item) -> Result<(), StoreFault> {
        self.check()?;
        let item_id = item.item_id().to_string();
        self.lock().insert(item_id, item.into_document());
        Ok(())
    }
}
