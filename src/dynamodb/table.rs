use crate::item::ITEM_ID_KEY;

/// DynamoDB table the gateway reads from and writes to.
///
/// The table has a simple primary key: a string partition key, `ItemId` by
/// default, and no sort key. Items carry one further attribute, `Data`,
/// which DynamoDB stores as whatever type the JSON value maps to (a map for
/// objects, a list for arrays, and so on).
///
/// # Example
///
/// ```
/// use item_gateway::dynamodb::Table;
///
/// let table = Table::new("HighAvailabilityTable");
/// assert_eq!(table.partition_key(), "ItemId");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    partition_key: String,
}

impl Table {
    /// Creates a table keyed by `ItemId`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partition_key: ITEM_ID_KEY.to_string(),
        }
    }

    /// Returns the name of the table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the partition key of the table.
    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }
}
