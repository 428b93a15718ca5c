use std::future::Future;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::{
    operation::{
        create_table::CreateTableOutput, describe_table::DescribeTableError,
        describe_table::DescribeTableOutput, scan::ScanOutput,
    },
    types::{
        AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
        TableStatus,
    },
    Client,
};
use tracing::{debug, error, info};

use crate::dynamodb::error::{map_put_item_error, map_scan_error};
use crate::dynamodb::item::{to_attributes, to_document, Attributes};
use crate::dynamodb::Table;
use crate::error::StoreFault;
use crate::item::Item;
use crate::store::{Document, TableClient};
use crate::utils::{retry_with_backoff, Backoff};

/// DynamoDB-backed item table.
///
/// Wraps an `aws_sdk_dynamodb::Client` bound to a single [`Table`]. The SDK
/// client is cheap to share and holds no per-request state, so one instance
/// is built at cold start and reused for every invocation.
///
/// # Operations
///
/// - **Scan**: [`TableClient::scan_all`] reads every item, following
///   `LastEvaluatedKey` until the table is exhausted.
/// - **Put**: [`TableClient::put_item`] writes an item unconditionally, so the
///   last write to an `ItemId` wins.
///
/// The table management helpers (`check_auth`, `create_table_if_not_exists`,
/// `wait_until_active`) are meant for local setup against DynamoDB Local and
/// for integration tests; the handlers never call them.
///
/// # Example
///
/// ```no_run
/// use item_gateway::dynamodb::{DynamoDb, Table};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = aws_config::load_from_env().await;
///     let ddb = DynamoDb::new(&config, Table::new("HighAvailabilityTable"));
///
///     ddb.create_table_if_not_exists().await?;
///     ddb.wait_until_active(Default::default()).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DynamoDb {
    client: Client,
    table: Table,
}

impl DynamoDb {
    /// Creates a new `DynamoDb` instance.
    pub fn new(sdk_config: &aws_config::SdkConfig, table: Table) -> Self {
        Self::from_client(Client::new(sdk_config), table)
    }

    pub fn from_client(client: Client, table: Table) -> Self {
        Self { client, table }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Verifies authentication by attempting to list tables.
    pub async fn check_auth(&self) -> Result<()> {
        self.client.list_tables().limit(1).send().await.map_err(|e| {
            error!("Authentication failed: {}", e);
            anyhow!("Authentication failed")
        })?;
        info!("Authentication successful");
        Ok(())
    }

    // --- Table Operations ---

    /// Creates the table if it doesn't exist.
    pub async fn create_table_if_not_exists(&self) -> Result<Option<CreateTableOutput>> {
        let name = self.table.name();
        if self.table_exists().await? {
            info!("Table '{name}' exists");
            return Ok(None);
        }

        let attribute_definition = AttributeDefinition::builder()
            .attribute_name(self.table.partition_key())
            .attribute_type(ScalarAttributeType::S)
            .build()?;

        let key_schema = KeySchemaElement::builder()
            .attribute_name(self.table.partition_key())
            .key_type(KeyType::Hash)
            .build()?;

        let output = self
            .client
            .create_table()
            .table_name(name)
            .billing_mode(BillingMode::PayPerRequest)
            .attribute_definitions(attribute_definition)
            .key_schema(key_schema)
            .send()
            .await?;
        info!("Table '{name}' created");
        Ok(Some(output))
    }

    /// Checks if the table exists.
    pub async fn table_exists(&self) -> Result<bool> {
        match self.describe_table().await {
            Ok(_) => Ok(true),
            Err(err) => match err.downcast::<DescribeTableError>() {
                Ok(DescribeTableError::ResourceNotFoundException(_)) => Ok(false),
                Ok(other) => Err(other.into()),
                Err(err) => Err(err),
            },
        }
    }

    /// Retrieves the table description.
    pub async fn describe_table(&self) -> Result<DescribeTableOutput> {
        self.client
            .describe_table()
            .table_name(self.table.name())
            .send()
            .await
            .map_err(|e| e.into_service_error().into())
    }

    /// Polls the table description until its status is `ACTIVE`.
    pub async fn wait_until_active(&self, backoff: Backoff) -> Result<()> {
        retry_with_backoff(|| self.ensure_active(), backoff).await
    }

    async fn ensure_active(&self) -> Result<()> {
        let description = self.describe_table().await?;
        match description.table().and_then(|t| t.table_status()) {
            Some(TableStatus::Active) => Ok(()),
            status => Err(anyhow!(
                "table '{}' is not active yet (status {:?})",
                self.table.name(),
                status
            )),
        }
    }

    // --- Item Operations ---

    async fn scan_pages(&self) -> Result<Vec<Document>, StoreFault> {
        let name = self.table.name();
        let (documents, pages) = collect_pages(|start_key| async move {
            self.client
                .scan()
                .table_name(name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map(ScanPage::from)
                .map_err(|e| map_scan_error(e, name))
        })
        .await?;

        debug!(table = name, pages, count = documents.len(), "scan complete");
        Ok(documents)
    }
}

/// One page of a scan.
pub(crate) struct ScanPage {
    items: Vec<Attributes>,
    last_evaluated_key: Option<Attributes>,
}

impl From<ScanOutput> for ScanPage {
    fn from(output: ScanOutput) -> Self {
        Self {
            items: output.items.unwrap_or_default(),
            last_evaluated_key: output.last_evaluated_key,
        }
    }
}

/// Fetches pages until one comes back without a `LastEvaluatedKey`.
///
/// Each page's key is passed to `fetch` as the next request's
/// `ExclusiveStartKey`. Returns the converted items and the page count; any
/// fault discards the items collected so far.
pub(crate) async fn collect_pages<F, Fut>(
    mut fetch: F,
) -> Result<(Vec<Document>, usize), StoreFault>
where
    F: FnMut(Option<Attributes>) -> Fut,
    Fut: Future<Output = Result<ScanPage, StoreFault>>,
{
    let mut documents = Vec::new();
    let mut start_key = None;
    let mut pages = 0usize;

    loop {
        let page = fetch(start_key.take()).await?;
        pages += 1;

        for attributes in page.items {
            documents.push(to_document(attributes)?);
        }

        start_key = page.last_evaluated_key;
        if start_key.is_none() {
            break;
        }
    }

    Ok((documents, pages))
}

#[async_trait]
impl TableClient for DynamoDb {
    async fn scan_all(&self) -> Result<Vec<Document>, StoreFault> {
        self.scan_pages().await
    }

    async fn put_item(&self, item: Item) -> Result<(), StoreFault> {
        let name = self.table.name();
        self.client
            .put_item()
            .table_name(name)
            .set_item(Some(to_attributes(&item)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, name))?;

        debug!(table = name, item_id = item.item_id(), "item put");
        Ok(())
    }
}
