//! Cold-start wiring shared by the Lambda binaries.

use anyhow::Result;
use tracing::info;

use crate::config::GatewayConfig;
use crate::dynamodb::{DynamoDb, Table};
use crate::logging;

/// State built once per process and borrowed by every invocation.
pub struct GatewayRuntime {
    pub config: GatewayConfig,
    pub table: DynamoDb,
}

impl GatewayRuntime {
    /// Loads `.env`, installs logging, reads the configuration and builds the
    /// DynamoDB client.
    pub async fn init() -> Result<Self> {
        dotenv::dotenv().ok();
        logging::init_logging()?;

        let config = GatewayConfig::from_env()?;
        let sdk_config = aws_config::load_from_env().await;
        let table = DynamoDb::new(&sdk_config, Table::new(config.table_name()));

        info!(
            table = config.table_name(),
            response_mode = ?config.response_mode(),
            "gateway runtime initialized"
        );
        Ok(Self { config, table })
    }
}
