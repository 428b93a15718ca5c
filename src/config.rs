//! Process configuration, read once at cold start.
//!
//! | Variable        | Default                 | Meaning                          |
//! |-----------------|-------------------------|----------------------------------|
//! | `TABLE_NAME`    | `HighAvailabilityTable` | backing DynamoDB table           |
//! | `RESPONSE_MODE` | `typed`                 | `typed` or `legacy` fault policy |
//!
//! AWS region, credentials and `AWS_ENDPOINT_URL` are picked up by
//! `aws_config::load_from_env`.

use std::str::FromStr;

use anyhow::{anyhow, Result};

pub const DEFAULT_TABLE_NAME: &str = "HighAvailabilityTable";
const TABLE_NAME_VAR: &str = "TABLE_NAME";
const RESPONSE_MODE_VAR: &str = "RESPONSE_MODE";

/// How faults and headers are rendered into response envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Validation faults map to 400, store faults to 500, and every envelope
    /// carries the CORS header set.
    #[default]
    Typed,
    /// Every fault maps to 500 and write envelopes carry no headers.
    Legacy,
}

impl FromStr for ResponseMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typed" => Ok(ResponseMode::Typed),
            "legacy" => Ok(ResponseMode::Legacy),
            other => Err(anyhow!(
                "invalid {RESPONSE_MODE_VAR} '{other}', expected 'typed' or 'legacy'"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    table_name: String,
    response_mode: ResponseMode,
}

impl GatewayConfig {
    pub fn new(table_name: impl Into<String>, response_mode: ResponseMode) -> Self {
        Self {
            table_name: table_name.into(),
            response_mode,
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let table_name = lookup(TABLE_NAME_VAR)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
        let response_mode = lookup(RESPONSE_MODE_VAR)
            .map(|mode| mode.parse::<ResponseMode>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self::new(table_name, response_mode))
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn response_mode(&self) -> ResponseMode {
        self.response_mode
    }
}
