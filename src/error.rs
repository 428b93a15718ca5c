use thiserror::Error;

/// A request the gateway refuses to act on.
///
/// Raised before the table is touched, so a validation fault never leaves a
/// partial write behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFault {
    #[error("event has no `body` field")]
    MissingBody,
    #[error("event `body` must be a JSON-encoded string")]
    BodyNotString,
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(String),
    #[error("request body must be a JSON object")]
    BodyNotObject,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("`ItemId` must be a string")]
    InvalidItemId,
    #[error("`ItemId` must not be empty")]
    EmptyItemId,
}

/// A failure reported by, or while talking to, the backing table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreFault {
    #[error("table '{0}' not found")]
    TableNotFound(String),
    #[error("throughput exceeded, please retry")]
    Throttled,
    #[error("table service internal error")]
    Internal,
    #[error("item '{item_id}' could not be converted: {message}")]
    Conversion { item_id: String, message: String },
    #[error("{operation} failed: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },
    #[error("table unavailable: {0}")]
    Unavailable(String),
}

/// Every fault a handler can observe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationFault),
    #[error(transparent)]
    Store(#[from] StoreFault),
}

impl GatewayError {
    /// Short label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "validation",
            GatewayError::Store(_) => "store",
        }
    }
}
