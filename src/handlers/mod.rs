//! Lambda handlers.
//!
//! Each handler turns one invocation event into exactly one
//! [`ResponseEnvelope`]: faults are rendered into the envelope, never
//! returned to the runtime.

pub mod read_all;
pub mod write_item;

use tracing::{error, warn};

use crate::config::ResponseMode;
use crate::error::GatewayError;
use crate::response::ResponseEnvelope;

fn fault_response(err: &GatewayError, mode: ResponseMode, cors: bool) -> ResponseEnvelope {
    match err {
        GatewayError::Validation(fault) => {
            warn!(kind = err.kind(), error = %fault, "request rejected")
        }
        GatewayError::Store(fault) => {
            error!(kind = err.kind(), error = %fault, "table operation failed")
        }
    }
    ResponseEnvelope::fault(err, mode, cors)
}
