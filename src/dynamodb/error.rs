//! Maps AWS SDK errors to [`StoreFault`].
//!
//! Service errors are classified by kind; anything that never reached the
//! service (dispatch, timeout, credentials) is reported as unavailable.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;

use crate::error::StoreFault;

/// Map a Scan SDK error to StoreFault.
pub(crate) fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
    table_name: &str,
) -> StoreFault {
    match err {
        SdkError::ServiceError(service) => match service.into_err() {
            ScanError::ResourceNotFoundException(_) => {
                StoreFault::TableNotFound(table_name.to_string())
            }
            ScanError::ProvisionedThroughputExceededException(_)
            | ScanError::RequestLimitExceeded(_) => StoreFault::Throttled,
            ScanError::InternalServerError(_) => StoreFault::Internal,
            err => StoreFault::Rejected {
                operation: "Scan",
                message: DisplayErrorContext(&err).to_string(),
            },
        },
        err => StoreFault::Unavailable(DisplayErrorContext(&err).to_string()),
    }
}

/// Map a PutItem SDK error to StoreFault.
pub(crate) fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table_name: &str,
) -> StoreFault {
    match err {
        SdkError::ServiceError(service) => match service.into_err() {
            PutItemError::ResourceNotFoundException(_) => {
                StoreFault::TableNotFound(table_name.to_string())
            }
            PutItemError::ProvisionedThroughputExceededException(_)
            | PutItemError::RequestLimitExceeded(_) => StoreFault::Throttled,
            PutItemError::InternalServerError(_) => StoreFault::Internal,
            err => StoreFault::Rejected {
                operation: "PutItem",
                message: DisplayErrorContext(&err).to_string(),
            },
        },
        err => StoreFault::Unavailable(DisplayErrorContext(&err).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::error::{
        ProvisionedThroughputExceededException, ResourceNotFoundException,
    };

    #[test]
    fn test_scan_table_not_found() {
        let err: SdkError<ScanError, ()> = SdkError::service_error(
            ScanError::ResourceNotFoundException(ResourceNotFoundException::builder().build()),
            (),
        );
        assert_eq!(
            map_scan_error(err, "items"),
            StoreFault::TableNotFound("items".to_string())
        );
    }

    #[test]
    fn test_put_item_throttled() {
        let err: SdkError<PutItemError, ()> = SdkError::service_error(
            PutItemError::ProvisionedThroughputExceededException(
                ProvisionedThroughputExceededException::builder().build(),
            ),
            (),
        );
        assert_eq!(map_put_item_error(err, "items"), StoreFault::Throttled);
    }

    #[test]
    fn test_dispatch_failure_is_unavailable() {
        let err: SdkError<PutItemError, ()> = SdkError::timeout_error("deadline elapsed");
        assert!(matches!(
            map_put_item_error(err, "items"),
            StoreFault::Unavailable(_)
        ));
    }
}
