//! Assertion macros for client results
//!
//! Failures print the whole `ClientError`, which names the resource and id.

/// Unwrap an `Ok`, printing the error otherwise
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Expect a `ClientError` matching `$pattern`
#[macro_export]
macro_rules! assert_client_err {
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => panic!("Expected {}, got: {:?}", stringify!($pattern), e),
        }
    };
}

/// Expect `ClientError::NotFound`, optionally for a given resource name
#[macro_export]
macro_rules! assert_not_found {
    ($result:expr) => {
        $crate::assert_client_err!($result, rescuedesk::shared::error::ClientError::NotFound { .. })
    };
    ($result:expr, $resource:expr) => {
        match $result {
            Err(rescuedesk::shared::error::ClientError::NotFound { resource, .. }) => {
                assert_eq!(resource, $resource, "NotFound for the wrong resource")
            }
            other => panic!("Expected NotFound({}), got: {:?}", $resource, other),
        }
    };
}

/// Expect `ClientError::ValidationRejected` with `$status`; yields the message
#[macro_export]
macro_rules! assert_rejected {
    ($result:expr, $status:expr) => {
        match $result {
            Err(rescuedesk::shared::error::ClientError::ValidationRejected { status, message }) => {
                assert_eq!(status, $status, "rejected with unexpected status: {}", message);
                message
            }
            other => panic!("Expected ValidationRejected({}), got: {:?}", $status, other),
        }
    };
}
