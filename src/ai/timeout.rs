//! Bounded waits on the generation service
//!
//! The HTTP client carries its own timeout; this wrapper bounds the whole
//! call (connect, response, body) so a stalled producer is reported as a
//! transport failure instead of hanging the caller.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::ai::timeout::with_timeout;
//!
//! let response = with_timeout(
//!     Duration::from_secs(60),
//!     provider.generate(&request),
//!     "generation request",
//! ).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::types::{Result, ValidatorError};

/// Execute an async operation with a timeout
///
/// Returns `ValidatorError::Timeout` if the operation doesn't complete within
/// the specified duration.
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(ValidatorError::timeout(operation_name, timeout)),
    }
}
