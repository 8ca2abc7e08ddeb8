//! Utility modules supporting PubMed access.
//!
//! - [`HttpClient`]: shared reqwest client with timeouts and status mapping
//! - [`RetryConfig`] / [`with_retry`]: exponential backoff for transient errors

mod http;
mod retry;

pub use http::{HttpClient, DEFAULT_USER_AGENT};
pub use retry::{with_retry, RetryConfig, TransientError};
