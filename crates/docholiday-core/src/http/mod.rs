//! HTTP client for the doc.holiday API

pub mod client;
pub mod retry;
pub mod submitter;

pub use client::{RawResponse, ReqwestTransport, Transport, DEFAULT_API_URL};
pub use retry::{RetryDecision, RetryPolicy};
pub use submitter::JobSubmitter;
