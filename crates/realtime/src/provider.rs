//! # Provider
//!
//! Provider defines external data interfaces for the crate.

use anyhow::Result;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::{Request, Response};

/// The `HttpRequest` trait defines the behavior for fetching data from a source.
pub trait HttpRequest: Send + Sync {
    /// Make outbound HTTP request.
    ///
    /// Implementations return any response the server sends, including
    /// non-success statuses. Only transport failures are errors.
    fn fetch(&self, request: Request<Bytes>)
    -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

/// The `Config` trait is used by implementers to provide configuration to
/// dependent crates.
pub trait Config: Send + Sync {
    /// Request configuration setting.
    fn get(&self, key: &str) -> impl Future<Output = Result<String>> + Send;
}

/// The `Clock` trait supplies the current time, so elapsed-time values can be
/// computed deterministically in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
