//! # Provider
//!
//! Provider defines external data interfaces for the crate. The host
//! application implements them; tests use a mock.

pub use realtime::{Clock, Config, HttpRequest};
