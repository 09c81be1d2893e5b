//! # Realtime Core
//!
//! Core modules for the Realtime platform.

mod provider;

pub use crate::provider::*;
