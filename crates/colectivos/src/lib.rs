//! # Colectivos
//!
//! Live bus ("colectivo") positions for Buenos Aires: fetches a snapshot from
//! the city's transport API, filters it by route and proximity, and builds the
//! view model a map surface renders.

mod error;
mod filter;
mod geo;
mod session;
mod source;
mod vehicle;

pub mod fallback;
pub mod provider;
pub mod view;

pub use self::error::Error;
pub use self::filter::*;
pub use self::geo::*;
pub use self::session::Session;
pub use self::source::*;
pub use self::vehicle::*;

/// Result type for the crate.
pub type Result<T> = anyhow::Result<T, Error>;
