//! Vehicle position data source.
//!
//! One time-bounded GET against the city transport API. Any failure is logged
//! and answered with the bundled fallback dataset.

use std::time::Duration;

use anyhow::Context;
use bytes::Bytes;
use http::header::ACCEPT;
use http::{Method, Request};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::provider::{Config, HttpRequest};
use crate::vehicle::VehiclePosition;
use crate::{Error, Result, fallback};

pub const DEFAULT_BASE_URL: &str = "https://apitransporte.buenosaires.gob.ar";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
const POSITIONS_PATH: &str = "/colectivos/vehiclePositionsSimple";

/// API client credentials, sent as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Where and how to fetch vehicle positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub base_url: String,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: Credentials::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Source {
    /// Read the source settings from configuration.
    ///
    /// Missing credentials are not an error here: the request goes out with
    /// empty values and the API rejects it, which lands on the fallback path.
    pub async fn from_config(provider: &impl Config) -> Self {
        let base_url = Config::get(provider, "TRANSPORT_API_URL")
            .await
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = match Config::get(provider, "FETCH_TIMEOUT_MS").await {
            Ok(value) => value.trim().parse::<u64>().map_or_else(
                |_| {
                    warn!(value = %value, "invalid FETCH_TIMEOUT_MS, using default");
                    DEFAULT_TIMEOUT
                },
                Duration::from_millis,
            ),
            Err(_) => DEFAULT_TIMEOUT,
        };

        let credentials = Credentials {
            client_id: credential(provider, "CLIENT_ID").await,
            client_secret: credential(provider, "CLIENT_SECRET").await,
        };

        Self { base_url, credentials, timeout }
    }

    /// The full request URL, credentials included.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}{POSITIONS_PATH}?client_id={}&client_secret={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.credentials.client_id),
            urlencoding::encode(&self.credentials.client_secret),
        )
    }
}

async fn credential(provider: &impl Config, key: &str) -> String {
    match Config::get(provider, key).await {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "`{key}` not configured, the API will reject the request");
            String::new()
        }
    }
}

/// Where a snapshot's vehicles came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Origin {
    Live,
    Fallback,
}

/// The vehicles available for display, replaced wholesale on each fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub vehicles: Vec<VehiclePosition>,
    pub origin: Origin,
}

impl Snapshot {
    #[must_use]
    pub fn fallback() -> Self {
        Self { vehicles: fallback::vehicles(), origin: Origin::Fallback }
    }
}

/// Fetch the current vehicle positions.
///
/// Never fails: transport errors, non-success statuses, timeouts and malformed
/// bodies are logged and the fallback dataset is returned instead.
pub async fn fetch_vehicles(source: &Source, provider: &impl HttpRequest) -> Snapshot {
    match try_fetch(source, provider).await {
        Ok(vehicles) => {
            info!(
                monotonic_counter.vehicles_fetched = vehicles.len(),
                "fetched live vehicle positions"
            );
            Snapshot { vehicles, origin: Origin::Live }
        }
        Err(err) => {
            warn!(
                monotonic_counter.fallback_used = 1,
                code = err.code(),
                error = %err,
                "vehicle position fetch failed, using fallback data"
            );
            Snapshot::fallback()
        }
    }
}

async fn try_fetch(source: &Source, provider: &impl HttpRequest) -> Result<Vec<VehiclePosition>> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(source.url())
        .header(ACCEPT, "application/json")
        .body(Bytes::new())
        .context("building vehicle positions request")?;

    debug!(base_url = %source.base_url, timeout = ?source.timeout, "requesting vehicle positions");

    // dropping the in-flight request on expiry cancels it
    let response = match tokio::time::timeout(source.timeout, provider.fetch(request)).await {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => return Err(Error::Transport(format!("{err:#}"))),
        Err(_elapsed) => {
            let millis = u64::try_from(source.timeout.as_millis()).unwrap_or(u64::MAX);
            return Err(Error::Timeout(millis));
        }
    };

    let status = response.status();
    if !status.is_success() {
        return Err(Error::BadStatus(status.as_u16()));
    }

    let vehicles: Vec<VehiclePosition> = serde_json::from_slice(response.body())?;
    Ok(vehicles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_credentials() {
        let source = Source {
            base_url: "https://example.test/".to_string(),
            credentials: Credentials {
                client_id: "abc".to_string(),
                client_secret: "s3cr&t=1".to_string(),
            },
            timeout: DEFAULT_TIMEOUT,
        };

        assert_eq!(
            source.url(),
            "https://example.test/colectivos/vehiclePositionsSimple?client_id=abc&client_secret=s3cr%26t%3D1"
        );
    }

    #[test]
    fn default_source() {
        let source = Source::default();
        assert_eq!(source.timeout, Duration::from_secs(10));
        assert_eq!(
            source.url(),
            "https://apitransporte.buenosaires.gob.ar/colectivos/vehiclePositionsSimple?client_id=&client_secret="
        );
    }
}
