use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::Coordinate;

/// One vehicle's reported position, as returned by `vehiclePositionsSimple`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePosition {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub route_short_name: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Unix epoch in seconds
    pub timestamp: i64,

    #[serde(default)]
    pub trip_headsign: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl VehiclePosition {
    #[must_use]
    pub const fn position(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Whole minutes elapsed between the report and `now`, rounded down.
    ///
    /// Saturates rather than overflowing on out-of-range upstream timestamps.
    #[must_use]
    pub fn minutes_ago(&self, now: DateTime<Utc>) -> i64 {
        let reported_ms = self.timestamp.saturating_mul(1000);
        let elapsed_ms = now.timestamp_millis().saturating_sub(reported_ms);
        elapsed_ms.div_euclid(60_000)
    }
}

// The API has served `id` both as a string and as a bare number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
