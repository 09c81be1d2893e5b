//! # Map View
//!
//! The render model handed to a map surface: where to center, which markers to
//! place, the radius overlay and the active filter chips. Drawing it is the
//! surface's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::{FilterField, FilterState, RADIUS_KM, apply_filter};
use crate::geo::Coordinate;
use crate::vehicle::VehiclePosition;

/// Buenos Aires city center.
pub const CITY_CENTER: Coordinate = Coordinate::new(-34.61, -58.45);
pub const DEFAULT_ZOOM: u8 = 12;
pub const DEFAULT_ICON_URL: &str = "/colectivo.png";

/// Marker icon placement, in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub url: String,
    pub size: [u32; 2],
    pub anchor: [u32; 2],
}

impl Icon {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), size: [41, 41], anchor: [20, 35] }
    }
}

impl Default for Icon {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_URL)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: String,
    pub position: Coordinate,
    pub route_short_name: String,
    pub trip_headsign: String,
    pub minutes_ago: i64,
}

/// Circle drawn around the proximity target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub center: Coordinate,
    pub radius_m: f64,
}

/// A removable badge for one active filter field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub field: FilterField,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub icon: Icon,
    pub markers: Vec<Marker>,
    pub overlay: Option<Overlay>,
    pub chips: Vec<Chip>,
}

impl MapView {
    /// Build the view of `vehicles` under `filter`, as of `now`.
    #[must_use]
    pub fn build(
        vehicles: &[VehiclePosition], filter: &FilterState, now: DateTime<Utc>, icon: Icon,
    ) -> Self {
        let markers = apply_filter(vehicles, filter)
            .into_iter()
            .map(|v| Marker {
                minutes_ago: v.minutes_ago(now),
                position: v.position(),
                id: v.id,
                route_short_name: v.route_short_name,
                trip_headsign: v.trip_headsign,
            })
            .collect();

        let overlay =
            filter.target().map(|center| Overlay { center, radius_m: RADIUS_KM * 1000.0 });

        Self {
            center: CITY_CENTER,
            zoom: DEFAULT_ZOOM,
            icon,
            markers,
            overlay,
            chips: chips(filter),
        }
    }
}

fn chips(filter: &FilterState) -> Vec<Chip> {
    let mut chips = vec![];
    if let Some(route) = &filter.route_prefix {
        chips.push(Chip { field: FilterField::Route, label: format!("Route: {route}") });
    }
    if let Some(latitude) = filter.target_latitude {
        chips.push(Chip { field: FilterField::Latitude, label: format!("Latitude: {latitude}") });
    }
    if let Some(longitude) = filter.target_longitude {
        chips.push(Chip {
            field: FilterField::Longitude,
            label: format!("Longitude: {longitude}"),
        });
    }
    chips
}
