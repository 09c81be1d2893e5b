//! Route and proximity filtering.
//!
//! A [`FilterState`] is replaced wholesale by the user's "apply", "reset" and
//! "clear" actions; [`apply_filter`] is the pure selection over a snapshot.

use serde::{Deserialize, Serialize};

use crate::geo::{Coordinate, haversine_distance_km};
use crate::vehicle::VehiclePosition;

/// Vehicles further than this from the target coordinate are filtered out.
pub const RADIUS_KM: f64 = 1.0;

/// The text the user typed into the three filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterInput {
    pub route: String,
    pub latitude: String,
    pub longitude: String,
}

/// The filter fields that can be cleared individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Route,
    Latitude,
    Longitude,
}

/// Active filter constraints. `None` means "no constraint of this kind".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub route_prefix: Option<String>,
    pub target_latitude: Option<f64>,
    pub target_longitude: Option<f64>,
}

impl FilterState {
    /// Build the filter from user input (the "apply filter" action).
    ///
    /// An empty route means no route constraint. Coordinates are parsed after
    /// trimming whitespace; empty, unparseable, non-finite and zero values all
    /// leave the coordinate unset, so entering `0` disables the proximity filter.
    #[must_use]
    pub fn from_input(input: &FilterInput) -> Self {
        let route_prefix = (!input.route.is_empty()).then(|| input.route.clone());

        Self {
            route_prefix,
            target_latitude: coordinate_from_input(&input.latitude),
            target_longitude: coordinate_from_input(&input.longitude),
        }
    }

    /// A copy of this filter with one field cleared.
    #[must_use]
    pub fn without(&self, field: FilterField) -> Self {
        let mut next = self.clone();
        match field {
            FilterField::Route => next.route_prefix = None,
            FilterField::Latitude => next.target_latitude = None,
            FilterField::Longitude => next.target_longitude = None,
        }
        next
    }

    /// The proximity target, when both coordinates are set.
    #[must_use]
    pub fn target(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.target_latitude?, self.target_longitude?))
    }

    /// True when neither the route nor the proximity constraint is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_prefix.is_none() && self.target().is_none()
    }

    /// Whether `vehicle` satisfies both the route and proximity constraints.
    #[must_use]
    pub fn matches(&self, vehicle: &VehiclePosition) -> bool {
        let route_match = self
            .route_prefix
            .as_deref()
            .is_none_or(|prefix| vehicle.route_short_name.starts_with(prefix));

        let within_radius = self
            .target()
            .is_none_or(|target| haversine_distance_km(vehicle.position(), target) <= RADIUS_KM);

        route_match && within_radius
    }
}

/// Select the vehicles matching `filter`, preserving their order.
#[must_use]
pub fn apply_filter(vehicles: &[VehiclePosition], filter: &FilterState) -> Vec<VehiclePosition> {
    vehicles.iter().filter(|v| filter.matches(v)).cloned().collect()
}

fn coordinate_from_input(text: &str) -> Option<f64> {
    let value = text.trim().parse::<f64>().ok()?;
    (value.is_finite() && value != 0.0).then_some(value)
}
