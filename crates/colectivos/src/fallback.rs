//! Bundled example positions, served whenever the live API cannot be reached.

use std::sync::LazyLock;

use crate::vehicle::VehiclePosition;

/// The fixed fallback dataset.
#[must_use]
pub fn vehicles() -> Vec<VehiclePosition> {
    FALLBACK.clone()
}

static FALLBACK: LazyLock<Vec<VehiclePosition>> = LazyLock::new(|| {
    [
        ("3321", "152A", -34.60952, -58.44812, "a Olivos"),
        ("3345", "152B", -34.61433, -58.45210, "a La Boca"),
        ("2190", "15A", -34.61807, -58.44077, "a Barrio Norte"),
        ("1874", "25B", -34.59291, -58.46913, "a Constitución"),
        ("4410", "60A", -34.56817, -58.46012, "a Escobar"),
        ("5012", "39C", -34.60214, -58.42306, "a Barracas"),
        ("6120", "109A", -34.63551, -58.47980, "a Retiro"),
        ("7003", "7A", -34.70042, -58.45133, "a Plaza de Mayo"),
    ]
    .into_iter()
    .map(|(id, route, latitude, longitude, headsign)| VehiclePosition {
        id: id.to_string(),
        route_short_name: route.to_string(),
        latitude,
        longitude,
        timestamp: 1_713_196_800,
        trip_headsign: headsign.to_string(),
        route_id: None,
        agency_id: None,
        agency_name: None,
        direction: None,
        speed: None,
    })
    .collect()
});

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let vehicles = super::vehicles();
        let ids: HashSet<_> = vehicles.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids.len(), vehicles.len());
    }

    #[test]
    fn stable_between_calls() {
        assert_eq!(super::vehicles(), super::vehicles());
    }
}
