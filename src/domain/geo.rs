use serde::{Deserialize, Serialize};

use super::marker::GeoMarker;

/// Mean Earth radius used for distance estimates.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two points, in kilometres.
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Order markers by distance from `origin`, nearest first.
///
/// The sort is stable: markers at equal distance keep their input order.
pub fn sort_nearest_first(markers: &[GeoMarker], origin: LatLng) -> Vec<GeoMarker> {
    let mut keyed: Vec<(f64, &GeoMarker)> = markers
        .iter()
        .map(|marker| (haversine_km(origin, marker.position()), marker))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, marker)| marker.clone()).collect()
}
