use super::geo::LatLng;

/// Current value of the device-location subscription.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LocationStatus {
    #[default]
    Initial,
    Loading,
    Available(LatLng),
    Error(String),
}

impl LocationStatus {
    pub fn point(&self) -> Option<LatLng> {
        match self {
            LocationStatus::Available(point) => Some(*point),
            _ => None,
        }
    }
}
