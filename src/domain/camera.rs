use super::geo::LatLng;

pub const DEFAULT_ZOOM: f32 = 15.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 20.0;

/// Positions closer than this (degrees) are the same place to the map.
const TARGET_TOLERANCE_DEG: f64 = 0.0001;
const ZOOM_TOLERANCE: f32 = 0.1;

/// Map viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPosition {
    pub target: LatLng,
    pub zoom: f32,
    pub azimuth: f32,
    pub tilt: f32,
}

impl CameraPosition {
    /// North-up, untilted camera over `target`.
    pub fn centered(target: LatLng, zoom: f32) -> Self {
        Self {
            target,
            zoom,
            azimuth: 0.0,
            tilt: 0.0,
        }
    }

    /// Same camera with `zoom + delta`, clamped to the supported range.
    pub fn zoomed_by(&self, delta: f32) -> Self {
        Self {
            zoom: (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM),
            ..*self
        }
    }

    /// Whether moving from `self` to `other` is worth a camera update.
    pub fn differs_significantly(&self, other: &CameraPosition) -> bool {
        (self.target.latitude - other.target.latitude).abs() > TARGET_TOLERANCE_DEG
            || (self.target.longitude - other.target.longitude).abs() > TARGET_TOLERANCE_DEG
            || (self.zoom - other.zoom).abs() > ZOOM_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(zoom: f32) -> CameraPosition {
        CameraPosition::centered(LatLng::new(10.0, 20.0), zoom)
    }

    #[test]
    fn zoom_is_clamped() {
        assert_eq!(camera(19.5).zoomed_by(3.0).zoom, MAX_ZOOM);
        assert_eq!(camera(1.5).zoomed_by(-3.0).zoom, MIN_ZOOM);
        assert_eq!(camera(10.0).zoomed_by(1.0).zoom, 11.0);
    }

    #[test]
    fn zoom_keeps_target_and_orientation() {
        let mut start = camera(10.0);
        start.azimuth = 45.0;
        start.tilt = 30.0;
        let zoomed = start.zoomed_by(-2.0);
        assert_eq!(zoomed.target, start.target);
        assert_eq!(zoomed.azimuth, 45.0);
        assert_eq!(zoomed.tilt, 30.0);
    }

    #[test]
    fn small_moves_are_not_significant() {
        let a = camera(15.0);
        let mut b = a;
        b.target.latitude += 0.00005;
        b.zoom += 0.05;
        assert!(!a.differs_significantly(&b));
    }

    #[test]
    fn large_moves_are_significant() {
        let a = camera(15.0);
        let mut moved = a;
        moved.target.longitude += 0.001;
        assert!(a.differs_significantly(&moved));

        let mut zoomed = a;
        zoomed.zoom += 0.5;
        assert!(a.differs_significantly(&zoomed));
    }
}
