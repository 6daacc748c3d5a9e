//! Coordinate quantizer.
//!
//! Maps a raw click onto the brush grid so repeated clicks on the same spot
//! resolve to the same cell.

use foundation::{LatLng, MAX_LAT, MAX_LNG};

use crate::brush::BrushSize;

/// Snap a raw coordinate onto the grid of `brush`.
///
/// Longitude wraps and latitude clamps before snapping. The result is clamped
/// again because rounding to the nearest cell can step past ±180 (e.g. brush 7
/// at longitude 180). Inputs must be finite.
pub fn snap(raw: LatLng, brush: BrushSize) -> LatLng {
    let n = raw.normalized();
    let grid = brush.grid_size();
    LatLng::new(
        snap_axis(n.lat, grid).clamp(-MAX_LAT, MAX_LAT),
        snap_axis(n.lng, grid).clamp(-MAX_LNG, MAX_LNG),
    )
}

fn snap_axis(v: f64, grid: f64) -> f64 {
    (v / grid).round() * grid
}

#[cfg(test)]
mod tests {
    use foundation::LatLng;

    use super::snap;
    use crate::brush::BrushSize;

    fn brush(n: u8) -> BrushSize {
        BrushSize::new(n).unwrap()
    }

    #[test]
    fn snapping_is_idempotent() {
        let raws = [
            LatLng::new(40.7128, -74.0060),
            LatLng::new(-33.8688, 151.2093),
            LatLng::new(89.9999, 179.9999),
            LatLng::new(0.00041, -0.00039),
        ];
        for size in 1..=10 {
            for raw in raws {
                let once = snap(raw, brush(size));
                let twice = snap(once, brush(size));
                assert_eq!(once, twice, "brush {size} raw {raw:?}");
            }
        }
    }

    #[test]
    fn nearby_clicks_share_a_cell() {
        let a = snap(LatLng::new(40.7130, -74.0060), brush(2));
        let b = snap(LatLng::new(40.7131, -74.0061), brush(2));
        assert_eq!(a, b);
    }

    #[test]
    fn longitude_wraps_before_snapping() {
        let s = snap(LatLng::new(0.0, 190.0), brush(1));
        assert!((s.lng - -170.0).abs() < 1e-9);
        let s = snap(LatLng::new(0.0, -200.0), brush(1));
        assert!((s.lng - 160.0).abs() < 1e-9);
    }

    #[test]
    fn latitude_clamps_before_snapping() {
        let s = snap(LatLng::new(95.0, 0.0), brush(1));
        assert!((s.lat - 90.0).abs() < 1e-9);
        let s = snap(LatLng::new(-91.0, 0.0), brush(1));
        assert!((s.lat - -90.0).abs() < 1e-9);
    }

    #[test]
    fn output_stays_in_bounds() {
        // 180 / 0.0056 rounds up to a cell past the antimeridian.
        let s = snap(LatLng::new(90.0, 180.0), brush(7));
        assert!(s.is_valid());
        assert_eq!(s.lng, 180.0);
        let s = snap(LatLng::new(-90.0, -180.0), brush(7));
        assert!(s.is_valid());
    }
}
