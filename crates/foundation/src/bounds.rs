use crate::math::LatLng;

/// Geographic bounding box in degrees.
///
/// `west <= east` is expected; a box with `west > east` would cross the
/// antimeridian and is not supported by [`GeoBounds::contains`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        GeoBounds {
            north,
            south,
            east,
            west,
        }
    }

    pub fn world() -> Self {
        Self::new(90.0, -90.0, 180.0, -180.0)
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// Inclusive containment on all four edges. Always false for boxes that
    /// cross the antimeridian.
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lng >= self.west && p.lng <= self.east
    }

    /// Tight box around `points`, or the whole world when there are none.
    pub fn enclosing<I>(points: I) -> Self
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut it = points.into_iter();
        let Some(first) = it.next() else {
            return Self::world();
        };
        let mut b = Self::new(first.lat, first.lat, first.lng, first.lng);
        for p in it {
            b.north = b.north.max(p.lat);
            b.south = b.south.min(p.lat);
            b.east = b.east.max(p.lng);
            b.west = b.west.min(p.lng);
        }
        b
    }
}
