/// Mean Earth radius (kilometres) for spherical distance estimates.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const MAX_LAT: f64 = 90.0;
pub const MAX_LNG: f64 = 180.0;

/// Geographic coordinate in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        is_valid_coordinate(self.lat, self.lng)
    }

    /// Longitude wrapped into [-180, 180], latitude clamped into [-90, 90].
    pub fn normalized(self) -> Self {
        Self::new(clamp_latitude(self.lat), normalize_longitude(self.lng))
    }
}

/// Wrap a longitude into [-180, 180] by whole turns.
///
/// Equivalent to repeatedly adding or subtracting 360 until in range, so
/// exactly ±180 is left untouched. Non-finite input is returned as-is.
pub fn normalize_longitude(lng: f64) -> f64 {
    if !lng.is_finite() {
        return lng;
    }
    if lng > MAX_LNG {
        lng - 360.0 * ((lng - MAX_LNG) / 360.0).ceil()
    } else if lng < -MAX_LNG {
        lng + 360.0 * ((-MAX_LNG - lng) / 360.0).ceil()
    } else {
        lng
    }
}

/// Latitude does not wrap; it saturates at the poles.
pub fn clamp_latitude(lat: f64) -> f64 {
    lat.clamp(-MAX_LAT, MAX_LAT)
}

pub fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    (-MAX_LAT..=MAX_LAT).contains(&lat) && (-MAX_LNG..=MAX_LNG).contains(&lng)
}

/// Great-circle distance on a spherical Earth.
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
