use std::fmt;
use std::str::FromStr;

use foundation::{LatLng, from_micro, to_micro};

/// Dedup key for a stored pixel: both coordinates rounded to six decimals.
///
/// Held as integer micro-degrees so equality is exact. The string form is
/// `"{lat:.6},{lng:.6}"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationKey {
    lat_micro: i64,
    lng_micro: i64,
}

impl LocationKey {
    pub fn new(lat: f64, lng: f64) -> Self {
        LocationKey {
            lat_micro: to_micro(lat),
            lng_micro: to_micro(lng),
        }
    }

    pub fn of(p: LatLng) -> Self {
        Self::new(p.lat, p.lng)
    }

    pub fn to_lat_lng(self) -> LatLng {
        LatLng::new(from_micro(self.lat_micro), from_micro(self.lng_micro))
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.to_lat_lng();
        write!(f, "{:.6},{:.6}", p.lat, p.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed location key: {0}")]
pub struct ParseLocationKeyError(String);

impl FromStr for LocationKey {
    type Err = ParseLocationKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLocationKeyError(s.to_string());
        let (lat, lng) = s.split_once(',').ok_or_else(err)?;
        let lat: f64 = lat.trim().parse().map_err(|_| err())?;
        let lng: f64 = lng.trim().parse().map_err(|_| err())?;
        if !lat.is_finite() || !lng.is_finite() {
            return Err(err());
        }
        Ok(LocationKey::new(lat, lng))
    }
}

#[cfg(test)]
mod tests {
    use super::LocationKey;

    #[test]
    fn sub_micro_differences_collapse() {
        assert_eq!(
            LocationKey::new(40.000000, -74.000000),
            LocationKey::new(40.0000001, -74.0000001)
        );
        assert_ne!(
            LocationKey::new(40.000000, -74.000000),
            LocationKey::new(40.000002, -74.000000)
        );
    }

    #[test]
    fn display_is_fixed_six() {
        assert_eq!(LocationKey::new(40.7128, -74.006).to_string(), "40.712800,-74.006000");
        assert_eq!(LocationKey::new(-0.0000001, 0.0).to_string(), "0.000000,0.000000");
    }

    #[test]
    fn parses_display_form() {
        let k: LocationKey = "51.507400,-0.127800".parse().unwrap();
        assert_eq!(k, LocationKey::new(51.5074, -0.1278));
        assert!("51.5".parse::<LocationKey>().is_err());
        assert!("a,b".parse::<LocationKey>().is_err());
        assert!("NaN,0".parse::<LocationKey>().is_err());
    }
}
