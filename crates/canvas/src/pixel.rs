use foundation::{LatLng, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brush::BrushSize;
use crate::color::HexColor;
use crate::validate::{FieldViolation, ValidationError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixelId(Uuid);

impl PixelId {
    pub fn new() -> Self {
        PixelId(Uuid::new_v4())
    }
}

impl Default for PixelId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PixelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A placed pixel. Immutable once stored; recolouring replaces it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pixel {
    pub id: PixelId,
    pub latitude: f64,
    pub longitude: f64,
    pub color: HexColor,
    pub placed_by: Option<String>,
    #[serde(with = "timestamp_ms")]
    pub placed_at: Timestamp,
    pub brush_size: BrushSize,
}

impl Pixel {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// Validated placement request. Only constructible with in-range values.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPixel {
    position: LatLng,
    color: HexColor,
    brush_size: BrushSize,
    placed_by: Option<String>,
}

impl NewPixel {
    pub fn new(
        position: LatLng,
        color: HexColor,
        brush_size: BrushSize,
    ) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();
        if !(-90.0..=90.0).contains(&position.lat) {
            violations.push(FieldViolation::new("latitude", "must be between -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&position.lng) {
            violations.push(FieldViolation::new("longitude", "must be between -180 and 180"));
        }
        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }
        Ok(NewPixel {
            position,
            color,
            brush_size,
            placed_by: None,
        })
    }

    /// Empty labels are stored as absent.
    pub fn placed_by(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.placed_by = (!label.is_empty()).then_some(label);
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn color(&self) -> &HexColor {
        &self.color
    }

    pub fn brush_size(&self) -> BrushSize {
        self.brush_size
    }

    pub(crate) fn into_pixel(self, id: PixelId, placed_at: Timestamp) -> Pixel {
        Pixel {
            id,
            latitude: self.position.lat,
            longitude: self.position.lng,
            color: self.color,
            placed_by: self.placed_by,
            placed_at,
            brush_size: self.brush_size,
        }
    }
}

/// `Timestamp` on the wire as integer milliseconds since the epoch.
mod timestamp_ms {
    use foundation::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Timestamp, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(ts.as_millis())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Timestamp, D::Error> {
        u64::deserialize(d).map(Timestamp)
    }
}
