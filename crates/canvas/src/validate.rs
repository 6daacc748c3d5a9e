//! Request validation.
//!
//! Drafts hold raw JSON values so that every bad field is reported, rather
//! than failing on the first type mismatch during deserialization.

use foundation::LatLng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::brush::{BrushSize, MAX_BRUSH, MIN_BRUSH};
use crate::click::{Click, ClickMode};
use crate::color::HexColor;
use crate::pixel::NewPixel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid pixel data: {} field violation(s)", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }
}

/// Body of a create request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelDraft {
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
    #[serde(default)]
    pub color: Option<Value>,
    #[serde(default)]
    pub brush_size: Option<Value>,
    #[serde(default)]
    pub placed_by: Option<Value>,
}

impl PixelDraft {
    pub fn validate(&self) -> Result<NewPixel, ValidationError> {
        let mut v = Vec::new();
        let lat = ranged_number(&mut v, "latitude", self.latitude.as_ref(), -90.0, 90.0);
        let lng = ranged_number(&mut v, "longitude", self.longitude.as_ref(), -180.0, 180.0);
        let color = color(&mut v, self.color.as_ref());
        let brush = brush(&mut v, self.brush_size.as_ref());
        let placed_by = placed_by(&mut v, self.placed_by.as_ref());

        match (lat, lng, color, brush) {
            (Some(lat), Some(lng), Some(color), Some(brush)) if v.is_empty() => {
                let pixel = NewPixel::new(LatLng::new(lat, lng), color, brush)?;
                Ok(match placed_by {
                    Some(label) => pixel.placed_by(label),
                    None => pixel,
                })
            }
            _ => Err(ValidationError::new(v)),
        }
    }
}

/// Body of an erase request. Numbers may also arrive as numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationDraft {
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
}

impl LocationDraft {
    /// `None` when either coordinate is missing or not numeric.
    pub fn position(&self) -> Option<LatLng> {
        let lat = self.latitude.as_ref().and_then(lenient_number)?;
        let lng = self.longitude.as_ref().and_then(lenient_number)?;
        Some(LatLng::new(lat, lng))
    }
}

/// Body of a raw map click.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickDraft {
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
    #[serde(default)]
    pub brush_size: Option<Value>,
    #[serde(default)]
    pub color: Option<Value>,
    #[serde(default)]
    pub placed_by: Option<Value>,
    #[serde(default)]
    pub mode: Option<Value>,
}

impl ClickDraft {
    pub fn validate(&self) -> Result<Click, ValidationError> {
        let mut v = Vec::new();
        // Raw clicks may sit outside the world; the quantizer normalizes them.
        let lat = finite_number(&mut v, "latitude", self.latitude.as_ref());
        let lng = finite_number(&mut v, "longitude", self.longitude.as_ref());
        let brush = brush(&mut v, self.brush_size.as_ref());

        let erase = match self.mode.as_ref() {
            None | Some(Value::Null) => false,
            Some(Value::String(m)) if m == "paint" => false,
            Some(Value::String(m)) if m == "erase" => true,
            Some(_) => {
                v.push(FieldViolation::new("mode", "must be \"paint\" or \"erase\""));
                false
            }
        };

        let mode = if erase {
            Some(ClickMode::Erase)
        } else {
            let color = color(&mut v, self.color.as_ref());
            let placed_by = placed_by(&mut v, self.placed_by.as_ref());
            color.map(|color| ClickMode::Paint { color, placed_by })
        };

        match (lat, lng, brush, mode) {
            (Some(lat), Some(lng), Some(brush), Some(mode)) if v.is_empty() => Ok(Click {
                position: LatLng::new(lat, lng),
                brush,
                mode,
            }),
            _ => Err(ValidationError::new(v)),
        }
    }
}

fn number(v: &mut Vec<FieldViolation>, field: &str, raw: Option<&Value>) -> Option<f64> {
    match raw {
        None | Some(Value::Null) => {
            v.push(FieldViolation::new(field, "is required"));
            None
        }
        Some(Value::Number(n)) => match n.as_f64() {
            Some(x) => Some(x),
            None => {
                v.push(FieldViolation::new(field, "must be a number"));
                None
            }
        },
        Some(_) => {
            v.push(FieldViolation::new(field, "must be a number"));
            None
        }
    }
}

fn finite_number(v: &mut Vec<FieldViolation>, field: &str, raw: Option<&Value>) -> Option<f64> {
    let x = number(v, field, raw)?;
    if x.is_finite() {
        Some(x)
    } else {
        v.push(FieldViolation::new(field, "must be finite"));
        None
    }
}

fn ranged_number(
    v: &mut Vec<FieldViolation>,
    field: &str,
    raw: Option<&Value>,
    min: f64,
    max: f64,
) -> Option<f64> {
    let x = number(v, field, raw)?;
    if (min..=max).contains(&x) {
        Some(x)
    } else {
        v.push(FieldViolation::new(
            field,
            format!("must be between {min} and {max}"),
        ));
        None
    }
}

fn color(v: &mut Vec<FieldViolation>, raw: Option<&Value>) -> Option<HexColor> {
    match raw {
        None | Some(Value::Null) => {
            v.push(FieldViolation::new("color", "is required"));
            None
        }
        Some(Value::String(s)) => {
            let c = HexColor::parse(s);
            if c.is_none() {
                v.push(FieldViolation::new("color", "must match ^#[0-9A-Fa-f]{6}$"));
            }
            c
        }
        Some(_) => {
            v.push(FieldViolation::new("color", "must be a string"));
            None
        }
    }
}

fn brush(v: &mut Vec<FieldViolation>, raw: Option<&Value>) -> Option<BrushSize> {
    let x = number(v, "brushSize", raw)?;
    if x.fract() != 0.0 {
        v.push(FieldViolation::new("brushSize", "must be an integer"));
        return None;
    }
    let b = (x >= MIN_BRUSH as f64 && x <= MAX_BRUSH as f64)
        .then(|| BrushSize::new(x as u8))
        .flatten();
    if b.is_none() {
        v.push(FieldViolation::new(
            "brushSize",
            format!("must be between {MIN_BRUSH} and {MAX_BRUSH}"),
        ));
    }
    b
}

fn placed_by(v: &mut Vec<FieldViolation>, raw: Option<&Value>) -> Option<String> {
    match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            v.push(FieldViolation::new("placedBy", "must be a string or null"));
            None
        }
    }
}

fn lenient_number(raw: &Value) -> Option<f64> {
    let x = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    x.is_finite().then_some(x)
}
