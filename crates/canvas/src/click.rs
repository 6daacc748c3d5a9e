//! Map click handling: snap, then paint or erase.

use foundation::LatLng;
use tracing::debug;

use crate::brush::BrushSize;
use crate::color::HexColor;
use crate::pixel::{NewPixel, Pixel};
use crate::quantize::snap;
use crate::store::PixelStore;
use crate::validate::ValidationError;

#[derive(Debug, Clone, PartialEq)]
pub enum ClickMode {
    Paint {
        color: HexColor,
        placed_by: Option<String>,
    },
    Erase,
}

/// Raw click as reported by the map, before snapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Click {
    pub position: LatLng,
    pub brush: BrushSize,
    pub mode: ClickMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Placed(Pixel),
    Erased(Pixel),
    NothingToErase,
}

pub fn apply_click(store: &PixelStore, click: Click) -> Result<ClickOutcome, ValidationError> {
    let snapped = snap(click.position, click.brush);
    debug!(
        raw_lat = click.position.lat,
        raw_lng = click.position.lng,
        lat = snapped.lat,
        lng = snapped.lng,
        "snapped click"
    );

    match click.mode {
        ClickMode::Paint { color, placed_by } => {
            let new = NewPixel::new(snapped, color, click.brush)?;
            let new = match placed_by {
                Some(label) => new.placed_by(label),
                None => new,
            };
            Ok(ClickOutcome::Placed(store.create_pixel(new)))
        }
        ClickMode::Erase => {
            // Exact keys first (grid cell, then the raw point for pixels
            // placed off-grid), then the pixel nearest the raw point.
            let raw = click.position.normalized();
            Ok(match store.erase_near(&[snapped, raw], raw) {
                Some(p) => ClickOutcome::Erased(p),
                None => ClickOutcome::NothingToErase,
            })
        }
    }
}
