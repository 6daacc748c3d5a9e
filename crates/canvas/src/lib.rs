//! Shared world pixel canvas.
//!
//! Clicks on a world map are snapped onto a brush-sized lat/lng grid
//! ([`quantize`]) and stored as coloured square pixels ([`store`]). At most one
//! pixel lives at any 6-decimal location; placing another one there replaces
//! it.

pub mod brush;
pub mod click;
pub mod color;
pub mod location;
pub mod pixel;
pub mod quantize;
pub mod seed;
pub mod stats;
pub mod store;
pub mod validate;

pub use brush::{BrushSize, GRID_STEP_DEG};
pub use click::{Click, ClickMode, ClickOutcome, apply_click};
pub use color::{HexColor, PALETTE};
pub use location::LocationKey;
pub use pixel::{NewPixel, Pixel, PixelId};
pub use quantize::snap;
pub use seed::{SAMPLE_PIXELS, SEED_LABEL};
pub use stats::{CanvasStats, STATS_RECENT_LIMIT, estimate_contributors};
pub use store::{DEFAULT_RECENT_LIMIT, PROXIMITY_RADIUS_DEG, PixelStore};
pub use validate::{ClickDraft, FieldViolation, LocationDraft, PixelDraft, ValidationError};
