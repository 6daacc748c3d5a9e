use foundation::LatLng;
use tracing::info;

use crate::brush::BrushSize;
use crate::color::HexColor;
use crate::pixel::NewPixel;
use crate::store::PixelStore;

pub const SEED_LABEL: &str = "Anonymous";

/// (city, lat, lng, colour, brush)
pub const SAMPLE_PIXELS: [(&str, f64, f64, &str, u8); 8] = [
    ("New York", 40.7128, -74.0060, "#ff0000", 2),
    ("London", 51.5074, -0.1278, "#00ff00", 1),
    ("Tokyo", 35.6762, 139.6503, "#0000ff", 3),
    ("Sydney", -33.8688, 151.2093, "#ffff00", 1),
    ("Paris", 48.8566, 2.3522, "#ff00ff", 2),
    ("San Francisco", 37.7749, -122.4194, "#00ffff", 1),
    ("Moscow", 55.7558, 37.6173, "#ffa500", 2),
    ("Rio de Janeiro", -22.9068, -43.1729, "#800080", 1),
];

pub fn sample_pixels() -> impl Iterator<Item = NewPixel> {
    SAMPLE_PIXELS
        .iter()
        .filter_map(|&(_, lat, lng, color, brush)| {
            let color = HexColor::parse(color)?;
            let brush = BrushSize::new(brush)?;
            NewPixel::new(LatLng::new(lat, lng), color, brush).ok()
        })
        .map(|p| p.placed_by(SEED_LABEL))
}

impl PixelStore {
    /// Store pre-filled with one pixel in each sample city.
    pub fn seeded() -> Self {
        let store = Self::new();
        for p in sample_pixels() {
            store.create_pixel(p);
        }
        info!(count = store.pixel_count(), "seeded sample pixels");
        store
    }
}
