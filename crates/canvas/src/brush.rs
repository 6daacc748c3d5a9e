use serde::{Deserialize, Serialize};

/// Grid pitch in degrees for a brush of size 1.
///
/// Rendered pixel edge and snapping grid share this constant, so adjacent
/// placements tile without gaps or overlaps.
pub const GRID_STEP_DEG: f64 = 0.0008;

pub const MIN_BRUSH: u8 = 1;
pub const MAX_BRUSH: u8 = 10;

/// Brush size in 1..=10.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BrushSize(u8);

impl BrushSize {
    pub const SMALLEST: BrushSize = BrushSize(MIN_BRUSH);

    pub fn new(size: u8) -> Option<Self> {
        (MIN_BRUSH..=MAX_BRUSH).contains(&size).then_some(BrushSize(size))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Edge length of the grid cell (and rendered square) in degrees.
    pub fn grid_size(self) -> f64 {
        self.0 as f64 * GRID_STEP_DEG
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self::SMALLEST
    }
}

impl TryFrom<u8> for BrushSize {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        BrushSize::new(value)
            .ok_or_else(|| format!("brush size must be {MIN_BRUSH}..={MAX_BRUSH}, got {value}"))
    }
}

impl From<BrushSize> for u8 {
    fn from(b: BrushSize) -> Self {
        b.0
    }
}

#[cfg(test)]
mod tests {
    use super::{BrushSize, GRID_STEP_DEG};

    #[test]
    fn range_is_one_to_ten() {
        assert!(BrushSize::new(0).is_none());
        assert!(BrushSize::new(1).is_some());
        assert!(BrushSize::new(10).is_some());
        assert!(BrushSize::new(11).is_none());
    }

    #[test]
    fn grid_scales_with_size() {
        assert_eq!(BrushSize::new(1).unwrap().grid_size(), GRID_STEP_DEG);
        let g = BrushSize::new(5).unwrap().grid_size();
        assert!((g - 0.004).abs() < 1e-15);
    }
}
