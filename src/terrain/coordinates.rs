use crate::game_logic::errors::{TrailError, TrailResult};
use crate::pathfinding::GridCoord;
use crate::terrain::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_RESOLUTION};
use tracing::debug;

/// Pixel canvas divided into square cells of `resolution` pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLayout {
    pub width_px: u32,
    pub height_px: u32,
    pub resolution: u32,
}

impl Default for CanvasLayout {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_CANVAS_WIDTH,
            height_px: DEFAULT_CANVAS_HEIGHT,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl CanvasLayout {
    /// Create a layout, rejecting a zero resolution or a canvas smaller than one cell
    pub fn new(width_px: u32, height_px: u32, resolution: u32) -> TrailResult<Self> {
        if resolution == 0 {
            return Err(TrailError::InvalidArgument {
                reason: "Resolution must be greater than 0".to_string(),
            });
        }

        let layout = Self {
            width_px,
            height_px,
            resolution,
        };

        let (cols, rows) = layout.dimensions();
        if cols == 0 || rows == 0 {
            return Err(TrailError::InvalidGridDimensions { cols, rows });
        }

        Ok(layout)
    }

    /// Grid dimensions as (cols, rows); partial cells at the edge are dropped
    pub fn dimensions(&self) -> (u32, u32) {
        (
            self.width_px / self.resolution,
            self.height_px / self.resolution,
        )
    }

    /// Convert a pixel position to the cell under it, or None if it lies off the grid
    pub fn pixel_to_cell(&self, px: i64, py: i64) -> Option<GridCoord> {
        if px < 0 || py < 0 {
            return None;
        }

        let resolution = i64::from(self.resolution);
        let (cols, rows) = self.dimensions();
        let x = px / resolution;
        let y = py / resolution;

        debug!("Pixel ({px}, {py}) -> cell ({x}, {y})");

        if x < i64::from(cols) && y < i64::from(rows) {
            Some(GridCoord::new(x as u32, y as u32))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_dimensions() {
        let layout = CanvasLayout::default();
        assert_eq!(layout.dimensions(), (80, 80));
    }

    #[test]
    fn test_pixel_to_cell_uses_integer_division() {
        let layout = CanvasLayout::default();
        assert_eq!(layout.pixel_to_cell(0, 0), Some(GridCoord::new(0, 0)));
        assert_eq!(layout.pixel_to_cell(4, 4), Some(GridCoord::new(0, 0)));
        assert_eq!(layout.pixel_to_cell(5, 9), Some(GridCoord::new(1, 1)));
        assert_eq!(layout.pixel_to_cell(399, 399), Some(GridCoord::new(79, 79)));
    }

    #[test]
    fn test_pixel_to_cell_rejects_out_of_range() {
        let layout = CanvasLayout::default();
        assert_eq!(layout.pixel_to_cell(-1, 10), None);
        assert_eq!(layout.pixel_to_cell(10, -3), None);
        assert_eq!(layout.pixel_to_cell(400, 10), None);
        assert_eq!(layout.pixel_to_cell(10, 400), None);
    }

    #[test]
    fn test_layout_validation() {
        assert!(CanvasLayout::new(400, 400, 0).is_err());
        assert!(CanvasLayout::new(3, 400, 5).is_err());

        let layout = CanvasLayout::new(23, 12, 5).expect("23x12 at resolution 5 is valid");
        assert_eq!(layout.dimensions(), (4, 2));
    }
}
