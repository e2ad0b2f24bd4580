use crate::game_logic::errors::{TrailError, TrailResult};
use crate::pathfinding::ElevationSampler;
use crate::terrain::constants::MIN_ELEVATION;
use validator::Validate;

/// Terrain heightmap sampled once per grid cell
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ElevationField {
    #[validate(range(min = 1, max = 4096))]
    pub width: u32,
    #[validate(range(min = 1, max = 4096))]
    pub height: u32,
    pub heights: Vec<f32>, // Flattened 2D array (row-major)
}

impl ElevationField {
    /// Create a new elevation field with validation
    pub fn new(width: u32, height: u32, heights: Vec<f32>) -> TrailResult<Self> {
        let expected_size = width as usize * height as usize;
        if heights.len() != expected_size {
            return Err(TrailError::InvalidElevationData {
                reason: format!(
                    "Heights array size {} does not match field dimensions {}x{} (expected {})",
                    heights.len(),
                    width,
                    height,
                    expected_size
                ),
            });
        }

        if let Some(bad) = heights.iter().find(|h| !h.is_finite()) {
            return Err(TrailError::InvalidElevationData {
                reason: format!("Heights must be finite, found {bad}"),
            });
        }

        let field = Self {
            width,
            height,
            heights,
        };

        field.validate().map_err(|validation_errors| {
            let error_details = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    format!("{field}: {}", error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            TrailError::InvalidElevationData {
                reason: format!("Elevation field validation failed: {error_details}"),
            }
        })?;

        Ok(field)
    }

    /// Build a field from rows given top to bottom
    pub fn from_rows(rows: &[&[f32]]) -> TrailResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map(|row| row.len() as u32).unwrap_or(0);

        if rows.iter().any(|row| row.len() as u32 != width) {
            return Err(TrailError::InvalidElevationData {
                reason: "All rows must have the same length".to_string(),
            });
        }

        let heights = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Self::new(width, height, heights)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    /// Get the height at a specific grid position
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        self.index(x, y).and_then(|i| self.heights.get(i).copied())
    }

    /// Lowest and highest height in the field
    pub fn range(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }
}

impl ElevationSampler for ElevationField {
    fn sample(&self, x: u32, y: u32) -> f32 {
        self.get(x, y).unwrap_or(MIN_ELEVATION)
    }
}
