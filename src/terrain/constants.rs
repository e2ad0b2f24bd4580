/// Constants for the terrain and navigation system
/// Default canvas dimensions in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 400;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 400;

/// Default cell size in pixels
pub const DEFAULT_RESOLUTION: u32 = 5;

/// Default noise scale factor applied to grid coordinates before sampling
pub const DEFAULT_NOISE_SCALE: f32 = 0.1;

/// Elevation range produced by the terrain generator
pub const MIN_ELEVATION: f32 = 0.0;
pub const MAX_ELEVATION: f32 = 255.0;

/// Elevation removed from a cell each time the agent steps onto it
pub const DEFAULT_WEAR_AMOUNT: f32 = 10.0;

/// Fractal noise defaults (4 octaves, each at half the previous amplitude)
pub const DEFAULT_NOISE_OCTAVES: u32 = 4;
pub const DEFAULT_NOISE_FALLOFF: f64 = 0.5;

/// Pathfinding constants
pub const ORTHOGONAL_STEP_COST: f32 = 1.0;
