pub mod config;
pub mod game_logic;
pub mod map;
pub mod pathfinding;
pub mod render;
pub mod resources;
pub mod terrain;
pub mod terrain_generation;

// Selective re-exports for external consumers

// Game logic - the session is the entry point for a presentation layer
pub use game_logic::errors::{TrailError, TrailResult};
pub use game_logic::{AdvanceOutcome, Agent, AgentState, WalkSession};

// Pathfinding core
pub use pathfinding::{
    CellId, GridCoord, NavigationGrid, Obstacle, Path, find_path, find_path_between,
};

// Terrain
pub use map::ElevationField;
pub use terrain::CanvasLayout;
pub use terrain_generation::{TerrainAlgorithm, TerrainGenerator, get_terrain_preset};
