use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrailError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    #[error("Config file not found at path: {path}")]
    ConfigFileNotFound { path: PathBuf },

    // Terrain / grid errors
    #[error("Invalid elevation data: {reason}")]
    InvalidElevationData { reason: String },

    #[error("Invalid grid dimensions {cols}x{rows}")]
    InvalidGridDimensions { cols: u32, rows: u32 },

    #[error("Cell ({x}, {y}) is outside the {cols}x{rows} grid")]
    OutOfBounds { x: u32, y: u32, cols: u32, rows: u32 },

    // CLI errors
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

/// Result type alias for all operations
pub type TrailResult<T> = Result<T, TrailError>;
