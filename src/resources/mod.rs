use crate::config::range_types::*;
use crate::terrain::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_NOISE_SCALE, DEFAULT_RESOLUTION,
    DEFAULT_WEAR_AMOUNT,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct WalkerConfig {
    pub settings: WalkerSettings,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WalkerSettings {
    // Canvas settings
    pub canvas_width: CanvasPixels,
    pub canvas_height: CanvasPixels,
    pub resolution: Resolution,

    // Terrain settings
    pub terrain_preset: String, // "flat", "perlin", "hills" or "ridged"
    pub noise_scale: NoiseScale,
    pub seed: Option<u32>,

    // Agent settings
    pub wear_amount: WearAmount,
}

impl Default for WalkerSettings {
    fn default() -> Self {
        Self {
            canvas_width: CanvasPixels::new(DEFAULT_CANVAS_WIDTH),
            canvas_height: CanvasPixels::new(DEFAULT_CANVAS_HEIGHT),
            resolution: Resolution::new(DEFAULT_RESOLUTION),

            terrain_preset: "perlin".to_string(),
            noise_scale: NoiseScale::new(DEFAULT_NOISE_SCALE),
            seed: None,

            wear_amount: WearAmount::new(DEFAULT_WEAR_AMOUNT),
        }
    }
}

impl WalkerSettings {
    /// Re-apply range limits; deserialization goes through the raw newtype values
    pub fn clamped(self) -> Self {
        Self {
            canvas_width: CanvasPixels::new(self.canvas_width.get()),
            canvas_height: CanvasPixels::new(self.canvas_height.get()),
            resolution: Resolution::new(self.resolution.get()),
            noise_scale: NoiseScale::new(self.noise_scale.get()),
            wear_amount: WearAmount::new(self.wear_amount.get()),
            ..self
        }
    }
}
