use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// A canvas dimension in pixels constrained to [1, 8192]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct CanvasPixels(u32);

impl CanvasPixels {
    const MIN: u32 = 1;
    const MAX: u32 = 8192;

    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for CanvasPixels {
    fn default() -> Self {
        Self::new(400)
    }
}

/// Cell size in pixels constrained to [1, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct Resolution(u32);

impl Resolution {
    const MIN: u32 = 1;
    const MAX: u32 = 100;

    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(5)
    }
}

/// A noise scale factor constrained to [0.001, 10.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct NoiseScale(f32);

impl NoiseScale {
    const MIN: f32 = 0.001;
    const MAX: f32 = 10.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for NoiseScale {
    fn default() -> Self {
        Self::new(0.1)
    }
}

/// Elevation removed per agent step, constrained to [0.0, 255.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct WearAmount(f32);

impl WearAmount {
    const MIN: f32 = 0.0;
    const MAX: f32 = 255.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for WearAmount {
    fn default() -> Self {
        Self::new(10.0)
    }
}
