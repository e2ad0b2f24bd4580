use crate::game_logic::errors::TrailResult;
use crate::map::ElevationField;
use crate::terrain::constants::{
    DEFAULT_NOISE_FALLOFF, DEFAULT_NOISE_OCTAVES, MAX_ELEVATION, MIN_ELEVATION,
};
use noise::{MultiFractal, NoiseFn, Perlin, RidgedMulti};

/// Terrain generation algorithms
#[derive(Debug, Clone)]
pub enum TerrainAlgorithm {
    Flat {
        height: f32,
    },
    Perlin {
        noise_scale: f32,
        octaves: u32,
        falloff: f64,
    },
    Ridged {
        noise_scale: f32,
        octaves: u32,
    },
}

/// Main terrain generator struct
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    pub seed: u32,
    pub algorithm: TerrainAlgorithm,
}

/// Map a noise value in [-1, 1] onto the elevation range
fn to_elevation(noise_value: f64) -> f32 {
    let normalized = (noise_value + 1.0) / 2.0;
    let elevation = MIN_ELEVATION as f64 + normalized * (MAX_ELEVATION - MIN_ELEVATION) as f64;
    (elevation as f32).clamp(MIN_ELEVATION, MAX_ELEVATION)
}

impl TerrainGenerator {
    /// Create a new terrain generator
    pub fn new(seed: u32, algorithm: TerrainAlgorithm) -> Self {
        Self { seed, algorithm }
    }

    /// Generate an elevation field using the configured algorithm
    pub fn generate(&self, width: u32, height: u32) -> TrailResult<ElevationField> {
        let total_points = width as usize * height as usize;
        let mut heights = Vec::with_capacity(total_points);

        match &self.algorithm {
            TerrainAlgorithm::Flat { height } => {
                heights.resize(total_points, height.clamp(MIN_ELEVATION, MAX_ELEVATION));
            }
            TerrainAlgorithm::Perlin {
                noise_scale,
                octaves,
                falloff,
            } => {
                let perlin = Perlin::new(self.seed);
                let scale = *noise_scale as f64;

                // Normalize so the octave sum stays inside [-1, 1]
                let total_amplitude: f64 = (0..*octaves).map(|i| falloff.powi(i as i32)).sum();
                let total_amplitude = if total_amplitude > 0.0 {
                    total_amplitude
                } else {
                    1.0
                };

                for y in 0..height {
                    let sample_y = y as f64 * scale;
                    for x in 0..width {
                        let sample_x = x as f64 * scale;

                        let mut noise_value = 0.0;
                        let mut current_amplitude = 1.0;
                        let mut current_frequency = 1.0;

                        for _ in 0..*octaves {
                            noise_value += perlin
                                .get([sample_x * current_frequency, sample_y * current_frequency])
                                * current_amplitude;
                            current_amplitude *= falloff;
                            current_frequency *= 2.0; // Lacunarity
                        }

                        heights.push(to_elevation(noise_value / total_amplitude));
                    }
                }
            }
            TerrainAlgorithm::Ridged {
                noise_scale,
                octaves,
            } => {
                let ridged = RidgedMulti::<Perlin>::new(self.seed)
                    .set_octaves((*octaves).max(1) as usize)
                    .set_frequency(*noise_scale as f64);

                for y in 0..height {
                    for x in 0..width {
                        heights.push(to_elevation(ridged.get([x as f64, y as f64])));
                    }
                }
            }
        }

        ElevationField::new(width, height, heights)
    }
}

/// Names accepted by [`get_terrain_preset`]
pub const TERRAIN_PRESETS: [&str; 4] = ["flat", "perlin", "hills", "ridged"];

/// Get a predefined terrain preset
pub fn get_terrain_preset(
    name: &str,
    seed: Option<u32>,
    noise_scale: f32,
) -> Option<TerrainGenerator> {
    let seed = seed.unwrap_or_else(rand::random);

    match name {
        "flat" => Some(TerrainGenerator::new(
            seed,
            TerrainAlgorithm::Flat { height: 0.0 },
        )),
        "perlin" => Some(TerrainGenerator::new(
            seed,
            TerrainAlgorithm::Perlin {
                noise_scale,
                octaves: DEFAULT_NOISE_OCTAVES,
                falloff: DEFAULT_NOISE_FALLOFF,
            },
        )),
        "hills" => Some(TerrainGenerator::new(
            seed,
            TerrainAlgorithm::Perlin {
                noise_scale: noise_scale * 0.5,
                octaves: 2,
                falloff: DEFAULT_NOISE_FALLOFF,
            },
        )),
        "ridged" => Some(TerrainGenerator::new(
            seed,
            TerrainAlgorithm::Ridged {
                noise_scale,
                octaves: 5,
            },
        )),
        _ => None,
    }
}
