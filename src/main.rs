use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tracing::{info, warn};
use trailwalker::config::range_types::*;
use trailwalker::config::{load_config, load_config_from, save_config};
use trailwalker::render::render_frame;
use trailwalker::resources::WalkerSettings;
use trailwalker::{AdvanceOutcome, TrailResult, WalkSession};

mod cli_utils;

use cli_utils::{parse_block, parse_block_rect, parse_click, parse_size};

#[derive(Parser, Clone)]
#[command(name = "trailwalker")]
#[command(about = "Walk an agent across a noise heightmap along cheapest A* paths")]
struct Args {
    /// Config file to load instead of the user config
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Canvas size in pixels (format: WIDTHxHEIGHT)
    #[arg(long)]
    size: Option<String>,

    /// Cell size in pixels
    #[arg(long)]
    resolution: Option<u32>,

    /// Terrain preset (flat, perlin, hills, ridged)
    #[arg(long)]
    preset: Option<String>,

    /// Noise scale factor applied to cell coordinates
    #[arg(long)]
    noise_scale: Option<f32>,

    /// Random seed for reproducible terrain and random clicks
    #[arg(long)]
    seed: Option<u32>,

    /// Elevation removed from each cell the agent steps on
    #[arg(long)]
    wear: Option<f32>,

    /// Pixel click (format: X,Y); may be repeated
    #[arg(long = "click")]
    clicks: Vec<String>,

    /// Blocked cell or disc of cells (format: X,Y or X,Y,RADIUS in cells); may be repeated
    #[arg(long = "block")]
    blocks: Vec<String>,

    /// Blocked rectangle of cells (format: X1,Y1,X2,Y2, corners inclusive); may be repeated
    #[arg(long = "block-rect")]
    block_rects: Vec<String>,

    /// Number of additional random clicks inside the canvas
    #[arg(long, default_value = "0")]
    random_clicks: u32,

    /// Maximum ticks to run after each click
    #[arg(long, default_value = "10000")]
    ticks: u32,

    /// Print a frame every N ticks (0 prints only when a walk ends)
    #[arg(long, default_value = "0")]
    show_every: u32,

    /// Save the effective settings to the user config
    #[arg(long)]
    save_config: bool,
}

fn apply_overrides(mut settings: WalkerSettings, args: &Args) -> TrailResult<WalkerSettings> {
    if let Some(size) = &args.size {
        let (width, height) = parse_size(size)?;
        settings.canvas_width = CanvasPixels::new(width);
        settings.canvas_height = CanvasPixels::new(height);
    }
    if let Some(resolution) = args.resolution {
        settings.resolution = Resolution::new(resolution);
    }
    if let Some(preset) = &args.preset {
        settings.terrain_preset = preset.clone();
    }
    if let Some(noise_scale) = args.noise_scale {
        settings.noise_scale = NoiseScale::new(noise_scale);
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if let Some(wear) = args.wear {
        settings.wear_amount = WearAmount::new(wear);
    }
    Ok(settings)
}

fn run_walk(session: &mut WalkSession, max_ticks: u32, show_every: u32) {
    for tick in 1..=max_ticks {
        let outcome = session.tick();

        if show_every > 0 && tick % show_every == 0 {
            println!("tick {tick}\n{}", render_frame(session));
        }

        match outcome {
            AdvanceOutcome::Idle => return,
            AdvanceOutcome::Arrived { at, elevation } => {
                info!("Arrived at {at} after {tick} ticks (elevation now {elevation:.1})");
                return;
            }
            AdvanceOutcome::Moved { .. } => {}
        }
    }
    warn!("Tick limit {max_ticks} reached before arrival");
}

fn main() -> TrailResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };
    let mut settings = apply_overrides(config.settings.clone(), &args)?;

    // Fix the seed up front so terrain and random clicks agree
    let seed = *settings.seed.get_or_insert_with(rand::random);

    if args.save_config {
        let mut updated = config;
        updated.settings = settings.clone();
        save_config(&updated)?;
        info!("Saved settings to user config");
    }

    let mut session = WalkSession::from_settings(&settings)?;

    let obstacles = args
        .blocks
        .iter()
        .map(|b| parse_block(b))
        .chain(args.block_rects.iter().map(|r| parse_block_rect(r)))
        .collect::<TrailResult<Vec<_>>>()?;
    for obstacle in obstacles {
        session.place_obstacle(obstacle);
    }

    let mut clicks = args
        .clicks
        .iter()
        .map(|c| parse_click(c))
        .collect::<TrailResult<Vec<_>>>()?;

    let mut rng = Pcg64::seed_from_u64(u64::from(seed));
    let width = i64::from(settings.canvas_width.get());
    let height = i64::from(settings.canvas_height.get());
    clicks.extend((0..args.random_clicks).map(|_| (rng.gen_range(0..width), rng.gen_range(0..height))));

    if clicks.is_empty() {
        println!("{}", render_frame(&session));
        return Ok(());
    }

    for (px, py) in clicks {
        match session.handle_click(px, py) {
            None => {
                warn!("Click ({px}, {py}) is outside the canvas, ignoring");
                continue;
            }
            Some(path) if path.is_empty() => {
                warn!("No path to click ({px}, {py})");
                continue;
            }
            Some(_) => {}
        }
        run_walk(&mut session, args.ticks, args.show_every);
        println!("after click ({px}, {py})\n{}", render_frame(&session));
    }

    Ok(())
}
