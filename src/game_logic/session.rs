//! The walk session: the single owned context holding the grid and the agent.
//!
//! Frame order is click handling (at most one search), then one agent step,
//! then rendering by the caller. Only [`Agent::advance`] writes elevation.

use crate::game_logic::agent::{AdvanceOutcome, Agent};
use crate::game_logic::errors::{TrailError, TrailResult};
use crate::pathfinding::{GridCoord, NavigationGrid, Obstacle, Path, find_path};
use crate::resources::WalkerSettings;
use crate::terrain::CanvasLayout;
use crate::terrain_generation::get_terrain_preset;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct WalkSession {
    layout: CanvasLayout,
    grid: NavigationGrid,
    agent: Agent,
}

impl WalkSession {
    /// Generate terrain from settings and place the agent at the top-left cell
    pub fn from_settings(settings: &WalkerSettings) -> TrailResult<Self> {
        let layout = CanvasLayout::new(
            settings.canvas_width.get(),
            settings.canvas_height.get(),
            settings.resolution.get(),
        )?;
        let (cols, rows) = layout.dimensions();

        let generator = get_terrain_preset(
            &settings.terrain_preset,
            settings.seed,
            settings.noise_scale.get(),
        )
        .ok_or_else(|| TrailError::InvalidArgument {
            reason: format!("Unknown terrain preset '{}'", settings.terrain_preset),
        })?;

        info!(
            "Generating {cols}x{rows} '{}' terrain with seed {}",
            settings.terrain_preset, generator.seed
        );
        let field = generator.generate(cols, rows)?;
        let (lowest, highest) = field.range();
        debug!("Elevation range {lowest:.1} .. {highest:.1}");
        let grid = NavigationGrid::from_field(&field)?;

        Ok(Self::new(layout, grid, settings.wear_amount.get()))
    }

    /// Wrap an existing grid; the layout must describe the same dimensions
    pub fn new(layout: CanvasLayout, grid: NavigationGrid, wear_amount: f32) -> Self {
        debug_assert_eq!(layout.dimensions(), (grid.cols(), grid.rows()));
        Self {
            layout,
            grid,
            agent: Agent::new(GridCoord::new(0, 0), wear_amount),
        }
    }

    pub fn layout(&self) -> &CanvasLayout {
        &self.layout
    }

    pub fn grid(&self) -> &NavigationGrid {
        &self.grid
    }

    /// Mutable grid access for setup before the walk starts
    pub fn grid_mut(&mut self) -> &mut NavigationGrid {
        &mut self.grid
    }

    /// Block an obstacle's cells for all later searches; returns the number newly blocked
    pub fn place_obstacle(&mut self, obstacle: Obstacle) -> usize {
        let blocked = obstacle.apply(self.grid_mut());
        info!(
            "Placed {obstacle:?}: {blocked} cells newly blocked, {} total",
            self.grid.blocked_count()
        );
        blocked
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn active_path(&self) -> &Path {
        self.agent.active_path()
    }

    /// Handle a pointer press at pixel coordinates. Clicks off the grid are ignored.
    pub fn handle_click(&mut self, px: i64, py: i64) -> Option<&Path> {
        let Some(target) = self.layout.pixel_to_cell(px, py) else {
            debug!("Ignoring click at ({px}, {py}): outside the grid");
            return None;
        };
        self.request_path(target)
    }

    /// Plan from the agent's cell to `target` and install the result.
    /// Returns None without searching when `target` is out of bounds.
    pub fn request_path(&mut self, target: GridCoord) -> Option<&Path> {
        let goal = self.grid.id_of(target)?;
        let start = self.grid.id_of(self.agent.position())?;

        let path = find_path(&self.grid, start, goal);
        if !path.is_empty() {
            info!(
                "Planned path with {} steps from {} to {} (cost {:.1})",
                path.len(),
                self.agent.position(),
                target,
                path.total_cost()
            );
        }
        self.agent.install_path(path);
        Some(self.agent.active_path())
    }

    /// Advance the agent by one animation step
    pub fn tick(&mut self) -> AdvanceOutcome {
        self.agent.advance(&mut self.grid)
    }
}
