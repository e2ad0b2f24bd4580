//! Static obstacle placement on the navigation grid

use crate::pathfinding::{GridCoord, NavigationGrid};
use tracing::debug;

/// A static obstacle in cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstacle {
    Circle { center: GridCoord, radius: u32 },
    Rectangle { a: GridCoord, b: GridCoord },
}

impl Obstacle {
    /// Block the obstacle's cells; returns the number of cells newly blocked
    pub fn apply(&self, nav_grid: &mut NavigationGrid) -> usize {
        match *self {
            Obstacle::Circle { center, radius } => block_circular_area(nav_grid, center, radius),
            Obstacle::Rectangle { a, b } => block_rectangular_area(nav_grid, a, b),
        }
    }
}

/// Block every cell whose center lies within `radius` cells of `center`.
/// Cells outside the grid are skipped. Returns the number of cells newly blocked.
pub fn block_circular_area(nav_grid: &mut NavigationGrid, center: GridCoord, radius: u32) -> usize {
    let cell_radius = radius as i64;
    let radius_squared = cell_radius * cell_radius;
    let mut blocked = 0;

    for dy in -cell_radius..=cell_radius {
        for dx in -cell_radius..=cell_radius {
            if dx * dx + dy * dy > radius_squared {
                continue;
            }

            let x = center.x as i64 + dx;
            let y = center.y as i64 + dy;
            if x < 0 || y < 0 {
                continue;
            }

            if block_cell(nav_grid, GridCoord::new(x as u32, y as u32)) {
                blocked += 1;
            }
        }
    }

    debug!("Blocked {blocked} cells in circle around {center} (radius {radius})");
    blocked
}

/// Block the inclusive rectangle spanned by two corners, clipped to the grid
pub fn block_rectangular_area(nav_grid: &mut NavigationGrid, a: GridCoord, b: GridCoord) -> usize {
    let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
    let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
    let mut blocked = 0;

    for y in min_y..=max_y.min(nav_grid.rows().saturating_sub(1)) {
        for x in min_x..=max_x.min(nav_grid.cols().saturating_sub(1)) {
            if block_cell(nav_grid, GridCoord::new(x, y)) {
                blocked += 1;
            }
        }
    }

    debug!("Blocked {blocked} cells in rectangle {a} .. {b}");
    blocked
}

fn block_cell(nav_grid: &mut NavigationGrid, coord: GridCoord) -> bool {
    let open = nav_grid.get(coord).is_some_and(|cell| cell.is_walkable());
    open && nav_grid.set_walkable(coord, false).is_ok()
}
