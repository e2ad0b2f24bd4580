//! Text rendering of a walk session for the terminal demo

use crate::game_logic::WalkSession;
use crate::pathfinding::GridCoord;
use crate::terrain::constants::{MAX_ELEVATION, MIN_ELEVATION};
use std::collections::HashSet;

/// Shading ramp from lowest to highest elevation
const SHADES: &[u8] = b" .:-=+*#%";
pub const PATH_CHAR: char = 'o';
pub const AGENT_CHAR: char = 'A';
pub const BLOCKED_CHAR: char = 'X';

/// Map an elevation onto the shading ramp
pub fn shade(elevation: f32) -> char {
    let t = ((elevation - MIN_ELEVATION) / (MAX_ELEVATION - MIN_ELEVATION)).clamp(0.0, 1.0);
    let index = (t * (SHADES.len() - 1) as f32).round() as usize;
    SHADES[index] as char
}

/// Draw the heightmap with the remaining path and the agent on top, one line per row
pub fn render_frame(session: &WalkSession) -> String {
    let grid = session.grid();
    let field = grid.elevation_field();
    let agent = session.agent().position();
    let remaining: HashSet<GridCoord> = match session.agent().path_index() {
        Some(index) => session
            .active_path()
            .coords()
            .skip(index)
            .collect(),
        None => HashSet::new(),
    };

    let mut out = String::with_capacity((grid.cols() as usize + 1) * grid.rows() as usize);
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let coord = GridCoord::new(x, y);
            let ch = if coord == agent {
                AGENT_CHAR
            } else if remaining.contains(&coord) {
                PATH_CHAR
            } else {
                match field.get(x, y) {
                    Some(_) if grid.get(coord).is_some_and(|cell| !cell.is_walkable()) => BLOCKED_CHAR,
                    Some(elevation) => shade(elevation),
                    None => ' ',
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::NavigationGrid;
    use crate::terrain::CanvasLayout;

    #[test]
    fn test_shade_endpoints() {
        assert_eq!(shade(0.0), ' ');
        assert_eq!(shade(255.0), '%');
        assert_eq!(shade(-10.0), ' ');
        assert_eq!(shade(1000.0), '%');
    }

    #[test]
    fn test_render_shows_agent_and_path() {
        let layout = CanvasLayout::new(15, 10, 5).unwrap();
        let grid = NavigationGrid::build(3, 2, &|_: u32, _: u32| 255.0_f32).unwrap();
        let mut session = WalkSession::new(layout, grid, 0.0);
        session.grid_mut().set_walkable(GridCoord::new(0, 1), false).unwrap();
        session.request_path(GridCoord::new(2, 0));

        assert_eq!(render_frame(&session), "Aoo\nX%%\n");

        session.tick();
        session.tick();
        assert_eq!(render_frame(&session), "%Ao\nX%%\n");
    }

    #[test]
    fn test_render_shades_worn_cells() {
        let layout = CanvasLayout::new(10, 5, 5).unwrap();
        let grid = NavigationGrid::build(2, 1, &|_: u32, _: u32| 255.0_f32).unwrap();
        let mut session = WalkSession::new(layout, grid, 255.0);
        session.request_path(GridCoord::new(1, 0));

        // Stepping on the start cell wears it flat
        session.tick();
        session.tick();
        assert_eq!(render_frame(&session), " A\n");
    }
}
