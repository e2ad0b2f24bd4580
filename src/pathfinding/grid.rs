//! Navigation grid: an arena of cells with precomputed 4-neighborhoods

use crate::game_logic::errors::{TrailError, TrailResult};
use crate::map::ElevationField;
use crate::terrain::constants::MIN_ELEVATION;
use std::fmt;
use tracing::info;

/// Integer cell coordinates; x grows right, y grows down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub x: u32,
    pub y: u32,
}

impl GridCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another cell (heuristic for A*)
    pub fn manhattan_distance(&self, other: &GridCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True when the two cells share an edge
    pub fn is_adjacent(&self, other: &GridCoord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u32, u32)> for GridCoord {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

/// Index of a cell inside its grid's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub usize);

impl CellId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Source of initial elevation values, called once per cell during grid construction
pub trait ElevationSampler {
    fn sample(&self, x: u32, y: u32) -> f32;
}

impl<F> ElevationSampler for F
where
    F: Fn(u32, u32) -> f32,
{
    fn sample(&self, x: u32, y: u32) -> f32 {
        self(x, y)
    }
}

/// A single node in the navigation grid
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    coord: GridCoord,
    elevation: f32,
    walkable: bool,
    /// Right, left, down, up; only in-bounds cells are present
    neighbors: Vec<CellId>,
}

impl Cell {
    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }
}

/// Fixed-size grid owning every cell; neighbor links are arena indices
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationGrid {
    cols: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl NavigationGrid {
    /// Allocate `cols * rows` cells, sample their elevation, then link neighbors
    pub fn build(cols: u32, rows: u32, sampler: &impl ElevationSampler) -> TrailResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(TrailError::InvalidGridDimensions { cols, rows });
        }

        let total_cells = cols as usize * rows as usize;
        let mut cells = Vec::with_capacity(total_cells);

        for y in 0..rows {
            for x in 0..cols {
                cells.push(Cell {
                    coord: GridCoord::new(x, y),
                    elevation: sampler.sample(x, y).max(MIN_ELEVATION),
                    walkable: true,
                    neighbors: Vec::with_capacity(4),
                });
            }
        }

        let mut grid = Self { cols, rows, cells };

        // Second pass: every cell exists, so neighbor ids can be resolved
        for index in 0..total_cells {
            let neighbors = grid.compute_neighbors(grid.cells[index].coord);
            grid.cells[index].neighbors = neighbors;
        }

        info!(
            "Navigation grid built: {cols}x{rows} ({total} cells, {blocked} blocked)",
            total = total_cells,
            blocked = grid.blocked_count()
        );

        Ok(grid)
    }

    /// Build a grid whose dimensions and elevations come from an elevation field
    pub fn from_field(field: &ElevationField) -> TrailResult<Self> {
        Self::build(field.width, field.height, field)
    }

    fn compute_neighbors(&self, coord: GridCoord) -> Vec<CellId> {
        let GridCoord { x, y } = coord;
        let mut neighbors = Vec::with_capacity(4);

        // Right
        if x + 1 < self.cols {
            neighbors.push(self.id_unchecked(x + 1, y));
        }
        // Left
        if x > 0 {
            neighbors.push(self.id_unchecked(x - 1, y));
        }
        // Down
        if y + 1 < self.rows {
            neighbors.push(self.id_unchecked(x, y + 1));
        }
        // Up
        if y > 0 {
            neighbors.push(self.id_unchecked(x, y - 1));
        }

        neighbors
    }

    fn id_unchecked(&self, x: u32, y: u32) -> CellId {
        CellId(y as usize * self.cols as usize + x as usize)
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x < self.cols && coord.y < self.rows
    }

    /// Resolve coordinates to a cell id, or None if out of bounds
    pub fn id_of(&self, coord: GridCoord) -> Option<CellId> {
        self.contains(coord)
            .then(|| self.id_unchecked(coord.x, coord.y))
    }

    fn checked_id(&self, coord: GridCoord) -> TrailResult<CellId> {
        self.id_of(coord).ok_or(TrailError::OutOfBounds {
            x: coord.x,
            y: coord.y,
            cols: self.cols,
            rows: self.rows,
        })
    }

    /// Panics if `id` did not come from this grid
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub fn get(&self, coord: GridCoord) -> Option<&Cell> {
        self.id_of(coord).map(|id| self.cell(id))
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }

    pub fn coord_of(&self, id: CellId) -> GridCoord {
        self.cell(id).coord
    }

    /// Precomputed neighbors in right, left, down, up order
    pub fn neighbors_of(&self, id: CellId) -> &[CellId] {
        &self.cell(id).neighbors
    }

    pub fn elevation(&self, id: CellId) -> f32 {
        self.cell(id).elevation
    }

    pub fn elevation_at(&self, coord: GridCoord) -> Option<f32> {
        self.get(coord).map(Cell::elevation)
    }

    pub fn is_walkable(&self, id: CellId) -> bool {
        self.cell(id).walkable
    }

    /// Lower a cell's elevation by `amount`, never below the minimum; returns the new value
    pub fn wear(&mut self, id: CellId, amount: f32) -> f32 {
        let cell = &mut self.cells[id.0];
        cell.elevation = (cell.elevation - amount).max(MIN_ELEVATION);
        cell.elevation
    }

    /// Mark a cell as blocked or open; neighbor links are left untouched
    pub fn set_walkable(&mut self, coord: GridCoord, walkable: bool) -> TrailResult<()> {
        let id = self.checked_id(coord)?;
        self.cells[id.0].walkable = walkable;
        Ok(())
    }

    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.walkable).count()
    }

    /// Snapshot of the current (possibly worn) elevations for presentation
    pub fn elevation_field(&self) -> ElevationField {
        // Dimensions and heights already satisfy the field's invariants
        ElevationField {
            width: self.cols,
            height: self.rows,
            heights: self.cells.iter().map(|c| c.elevation).collect(),
        }
    }
}
