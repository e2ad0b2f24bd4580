use crate::pathfinding::{CellId, GridCoord, NavigationGrid};
use crate::terrain::constants::ORTHOGONAL_STEP_COST;

/// One cell along a path together with the search cost to reach it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    pub id: CellId,
    pub coord: GridCoord,
    pub cost_from_start: f32,
}

/// Ordered walk from origin to destination; empty means "no path"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&PathStep> {
        self.steps.get(index)
    }

    pub fn first(&self) -> Option<&PathStep> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    pub fn ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.steps.iter().map(|s| s.id)
    }

    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.steps.iter().map(|s| s.coord)
    }

    /// Cost recorded by the search at the destination (0 for empty paths)
    pub fn total_cost(&self) -> f32 {
        self.last().map(|s| s.cost_from_start).unwrap_or(0.0)
    }

    /// True if every consecutive pair of cells shares an edge
    pub fn is_contiguous(&self) -> bool {
        self.steps
            .windows(2)
            .all(|pair| pair[0].coord.is_adjacent(&pair[1].coord))
    }
}

/// Cost of moving between two cells: geometric distance plus absolute elevation change
pub fn step_cost(grid: &NavigationGrid, from: CellId, to: CellId) -> f32 {
    let a = grid.coord_of(from);
    let b = grid.coord_of(to);
    let dx = a.x.abs_diff(b.x) as f32;
    let dy = a.y.abs_diff(b.y) as f32;
    let distance = (dx * dx + dy * dy).sqrt() * ORTHOGONAL_STEP_COST;

    distance + (grid.elevation(to) - grid.elevation(from)).abs()
}

/// Total cost of walking a sequence of cells with the grid's current elevations
pub fn path_cost(grid: &NavigationGrid, cells: &[CellId]) -> f32 {
    cells
        .windows(2)
        .map(|pair| step_cost(grid, pair[0], pair[1]))
        .sum()
}
