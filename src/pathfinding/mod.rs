use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, error, warn};

pub mod grid;
pub mod grid_blocking;
pub mod path;

pub use grid::{Cell, CellId, ElevationSampler, GridCoord, NavigationGrid};
pub use grid_blocking::Obstacle;
pub use path::{Path, PathStep, path_cost, step_cost};

/// Where a cell stands in the current search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Unvisited,
    Open,
    Closed,
}

/// Per-search bookkeeping for one cell; lives only for a single `find_path` call
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    cost_from_start: f32,
    heuristic: f32,
    total_cost: f32,
    predecessor: Option<CellId>,
    state: NodeState,
    /// Sequence number of the newest heap entry for this cell
    sequence: u64,
}

impl Default for SearchNode {
    fn default() -> Self {
        Self {
            cost_from_start: f32::INFINITY,
            heuristic: 0.0,
            total_cost: f32::INFINITY,
            predecessor: None,
            state: NodeState::Unvisited,
            sequence: 0,
        }
    }
}

/// Open-set entry. The heap pops the lowest total cost first; ties go to the
/// lower heuristic, then to whichever entry was pushed first.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    total_cost: f32,
    heuristic: f32,
    sequence: u64,
    id: CellId,
}

impl OpenEntry {
    fn for_node(id: CellId, node: &SearchNode) -> Self {
        Self {
            total_cost: node.total_cost,
            heuristic: node.heuristic,
            sequence: node.sequence,
            id,
        }
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .total_cost
            .total_cmp(&self.total_cost)
            .then_with(|| other.heuristic.total_cmp(&self.heuristic))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Find the cheapest path between two cells using A*.
///
/// Step cost is the geometric distance between cells plus the absolute
/// elevation change, and the heuristic is the Manhattan distance to the goal,
/// which never overestimates that cost on a 4-connected grid. Blocked cells
/// are never entered; the start cell may be blocked (the walker is already
/// standing on it), so `start == goal` always yields the single-cell path,
/// while any other blocked goal yields an empty path.
///
/// Returns the path origin-first, or an empty path if the goal is unreachable.
pub fn find_path(grid: &NavigationGrid, start: CellId, goal: CellId) -> Path {
    if start == goal {
        return Path::new(vec![PathStep {
            id: start,
            coord: grid.coord_of(start),
            cost_from_start: 0.0,
        }]);
    }

    if !grid.is_walkable(goal) {
        warn!(
            "Pathfinding failed: goal {} is blocked",
            grid.coord_of(goal)
        );
        return Path::empty();
    }

    let goal_coord = grid.coord_of(goal);
    let heuristic = |id: CellId| grid.coord_of(id).manhattan_distance(&goal_coord) as f32;

    let mut nodes = vec![SearchNode::default(); grid.len()];
    let mut open = BinaryHeap::new();
    let mut next_sequence: u64 = 0;
    let mut expanded = 0usize;

    let start_h = heuristic(start);
    nodes[start.index()] = SearchNode {
        cost_from_start: 0.0,
        heuristic: start_h,
        total_cost: start_h,
        predecessor: None,
        state: NodeState::Open,
        sequence: next_sequence,
    };
    open.push(OpenEntry::for_node(start, &nodes[start.index()]));
    next_sequence += 1;

    while let Some(entry) = open.pop() {
        let current = entry.id;
        let node = nodes[current.index()];

        // Superseded by a cheaper entry pushed later, or already expanded
        if node.state != NodeState::Open || node.sequence != entry.sequence {
            continue;
        }

        if current == goal {
            debug!(
                "Pathfinding: reached {} after expanding {} cells",
                goal_coord, expanded
            );
            return reconstruct_path(grid, &nodes, goal);
        }

        nodes[current.index()].state = NodeState::Closed;
        expanded += 1;

        for &neighbor in grid.neighbors_of(current) {
            if !grid.is_walkable(neighbor) {
                continue;
            }

            let neighbor_node = nodes[neighbor.index()];
            if neighbor_node.state == NodeState::Closed {
                continue;
            }

            let tentative = node.cost_from_start + step_cost(grid, current, neighbor);
            if neighbor_node.state == NodeState::Unvisited
                || tentative < neighbor_node.cost_from_start
            {
                let h = heuristic(neighbor);
                let updated = SearchNode {
                    cost_from_start: tentative,
                    heuristic: h,
                    total_cost: tentative + h,
                    predecessor: Some(current),
                    state: NodeState::Open,
                    sequence: next_sequence,
                };
                nodes[neighbor.index()] = updated;
                open.push(OpenEntry::for_node(neighbor, &updated));
                next_sequence += 1;
            }
        }
    }

    warn!(
        "Pathfinding failed: no route from {} to {} ({} cells expanded)",
        grid.coord_of(start),
        goal_coord,
        expanded
    );
    Path::empty()
}

/// Find a path between two coordinates; empty if either lies outside the grid
pub fn find_path_between(grid: &NavigationGrid, start: GridCoord, goal: GridCoord) -> Path {
    match (grid.id_of(start), grid.id_of(goal)) {
        (Some(start), Some(goal)) => find_path(grid, start, goal),
        _ => Path::empty(),
    }
}

fn reconstruct_path(grid: &NavigationGrid, nodes: &[SearchNode], goal: CellId) -> Path {
    let predecessors: Vec<Option<CellId>> = nodes.iter().map(|n| n.predecessor).collect();
    let (ids, complete) = walk_predecessors(&predecessors, goal);

    if !complete {
        error!(
            "Cycle detected in path reconstruction toward {}, returning {} partial steps",
            grid.coord_of(goal),
            ids.len()
        );
    }

    Path::new(
        ids.into_iter()
            .map(|id| PathStep {
                id,
                coord: grid.coord_of(id),
                cost_from_start: nodes[id.index()].cost_from_start,
            })
            .collect(),
    )
}

/// Follow back-pointers from `goal` and return the chain origin-first.
///
/// The walk visits each cell at most once, so it stops after at most
/// `predecessors.len()` steps. The flag is false when a repeated cell cut the
/// walk short; the cells gathered before the repeat are still returned.
fn walk_predecessors(predecessors: &[Option<CellId>], goal: CellId) -> (Vec<CellId>, bool) {
    let mut visited = vec![false; predecessors.len()];
    let mut chain = Vec::new();
    let mut cursor = Some(goal);
    let mut complete = true;

    while let Some(id) = cursor {
        let Some(seen) = visited.get_mut(id.index()) else {
            complete = false;
            break;
        };
        if *seen {
            complete = false;
            break;
        }
        *seen = true;
        chain.push(id);
        cursor = predecessors[id.index()];
    }

    chain.reverse();
    (chain, complete)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::ElevationField;
    use crate::terrain_generation::get_terrain_preset;
    use pathfinding::prelude::dijkstra;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn grid_from_rows(rows: &[&[f32]]) -> NavigationGrid {
        let field = ElevationField::from_rows(rows).expect("Test rows should be rectangular");
        NavigationGrid::from_field(&field).expect("Test grid should build")
    }

    fn flat_grid(cols: u32, rows: u32) -> NavigationGrid {
        NavigationGrid::build(cols, rows, &|_: u32, _: u32| 0.0_f32).unwrap()
    }

    fn random_grid(cols: u32, rows: u32, seed: u64) -> NavigationGrid {
        let mut rng = Pcg64::seed_from_u64(seed);
        let heights: Vec<f32> = (0..cols * rows)
            .map(|_| rng.gen_range(0..20) as f32)
            .collect();
        let field = ElevationField::new(cols, rows, heights).unwrap();
        NavigationGrid::from_field(&field).unwrap()
    }

    fn id(grid: &NavigationGrid, x: u32, y: u32) -> CellId {
        grid.id_of(GridCoord::new(x, y)).expect("Coordinate should be in bounds")
    }

    /// Exhaustive Dijkstra over the same cost model, in integer units
    fn brute_force_cost(grid: &NavigationGrid, start: CellId, goal: CellId) -> Option<u32> {
        dijkstra(
            &start,
            |&current| {
                grid.neighbors_of(current)
                    .iter()
                    .filter(|&&n| grid.is_walkable(n))
                    .map(|&n| (n, step_cost(grid, current, n) as u32))
                    .collect::<Vec<_>>()
            },
            |&id| id == goal,
        )
        .map(|(_, cost)| cost)
    }

    #[test]
    fn test_flat_corner_to_corner() {
        let grid = flat_grid(5, 5);
        let path = find_path(&grid, id(&grid, 0, 0), id(&grid, 4, 4));

        assert_eq!(path.len(), 9);
        assert_eq!(path.first().unwrap().coord, GridCoord::new(0, 0));
        assert_eq!(path.last().unwrap().coord, GridCoord::new(4, 4));
        assert!(path.is_contiguous());
        assert_eq!(path.total_cost(), 8.0);

        let costs: Vec<f32> = path.steps().iter().map(|s| s.cost_from_start).collect();
        assert!(
            costs.windows(2).all(|w| w[0] <= w[1]),
            "cost_from_start should never decrease: {costs:?}"
        );
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = random_grid(4, 4, 3);
        let cell = id(&grid, 2, 1);
        let path = find_path(&grid, cell, cell);

        assert_eq!(path.len(), 1);
        assert_eq!(path.first().unwrap().id, cell);
        assert_eq!(path.total_cost(), 0.0);
    }

    #[test]
    fn test_all_pairs_are_valid_walks() {
        let grid = random_grid(5, 5, 11);
        for (start, _) in grid.cells() {
            for (goal, _) in grid.cells() {
                let path = find_path(&grid, start, goal);
                assert!(!path.is_empty());
                assert_eq!(path.first().unwrap().id, start);
                assert_eq!(path.last().unwrap().id, goal);
                assert!(path.is_contiguous());
            }
        }
    }

    #[test]
    fn test_matches_brute_force_optimum() {
        for seed in [1, 2, 3, 42] {
            let grid = random_grid(5, 5, seed);
            for (start, _) in grid.cells() {
                for (goal, _) in grid.cells() {
                    let path = find_path(&grid, start, goal);
                    let ids: Vec<CellId> = path.ids().collect();
                    let expected = brute_force_cost(&grid, start, goal)
                        .expect("Open grid should always be connected");

                    assert_eq!(
                        path_cost(&grid, &ids),
                        expected as f32,
                        "seed {seed}: {} -> {}",
                        grid.coord_of(start),
                        grid.coord_of(goal)
                    );
                    assert_eq!(path.total_cost(), expected as f32);
                }
            }
        }
    }

    #[test]
    fn test_avoids_ridge_when_cheaper() {
        // Crossing the middle column costs 2 * 50 extra; going around the gap costs 4 steps more
        let grid = grid_from_rows(&[
            &[0.0, 50.0, 0.0],
            &[0.0, 50.0, 0.0],
            &[0.0, 0.0, 0.0],
        ]);
        let path = find_path(&grid, id(&grid, 0, 0), id(&grid, 2, 0));
        let coords: Vec<GridCoord> = path.coords().collect();

        assert_eq!(path.total_cost(), 6.0);
        assert!(coords.contains(&GridCoord::new(1, 2)));
        assert!(!coords.contains(&GridCoord::new(1, 0)));
    }

    #[test]
    fn test_idempotent() {
        let grid = random_grid(6, 6, 99);
        let a = find_path(&grid, id(&grid, 0, 5), id(&grid, 5, 0));
        let b = find_path(&grid, id(&grid, 0, 5), id(&grid, 5, 0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_flat_tie_break_is_deterministic() {
        // Equal-cost routes: ties favor the lower heuristic, then insertion
        // order, and neighbors are pushed right, left, down, up.
        let grid = flat_grid(3, 3);
        let path = find_path(&grid, id(&grid, 0, 0), id(&grid, 2, 2));
        let coords: Vec<GridCoord> = path.coords().collect();
        assert_eq!(
            coords,
            vec![
                GridCoord::new(0, 0),
                GridCoord::new(1, 0),
                GridCoord::new(2, 0),
                GridCoord::new(2, 1),
                GridCoord::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_walled_off_goal_returns_empty() {
        let mut grid = flat_grid(5, 5);
        for y in 0..5 {
            grid.set_walkable(GridCoord::new(2, y), false).unwrap();
        }
        let path = find_path(&grid, id(&grid, 0, 0), id(&grid, 4, 4));
        assert!(path.is_empty());
        assert!(brute_force_cost(&grid, id(&grid, 0, 0), id(&grid, 4, 4)).is_none());
    }

    #[test]
    fn test_standing_on_blocked_cell_targeting_itself() {
        let mut grid = flat_grid(3, 3);
        grid.set_walkable(GridCoord::new(1, 1), false).unwrap();
        let cell = id(&grid, 1, 1);
        let path = find_path(&grid, cell, cell);

        assert_eq!(path.len(), 1);
        assert_eq!(path.first().unwrap().id, cell);
        assert_eq!(path.total_cost(), 0.0);
    }

    #[test]
    fn test_leaves_blocked_start_cell() {
        let mut grid = flat_grid(3, 3);
        grid.set_walkable(GridCoord::new(0, 0), false).unwrap();
        let path = find_path(&grid, id(&grid, 0, 0), id(&grid, 2, 0));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_fractional_elevations_match_brute_force() {
        // Noise terrain has non-integer heights; the oracle runs in fixed point
        const FIXED: f32 = 10_000.0;
        let field = get_terrain_preset("perlin", Some(17), 0.1)
            .expect("Perlin preset should exist")
            .generate(12, 12)
            .expect("Perlin field should generate");
        let grid = NavigationGrid::from_field(&field).unwrap();
        assert!(
            field.heights.iter().any(|h| h.fract() != 0.0),
            "Field should contain fractional heights"
        );

        let mut rng = Pcg64::seed_from_u64(5);
        for _ in 0..60 {
            let start = id(&grid, rng.gen_range(0..12), rng.gen_range(0..12));
            let goal = id(&grid, rng.gen_range(0..12), rng.gen_range(0..12));

            let (_, fixed_cost) = dijkstra(
                &start,
                |&current| {
                    grid.neighbors_of(current)
                        .iter()
                        .map(|&n| (n, (step_cost(&grid, current, n) * FIXED).round() as u64))
                        .collect::<Vec<_>>()
                },
                |&c| c == goal,
            )
            .expect("Open grid should always be connected");
            let expected = fixed_cost as f32 / FIXED;

            let path = find_path(&grid, start, goal);
            let ids: Vec<CellId> = path.ids().collect();
            let actual = path_cost(&grid, &ids);

            assert!(path.is_contiguous());
            assert!(
                (actual - expected).abs() <= 1e-2,
                "{} -> {}: A* cost {actual}, optimum {expected}",
                grid.coord_of(start),
                grid.coord_of(goal)
            );
        }
    }

    #[test]
    fn test_blocked_goal_returns_empty() {
        let mut grid = flat_grid(3, 3);
        grid.set_walkable(GridCoord::new(2, 2), false).unwrap();
        assert!(find_path(&grid, id(&grid, 0, 0), id(&grid, 2, 2)).is_empty());
    }

    #[test]
    fn test_routes_around_obstacles_optimally() {
        let mut grid = random_grid(5, 5, 7);
        for (x, y) in [(1, 0), (1, 1), (1, 2), (3, 4), (3, 3), (3, 2)] {
            grid.set_walkable(GridCoord::new(x, y), false).unwrap();
        }

        let start = id(&grid, 0, 0);
        let goal = id(&grid, 4, 0);
        let path = find_path(&grid, start, goal);
        let ids: Vec<CellId> = path.ids().collect();

        assert!(path.is_contiguous());
        assert!(ids.iter().all(|&c| grid.is_walkable(c)));
        assert_eq!(
            path_cost(&grid, &ids),
            brute_force_cost(&grid, start, goal).unwrap() as f32
        );
    }

    #[test]
    fn test_find_path_between_out_of_bounds() {
        let grid = flat_grid(3, 3);
        assert!(find_path_between(&grid, GridCoord::new(0, 0), GridCoord::new(3, 0)).is_empty());
        assert_eq!(
            find_path_between(&grid, GridCoord::new(0, 0), GridCoord::new(0, 2)).len(),
            3
        );
    }

    #[test]
    fn test_walk_predecessors_complete_chain() {
        let predecessors = vec![None, Some(CellId(0)), Some(CellId(1))];
        let (chain, complete) = walk_predecessors(&predecessors, CellId(2));
        assert!(complete);
        assert_eq!(chain, vec![CellId(0), CellId(1), CellId(2)]);
    }

    #[test]
    fn test_walk_predecessors_stops_on_cycle() {
        // 3 -> 2 -> 1 -> 2 ...
        let predecessors = vec![None, Some(CellId(2)), Some(CellId(1)), Some(CellId(2))];
        let (chain, complete) = walk_predecessors(&predecessors, CellId(3));
        assert!(!complete);
        assert_eq!(chain, vec![CellId(1), CellId(2), CellId(3)]);
    }

    #[test]
    fn test_walk_predecessors_self_loop() {
        let predecessors = vec![Some(CellId(0))];
        let (chain, complete) = walk_predecessors(&predecessors, CellId(0));
        assert!(!complete);
        assert_eq!(chain, vec![CellId(0)]);
    }
}
