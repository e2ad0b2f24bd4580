use crate::pathfinding::{GridCoord, NavigationGrid, Path};
use tracing::{debug, info};

/// Whether the agent is walking a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Idle,
    Following { path_index: usize },
}

/// Result of a single animation tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdvanceOutcome {
    /// Nothing to do: no active path
    Idle,
    /// Stepped onto a cell that is not the destination
    Moved { to: GridCoord, elevation: f32 },
    /// Stepped onto the destination; the path has been cleared
    Arrived { at: GridCoord, elevation: f32 },
}

/// The walker: current cell, active path and progress along it
#[derive(Debug, Clone)]
pub struct Agent {
    position: GridCoord,
    path: Path,
    state: AgentState,
    wear_amount: f32,
}

impl Agent {
    pub fn new(position: GridCoord, wear_amount: f32) -> Self {
        Self {
            position,
            path: Path::empty(),
            state: AgentState::Idle,
            wear_amount: wear_amount.max(0.0),
        }
    }

    pub fn position(&self) -> GridCoord {
        self.position
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == AgentState::Idle
    }

    pub fn path_index(&self) -> Option<usize> {
        match self.state {
            AgentState::Idle => None,
            AgentState::Following { path_index } => Some(path_index),
        }
    }

    pub fn active_path(&self) -> &Path {
        &self.path
    }

    pub fn wear_amount(&self) -> f32 {
        self.wear_amount
    }

    /// Replace the active path, preempting any travel in progress.
    /// A non-empty path starts at index 0; an empty one leaves the agent idle.
    pub fn install_path(&mut self, path: Path) {
        if path.is_empty() {
            self.path = Path::empty();
            self.state = AgentState::Idle;
            return;
        }

        debug!(
            "Agent at {} following new path of {} steps",
            self.position,
            path.len()
        );
        self.path = path;
        self.state = AgentState::Following { path_index: 0 };
    }

    /// Advance one step along the active path, wearing down the cell stepped onto
    pub fn advance(&mut self, grid: &mut NavigationGrid) -> AdvanceOutcome {
        let AgentState::Following { path_index } = self.state else {
            return AdvanceOutcome::Idle;
        };

        let Some(step) = self.path.get(path_index).copied() else {
            // Index ran past the end; treat as finished
            self.path = Path::empty();
            self.state = AgentState::Idle;
            return AdvanceOutcome::Idle;
        };

        self.position = step.coord;
        let elevation = grid.wear(step.id, self.wear_amount);
        let next_index = path_index + 1;

        if next_index >= self.path.len() {
            info!("Reached the target at {}", step.coord);
            self.path = Path::empty();
            self.state = AgentState::Idle;
            AdvanceOutcome::Arrived {
                at: step.coord,
                elevation,
            }
        } else {
            self.state = AgentState::Following {
                path_index: next_index,
            };
            AdvanceOutcome::Moved {
                to: step.coord,
                elevation,
            }
        }
    }
}
