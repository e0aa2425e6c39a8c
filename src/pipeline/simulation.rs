//! End-to-end pathfinding simulation: build a grid, train, extract a path

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::training::{TrainingConfig, TrainingPipeline};
use crate::{
    Error, Result,
    grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH, GridWorld, load_grid_file},
    ports::Observer,
    q_learning::{AgentConfig, QLearningPathfinder, TrainingStats},
    types::Position,
};

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,

    /// Number of training episodes
    pub episodes: usize,

    /// Step budget per episode, also used for path extraction
    pub max_steps: usize,

    /// Wall probability for generated grids
    pub wall_density: f64,

    /// Seed for grid generation, and for the agent unless it has its own
    pub seed: Option<u64>,

    pub start: Position,

    /// Goal cell, bottom-right corner when unset
    pub goal: Option<Position>,

    /// Agent hyperparameters
    pub agent: AgentConfig,

    /// Text layout to load instead of generating a grid
    pub grid_file: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            episodes: 2500,
            max_steps: 400,
            wall_density: 0.2,
            seed: None,
            start: Position::new(0, 0),
            goal: None,
            agent: AgentConfig::default(),
            grid_file: None,
        }
    }
}

impl SimulationConfig {
    /// Read a configuration from a JSON file; missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| Error::io(format!("open config {}", path.display()), e))?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Goal cell, defaulting to the bottom-right corner
    pub fn goal(&self) -> Position {
        self.goal.unwrap_or_else(|| {
            Position::new(self.width.saturating_sub(1), self.height.saturating_sub(1))
        })
    }

    /// Build the grid from the layout file when given, otherwise generate it.
    pub fn build_grid(&self) -> Result<GridWorld> {
        match &self.grid_file {
            Some(path) => {
                let rows = load_grid_file(path, self.width, self.height)?;
                GridWorld::from_rows(self.width, self.height, &rows, self.start, self.goal())
            }
            None => GridWorld::random(
                self.width,
                self.height,
                self.wall_density,
                self.start,
                self.goal(),
                self.seed,
            ),
        }
    }

    fn agent_config(&self) -> AgentConfig {
        let mut agent = self.agent.clone();
        if agent.seed.is_none() {
            agent.seed = self.seed;
        }
        agent
    }

    fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            episodes: self.episodes,
            max_steps: self.max_steps,
        }
    }
}

/// Result of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathfindingResult {
    pub stats: TrainingStats,
    /// Whether the greedy path reaches the goal
    pub solved: bool,
    /// Moves along the greedy path
    pub path_length: usize,
    pub path: Vec<Position>,
    pub rendered_grid: String,
}

/// Run a simulation without observers
pub fn run_simulation(config: &SimulationConfig) -> Result<PathfindingResult> {
    run_simulation_with_observers(config, Vec::new())
}

/// Run a simulation, reporting training episodes to `observers`.
///
/// The rendered grid shows the path only when it reaches the goal; otherwise
/// it marks where the greedy walk stopped.
pub fn run_simulation_with_observers<'o>(
    config: &SimulationConfig,
    observers: Vec<Box<dyn Observer + 'o>>,
) -> Result<PathfindingResult> {
    let grid = config.build_grid()?;
    info!(
        width = grid.width(),
        height = grid.height(),
        walls = grid.wall_count(),
        start = %grid.start(),
        goal = %grid.goal(),
        "grid ready"
    );

    let mut agent = QLearningPathfinder::new(&grid, &config.agent_config())?;
    let mut pipeline = observers
        .into_iter()
        .fold(TrainingPipeline::new(config.training_config()), |p, o| {
            p.with_observer(o)
        });
    let stats = pipeline.run(&mut agent)?;

    let learned = agent.greedy_path(config.max_steps);
    if !learned.solved {
        warn!(
            stopped_at = ?learned.last(),
            moves = learned.len(),
            "greedy path did not reach the goal"
        );
    }

    let rendered_grid = grid.render(
        learned.solved.then_some(learned.path.as_slice()),
        learned.last(),
    );

    Ok(PathfindingResult {
        stats,
        solved: learned.solved,
        path_length: learned.len(),
        path: learned.path,
        rendered_grid,
    })
}
