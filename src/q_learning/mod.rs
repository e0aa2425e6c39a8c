//! Tabular Q-learning for grid pathfinding
//!
//! ## Usage Example
//!
//! ```no_run
//! use gridpath::{
//!     grid::GridWorld,
//!     q_learning::{AgentConfig, QLearningPathfinder},
//!     types::Position,
//! };
//!
//! let grid = GridWorld::random(20, 20, 0.2, Position::new(0, 0), Position::new(19, 19), Some(7))?;
//! let mut agent = QLearningPathfinder::new(&grid, &AgentConfig::default().with_seed(7))?;
//!
//! let stats = agent.train(2500, 400);
//! let learned = agent.greedy_path(400);
//! println!("solved {} of {} episodes, final path solved: {}",
//!     stats.solved_episodes, stats.episodes, learned.solved);
//! # Ok::<(), gridpath::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod q_table;

pub use agent::{EpisodeReport, LearnedPath, QLearningPathfinder, TrainingStats};
pub use config::AgentConfig;
pub use q_table::QTable;
