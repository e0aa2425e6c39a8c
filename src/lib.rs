//! Grid pathfinding with tabular Q-learning
//!
//! This crate provides:
//! - A deterministic grid world (walls, start, goal) with a pure transition model
//! - A Q-learning agent with ε-greedy exploration and unbiased tie-breaking
//! - Loop-free greedy path extraction from the learned Q-table
//! - A simulation pipeline with observers, and the `gridpath` CLI

pub mod cli;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use error::{Error, Result};
pub use grid::{GridWorld, Transition};
pub use q_learning::{AgentConfig, LearnedPath, QLearningPathfinder, TrainingStats};
pub use types::{Action, Position};
