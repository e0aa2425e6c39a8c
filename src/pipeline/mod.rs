//! Training and simulation pipeline
//!
//! This module provides:
//! - An observer-aware training loop around the Q-learning agent
//! - Observers for progress display, JSONL episode logs and metrics
//! - The end-to-end simulation driver used by the CLI

pub mod observers;
pub mod simulation;
pub mod training;

pub use observers::{EpisodeRecord, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use simulation::{
    PathfindingResult, SimulationConfig, run_simulation, run_simulation_with_observers,
};
pub use training::{TrainingConfig, TrainingPipeline};

pub use crate::ports::Observer;
