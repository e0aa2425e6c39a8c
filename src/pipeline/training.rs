//! Training pipeline for the Q-learning agent

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    ports::Observer,
    q_learning::{QLearningPathfinder, TrainingStats},
};

/// Training configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Step budget per episode
    pub max_steps: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 2500,
            max_steps: 400,
        }
    }
}

/// Training pipeline that drives an agent episode by episode and reports
/// each outcome to its observers
pub struct TrainingPipeline<'o> {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer + 'o>>,
}

impl<'o> TrainingPipeline<'o> {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer + 'o>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Train the agent for the configured number of episodes.
    ///
    /// # Errors
    ///
    /// Only observer failures are errors; unsolved episodes are not.
    pub fn run(&mut self, agent: &mut QLearningPathfinder<'_>) -> Result<TrainingStats> {
        let TrainingConfig {
            episodes,
            max_steps,
        } = self.config;
        info!(episodes, max_steps, "training started");

        for observer in &mut self.observers {
            observer.on_training_start(episodes)?;
        }

        let observers = &mut self.observers;
        let stats = agent.train_with(episodes, max_steps, |episode, report| {
            debug!(
                episode,
                solved = report.solved,
                steps = report.steps,
                epsilon = report.epsilon,
                "episode complete"
            );
            for observer in observers.iter_mut() {
                observer.on_episode_end(episode, report)?;
            }
            Ok::<(), crate::Error>(())
        })?;

        for observer in &mut self.observers {
            observer.on_training_end(&stats)?;
        }

        info!(
            solved_episodes = stats.solved_episodes,
            best_steps = ?stats.best_steps,
            "training finished"
        );
        Ok(stats)
    }
}
