//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Observer,
    q_learning::{EpisodeReport, TrainingStats},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    solved: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            solved: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, report: &EpisodeReport) -> Result<()> {
        if report.solved {
            self.solved += 1;
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("solved:{} ε:{:.3}", self.solved, report.epsilon));
        }
        Ok(())
    }

    fn on_training_end(&mut self, stats: &TrainingStats) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("solved:{}", stats.solved_episodes));
        }
        Ok(())
    }
}

/// One line of the episode log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub solved: bool,
    pub steps: usize,
    pub total_reward: f64,
    pub epsilon: f64,
}

/// JSONL observer - Writes one JSON object per episode
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create the output file, truncating any existing content
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::io(format!("create episode log {}", path.display()), e))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_end(&mut self, episode: usize, report: &EpisodeReport) -> Result<()> {
        let record = EpisodeRecord {
            episode,
            solved: report.solved,
            steps: report.steps,
            total_reward: report.total_reward,
            epsilon: report.epsilon,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(self.writer).map_err(|e| Error::io("write episode log", e))?;
        Ok(())
    }

    fn on_training_end(&mut self, _stats: &TrainingStats) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::io("flush episode log", e))
    }
}

/// Metrics observer - Tracks training metrics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    episodes: usize,
    solved: usize,
    solved_steps: usize,
    total_reward: f64,
    final_epsilon: Option<f64>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of observed episodes that reached the goal
    pub fn solve_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.solved as f64 / self.episodes as f64
        }
    }

    /// Mean episode length over solved episodes
    pub fn avg_solved_steps(&self) -> Option<f64> {
        (self.solved > 0).then(|| self.solved_steps as f64 / self.solved as f64)
    }

    /// Mean total reward per episode
    pub fn avg_reward(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_reward / self.episodes as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.episodes,
            solved_episodes: self.solved,
            solve_rate: self.solve_rate(),
            avg_solved_steps: self.avg_solved_steps(),
            avg_reward: self.avg_reward(),
            final_epsilon: self.final_epsilon,
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub solved_episodes: usize,
    pub solve_rate: f64,
    pub avg_solved_steps: Option<f64>,
    pub avg_reward: f64,
    pub final_epsilon: Option<f64>,
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, report: &EpisodeReport) -> Result<()> {
        self.episodes += 1;
        self.total_reward += report.total_reward;
        self.final_epsilon = Some(report.epsilon);
        if report.solved {
            self.solved += 1;
            self.solved_steps += report.steps;
        }
        Ok(())
    }
}
