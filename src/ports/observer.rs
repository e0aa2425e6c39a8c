//! Observer port - abstraction for training observation and data collection
//!
//! Observers receive episode-level events from a
//! [`crate::pipeline::TrainingPipeline`], so progress display, logging and
//! metrics stay out of the learning code.

use crate::{
    Result,
    q_learning::{EpisodeReport, TrainingStats},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. `on_episode_end(episode, report)` - After every episode
/// 3. `on_training_end(stats)` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use gridpath::{ports::Observer, q_learning::EpisodeReport};
///
/// struct SolvedCounter {
///     solved: usize,
/// }
///
/// impl Observer for SolvedCounter {
///     fn on_episode_end(&mut self, _episode: usize, report: &EpisodeReport) -> gridpath::Result<()> {
///         if report.solved {
///             self.solved += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode, including its ε decay.
    ///
    /// `episode` is 0-based.
    fn on_episode_end(&mut self, _episode: usize, _report: &EpisodeReport) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to flush outputs or display summaries.
    fn on_training_end(&mut self, _stats: &TrainingStats) -> Result<()> {
        Ok(())
    }
}

impl<T: Observer + ?Sized> Observer for &mut T {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        (**self).on_training_start(total_episodes)
    }

    fn on_episode_end(&mut self, episode: usize, report: &EpisodeReport) -> Result<()> {
        (**self).on_episode_end(episode, report)
    }

    fn on_training_end(&mut self, stats: &TrainingStats) -> Result<()> {
        (**self).on_training_end(stats)
    }
}
