//! Q-learning pathfinding agent
//!
//! The agent learns a Q-table over grid cells by ε-greedy interaction with a
//! [`GridWorld`] and extracts a loop-free greedy path from it.

use std::{collections::HashSet, convert::Infallible};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{config::AgentConfig, q_table::QTable};
use crate::{
    error::Result,
    grid::GridWorld,
    types::{Action, Position},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Aggregate statistics of a training run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Episodes played
    pub episodes: usize,
    /// Episodes that reached the goal
    pub solved_episodes: usize,
    /// Fewest steps in any solved episode
    pub best_steps: Option<usize>,
}

impl TrainingStats {
    /// Fold one episode into the running totals
    pub fn record(&mut self, report: &EpisodeReport) {
        self.episodes += 1;
        if report.solved {
            self.solved_episodes += 1;
            self.best_steps = Some(match self.best_steps {
                Some(best) => best.min(report.steps),
                None => report.steps,
            });
        }
    }

    /// Fraction of episodes that reached the goal
    pub fn solve_rate(&self) -> f64 {
        if self.episodes > 0 {
            self.solved_episodes as f64 / self.episodes as f64
        } else {
            0.0
        }
    }
}

/// Outcome of a single training episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    /// Whether the goal was reached
    pub solved: bool,
    /// Steps taken (the full budget if unsolved)
    pub steps: usize,
    /// Sum of rewards collected
    pub total_reward: f64,
    /// Exploration rate after this episode's decay
    pub epsilon: f64,
}

/// Path produced by greedy extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedPath {
    /// Visited cells, beginning with the start cell
    pub path: Vec<Position>,
    /// Whether the path ends on the goal
    pub solved: bool,
}

impl LearnedPath {
    /// Number of moves along the path
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Final cell of the path
    pub fn last(&self) -> Option<Position> {
        self.path.last().copied()
    }
}

/// Tabular Q-learning agent for a single grid
///
/// Borrows the environment immutably, so several agents can learn on the
/// same grid, each with its own table and random generator.
#[derive(Debug, Clone)]
pub struct QLearningPathfinder<'a> {
    env: &'a GridWorld,
    q_table: QTable,
    epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    rng: StdRng,
}

impl<'a> QLearningPathfinder<'a> {
    /// Create an agent with a zeroed Q-table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if a hyperparameter is
    /// out of range.
    pub fn new(env: &'a GridWorld, config: &AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            env,
            q_table: QTable::new(
                env.width(),
                env.height(),
                config.learning_rate,
                config.discount_factor,
            ),
            epsilon: config.epsilon,
            epsilon_decay: config.epsilon_decay,
            min_epsilon: config.min_epsilon,
            rng: build_rng(config.seed),
        })
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// ε-greedy action selection
    ///
    /// Greedy choices pick uniformly among all actions sharing the maximum
    /// value, so untrained or symmetric states carry no directional bias.
    pub fn select_action(&mut self, state: Position) -> Action {
        if self.rng.random::<f64>() < self.epsilon {
            Action::ALL[self.rng.random_range(0..Action::COUNT)]
        } else {
            let best = self.q_table.best_actions(state);
            best[self.rng.random_range(0..best.len())]
        }
    }

    /// Play one episode from the start cell, learning from every step.
    ///
    /// Exploration decays once at the end, whatever the outcome.
    pub fn run_episode(&mut self, max_steps: usize) -> EpisodeReport {
        let mut state = self.env.start();
        let mut total_reward = 0.0;
        let mut solved = false;
        let mut steps = 0;

        for step in 1..=max_steps {
            let action = self.select_action(state);
            let transition = self.env.step(state, action);

            self.q_table
                .q_learning_update(state, action, transition.reward, transition.next_state);

            total_reward += transition.reward;
            state = transition.next_state;
            steps = step;

            if transition.terminal {
                solved = true;
                break;
            }
        }

        self.decay_epsilon();
        trace!(solved, steps, total_reward, epsilon = self.epsilon, "episode finished");

        EpisodeReport {
            solved,
            steps,
            total_reward,
            epsilon: self.epsilon,
        }
    }

    /// Train for a number of episodes.
    ///
    /// Unsolved episodes are ordinary outcomes and only show up in the stats.
    pub fn train(&mut self, episodes: usize, max_steps_per_episode: usize) -> TrainingStats {
        let outcome = self.train_with(episodes, max_steps_per_episode, |_, _| {
            Ok::<(), Infallible>(())
        });
        match outcome {
            Ok(stats) => stats,
            Err(never) => match never {},
        }
    }

    /// Train for a number of episodes, handing every report to `on_episode`.
    ///
    /// `on_episode` receives the 0-based episode index after that episode's
    /// ε decay. Its first error stops training and is returned.
    pub fn train_with<E>(
        &mut self,
        episodes: usize,
        max_steps_per_episode: usize,
        mut on_episode: impl FnMut(usize, &EpisodeReport) -> std::result::Result<(), E>,
    ) -> std::result::Result<TrainingStats, E> {
        let mut stats = TrainingStats::default();
        for episode in 0..episodes {
            let report = self.run_episode(max_steps_per_episode);
            stats.record(&report);
            on_episode(episode, &report)?;
        }
        Ok(stats)
    }

    /// Walk the learned table greedily from the start cell.
    ///
    /// At each cell the actions are tried in descending value order and the
    /// first one leading to a new, unvisited cell is taken. The walk stops on
    /// the goal, when boxed in, or after `max_steps` moves.
    pub fn greedy_path(&self, max_steps: usize) -> LearnedPath {
        let mut state = self.env.start();
        let mut path = vec![state];
        let mut visited = HashSet::from([state]);

        for _ in 0..max_steps {
            let next = self
                .q_table
                .ranked_actions(state)
                .into_iter()
                .map(|action| self.env.step(state, action))
                .find(|t| t.next_state != state && !visited.contains(&t.next_state));

            let Some(transition) = next else {
                return LearnedPath {
                    path,
                    solved: false,
                };
            };

            state = transition.next_state;
            path.push(state);
            visited.insert(state);

            if transition.terminal {
                return LearnedPath { path, solved: true };
            }
        }

        LearnedPath {
            path,
            solved: false,
        }
    }

    /// Decay epsilon after episode
    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }
}
