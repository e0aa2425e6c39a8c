//! Hyperparameters for the Q-learning agent

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for creating a [`super::QLearningPathfinder`].
///
/// # Examples
///
/// ```
/// use gridpath::q_learning::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_learning_rate(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate α, in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ, in [0, 1]
    pub discount_factor: f64,
    /// Initial exploration rate ε₀, in [0, 1]
    pub epsilon: f64,
    /// Multiplicative ε decay applied once per episode, in (0, 1]
    pub epsilon_decay: f64,
    /// Exploration floor, in [0, ε₀]
    pub min_epsilon: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.95,
            epsilon: 1.0,
            epsilon_decay: 0.995,
            min_epsilon: 0.05,
            seed: None,
        }
    }
}

impl AgentConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    /// Set the initial exploration rate.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_epsilon_decay(mut self, epsilon_decay: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self
    }

    pub fn with_min_epsilon(mut self, min_epsilon: f64) -> Self {
        self.min_epsilon = min_epsilon;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every hyperparameter is finite and inside its range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        check("learning_rate", self.learning_rate, |v| v > 0.0 && v <= 1.0, "(0, 1]")?;
        check("discount_factor", self.discount_factor, |v| (0.0..=1.0).contains(&v), "[0, 1]")?;
        check("epsilon", self.epsilon, |v| (0.0..=1.0).contains(&v), "[0, 1]")?;
        check("epsilon_decay", self.epsilon_decay, |v| v > 0.0 && v <= 1.0, "(0, 1]")?;
        if !(self.min_epsilon.is_finite() && self.min_epsilon >= 0.0 && self.min_epsilon <= self.epsilon) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "min_epsilon {} must be in [0, epsilon] (epsilon = {})",
                    self.min_epsilon, self.epsilon
                ),
            });
        }
        Ok(())
    }
}

fn check(name: &str, value: f64, in_range: impl Fn(f64) -> bool, range: &str) -> Result<()> {
    if value.is_finite() && in_range(value) {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!("{name} {value} must be a finite number in {range}"),
        })
    }
}
