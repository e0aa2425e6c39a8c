//! Dense Q-table for grid pathfinding

use crate::types::{Action, Position};

/// Q-table holding one value per (cell, action), addressed `[y][x][action]`.
///
/// Storage is allocated once for the whole grid and starts at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    width: usize,
    height: usize,
    /// Q-values, row-major over cells
    values: Vec<[f64; Action::COUNT]>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a zero-initialised Q-table for a `width` x `height` grid
    pub fn new(width: usize, height: usize, learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            width,
            height,
            values: vec![[0.0; Action::COUNT]; width * height],
            learning_rate,
            discount_factor,
        }
    }

    /// All action values for a cell
    pub fn values(&self, state: Position) -> &[f64; Action::COUNT] {
        &self.values[self.index(state)]
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: Position, action: Action) -> f64 {
        self.values(state)[action.index()]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: Position, action: Action, value: f64) {
        let idx = self.index(state);
        self.values[idx][action.index()] = value;
    }

    /// Maximum Q-value over all actions in a state
    pub fn max_q(&self, state: Position) -> f64 {
        self.values(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Every action whose value equals the state's maximum, in index order
    pub fn best_actions(&self, state: Position) -> Vec<Action> {
        let values = self.values(state);
        let max = self.max_q(state);
        Action::ALL
            .into_iter()
            .filter(|action| values[action.index()] == max)
            .collect()
    }

    /// All actions ordered by descending value; equal values keep index order
    pub fn ranked_actions(&self, state: Position) -> [Action; Action::COUNT] {
        let values = self.values(state);
        let mut ranked = Action::ALL;
        ranked.sort_by(|a, b| values[b.index()].total_cmp(&values[a.index()]));
        ranked
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    pub fn q_learning_update(
        &mut self,
        state: Position,
        action: Action,
        reward: f64,
        next_state: Position,
    ) {
        let current_q = self.get(state, action);
        let td_target = reward + self.discount_factor * self.max_q(next_state);
        let td_error = td_target - current_q;
        self.set(state, action, current_q + self.learning_rate * td_error);
    }

    fn index(&self, state: Position) -> usize {
        debug_assert!(
            state.x < self.width && state.y < self.height,
            "state {state} outside {}x{} table",
            self.width,
            self.height
        );
        state.y * self.width + state.x
    }
}
