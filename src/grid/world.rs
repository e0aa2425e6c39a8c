//! Grid layout and transition model

use std::collections::HashSet;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::{Action, Position},
};

/// Default grid width used by the simulation driver
pub const DEFAULT_WIDTH: usize = 20;
/// Default grid height used by the simulation driver
pub const DEFAULT_HEIGHT: usize = 20;

/// Reward for a move that is blocked by a wall or the grid boundary
pub const WALL_PENALTY: f64 = -5.0;
/// Reward for entering the goal cell
pub const GOAL_REWARD: f64 = 50.0;
/// Reward for any other move
pub const STEP_COST: f64 = -1.0;

/// Upper bound (exclusive) for random wall density
const MAX_WALL_DENSITY: f64 = 0.6;

/// Largest grid, in cells, that can be constructed
pub const MAX_CELLS: usize = 1 << 22;

/// Outcome of a single transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub next_state: Position,
    pub reward: f64,
    pub terminal: bool,
}

/// Immutable grid pathfinding environment.
///
/// Start and goal are always inside the grid and are never walls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridWorld {
    width: usize,
    height: usize,
    start: Position,
    goal: Position,
    /// Row-major wall flags, `y * width + x`
    walls: Vec<bool>,
}

impl GridWorld {
    /// Create a grid from an explicit wall set.
    ///
    /// Walls on the start or goal cell are removed; walls outside the grid
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero, the grid exceeds
    /// [`MAX_CELLS`], or start/goal are out of bounds.
    pub fn new(
        width: usize,
        height: usize,
        start: Position,
        goal: Position,
        walls: impl IntoIterator<Item = Position>,
    ) -> Result<Self> {
        let cells = check_dimensions(width, height)?;

        let mut grid = Self {
            width,
            height,
            start,
            goal,
            walls: vec![false; cells],
        };
        grid.check_bounds("start", start)?;
        grid.check_bounds("goal", goal)?;

        for wall in walls {
            if wall != start && wall != goal && grid.in_bounds(wall) {
                let idx = grid.index(wall);
                grid.walls[idx] = true;
            }
        }

        Ok(grid)
    }

    /// Create a grid without walls.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or start/goal are out of bounds.
    pub fn open(width: usize, height: usize, start: Position, goal: Position) -> Result<Self> {
        Self::new(width, height, start, goal, std::iter::empty::<Position>())
    }

    /// Create a grid from text rows using `.` for empty cells and `#` for walls.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows don't describe a `width` x `height` grid,
    /// contain other characters, or start/goal are out of bounds.
    pub fn from_rows<S: AsRef<str>>(
        width: usize,
        height: usize,
        rows: &[S],
        start: Position,
        goal: Position,
    ) -> Result<Self> {
        let walls = super::layout::parse_rows(width, height, rows)?;
        Self::new(width, height, start, goal, walls)
    }

    /// Generate a random grid where each cell (other than start and goal)
    /// is a wall with probability `wall_density`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWallDensity`] unless `0.0 <= wall_density < 0.6`,
    /// and the same dimension errors as [`GridWorld::new`].
    pub fn random(
        width: usize,
        height: usize,
        wall_density: f64,
        start: Position,
        goal: Position,
        seed: Option<u64>,
    ) -> Result<Self> {
        if !(0.0..MAX_WALL_DENSITY).contains(&wall_density) {
            return Err(Error::InvalidWallDensity {
                value: wall_density,
            });
        }
        check_dimensions(width, height)?;

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let mut walls = HashSet::new();
        for y in 0..height {
            for x in 0..width {
                let cell = Position::new(x, y);
                if rng.random::<f64>() < wall_density && cell != start && cell != goal {
                    walls.insert(cell);
                }
            }
        }

        Self::new(width, height, start, goal, walls)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.in_bounds(position) && self.walls[self.index(position)]
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&wall| wall).count()
    }

    /// Iterate over wall cells in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Position> + '_ {
        self.walls
            .iter()
            .enumerate()
            .filter(|(_, wall)| **wall)
            .map(|(idx, _)| Position::new(idx % self.width, idx / self.width))
    }

    /// Apply an action given by index (0=up, 1=down, 2=left, 3=right).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] for indices outside 0-3.
    pub fn transition(&self, state: Position, action: usize) -> Result<Transition> {
        let action = Action::from_index(action)?;
        Ok(self.step(state, action))
    }

    /// Apply a typed action.
    ///
    /// Blocked moves leave the state unchanged and cost [`WALL_PENALTY`];
    /// entering the goal pays [`GOAL_REWARD`] and ends the episode; every
    /// other move costs [`STEP_COST`].
    pub fn step(&self, state: Position, action: Action) -> Transition {
        let candidate = state
            .offset(action.delta())
            .filter(|&next| self.in_bounds(next) && !self.is_wall(next));

        match candidate {
            None => Transition {
                next_state: state,
                reward: WALL_PENALTY,
                terminal: false,
            },
            Some(next) if next == self.goal => Transition {
                next_state: next,
                reward: GOAL_REWARD,
                terminal: true,
            },
            Some(next) => Transition {
                next_state: next,
                reward: STEP_COST,
                terminal: false,
            },
        }
    }

    pub(crate) fn index(&self, position: Position) -> usize {
        position.y * self.width + position.x
    }

    fn check_bounds(&self, role: &'static str, position: Position) -> Result<()> {
        if self.in_bounds(position) {
            Ok(())
        } else {
            Err(Error::PositionOutOfBounds {
                role,
                position,
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Validate grid dimensions, returning the cell count.
fn check_dimensions(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .filter(|&cells| cells > 0 && cells <= MAX_CELLS)
        .ok_or(Error::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(size: usize) -> GridWorld {
        GridWorld::open(size, size, Position::new(0, 0), Position::new(size - 1, size - 1)).unwrap()
    }

    #[test]
    fn test_start_and_goal_are_never_walls() {
        let start = Position::new(0, 0);
        let goal = Position::new(2, 2);
        let grid = GridWorld::new(3, 3, start, goal, [start, goal, Position::new(1, 1)]).unwrap();
        assert!(!grid.is_wall(start));
        assert!(!grid.is_wall(goal));
        assert!(grid.is_wall(Position::new(1, 1)));
        assert_eq!(grid.wall_count(), 1);
    }

    #[test]
    fn test_rejects_out_of_bounds_goal() {
        let err = GridWorld::open(4, 4, Position::new(0, 0), Position::new(4, 0)).unwrap_err();
        assert!(matches!(err, Error::PositionOutOfBounds { role: "goal", .. }));
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let err = GridWorld::open(0, 5, Position::new(0, 0), Position::new(0, 0)).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { width: 0, height: 5 }));
    }

    #[test]
    fn test_rejects_overflowing_dimensions() {
        let err = GridWorld::open(usize::MAX / 2 + 2, 2, Position::new(0, 0), Position::new(1, 1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { height: 2, .. }));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let err = GridWorld::open(MAX_CELLS, 2, Position::new(0, 0), Position::new(1, 1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));

        let at_limit = GridWorld::open(MAX_CELLS / 4, 4, Position::new(0, 0), Position::new(5, 3));
        assert!(at_limit.is_ok());
    }

    #[test]
    fn test_random_checks_dimensions_before_generating() {
        let err = GridWorld::random(
            usize::MAX,
            usize::MAX,
            0.2,
            Position::new(0, 0),
            Position::new(1, 1),
            Some(3),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
    }

    #[test]
    fn test_transition_rejects_invalid_action() {
        let grid = open_grid(4);
        assert!(matches!(
            grid.transition(Position::new(1, 1), 7),
            Err(Error::InvalidAction { index: 7 })
        ));
    }

    #[test]
    fn test_boundary_bump() {
        let grid = open_grid(4);
        let t = grid.step(Position::new(0, 0), Action::Up);
        assert_eq!(t.next_state, Position::new(0, 0));
        assert_eq!(t.reward, WALL_PENALTY);
        assert!(!t.terminal);

        let t = grid.step(Position::new(3, 1), Action::Right);
        assert_eq!(t.next_state, Position::new(3, 1));
        assert_eq!(t.reward, WALL_PENALTY);
    }

    #[test]
    fn test_goal_is_terminal() {
        let grid = open_grid(4);
        let t = grid.step(Position::new(3, 2), Action::Down);
        assert_eq!(t.next_state, grid.goal());
        assert_eq!(t.reward, GOAL_REWARD);
        assert!(t.terminal);
    }

    #[test]
    fn test_random_density_bounds() {
        let start = Position::new(0, 0);
        let goal = Position::new(9, 9);
        assert!(matches!(
            GridWorld::random(10, 10, 0.6, start, goal, Some(1)),
            Err(Error::InvalidWallDensity { .. })
        ));
        assert!(GridWorld::random(10, 10, -0.1, start, goal, Some(1)).is_err());

        let empty = GridWorld::random(10, 10, 0.0, start, goal, Some(1)).unwrap();
        assert_eq!(empty.wall_count(), 0);
    }

    #[test]
    fn test_random_is_reproducible() {
        let start = Position::new(0, 0);
        let goal = Position::new(9, 9);
        let a = GridWorld::random(10, 10, 0.3, start, goal, Some(7)).unwrap();
        let b = GridWorld::random(10, 10, 0.3, start, goal, Some(7)).unwrap();
        assert_eq!(a, b);
        assert!(a.wall_count() > 0);
        assert!(!a.is_wall(start) && !a.is_wall(goal));
    }

    #[test]
    fn test_walls_iterator_matches_flags() {
        let walls = [Position::new(1, 0), Position::new(0, 2)];
        let grid = GridWorld::new(3, 3, Position::new(0, 0), Position::new(2, 2), walls).unwrap();
        let listed: Vec<_> = grid.walls().collect();
        assert_eq!(listed, vec![Position::new(1, 0), Position::new(0, 2)]);
    }
}
