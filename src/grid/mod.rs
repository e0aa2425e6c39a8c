//! Grid world environment
//!
//! A fixed-size grid with walls, a start cell and a goal cell, exposed as a
//! deterministic Markov decision process through [`GridWorld::transition`].

pub mod layout;
pub mod render;
pub mod world;

pub use layout::{load_grid_file, parse_rows};
pub use world::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, GOAL_REWARD, GridWorld, MAX_CELLS, STEP_COST, Transition,
    WALL_PENALTY,
};
