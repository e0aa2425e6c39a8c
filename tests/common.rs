//! Common grid fixtures for the gridpath test suite.
#![allow(dead_code)]

use gridpath::{GridWorld, Position};

/// Square grid without walls, start top-left, goal bottom-right.
pub fn open_grid(size: usize) -> GridWorld {
    GridWorld::open(size, size, Position::new(0, 0), Position::new(size - 1, size - 1))
        .expect("open grid")
}

/// 6x6 serpentine maze with a single corridor from (0,0) to (5,5).
pub fn serpentine_maze() -> GridWorld {
    let rows = [
        "......", //
        "#####.", //
        "......", //
        ".#####", //
        "......", //
        "......",
    ];
    GridWorld::from_rows(6, 6, &rows, Position::new(0, 0), Position::new(5, 5)).expect("maze")
}

/// 5x5 grid whose goal cell is sealed off by walls.
pub fn sealed_goal() -> GridWorld {
    let rows = [
        ".....", //
        ".....", //
        ".....", //
        "....#", //
        "...#.",
    ];
    GridWorld::from_rows(5, 5, &rows, Position::new(0, 0), Position::new(4, 4)).expect("sealed")
}
