//! Transition model properties of the grid world

mod common;

use common::open_grid;
use gridpath::{
    Action, Error, GridWorld, Position,
    grid::{GOAL_REWARD, STEP_COST, WALL_PENALTY},
};

#[test]
fn test_unblocked_moves_shift_one_coordinate() {
    let grid = GridWorld::random(
        12,
        12,
        0.3,
        Position::new(0, 0),
        Position::new(11, 11),
        Some(2024),
    )
    .unwrap();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let state = Position::new(x, y);
            if grid.is_wall(state) {
                continue;
            }
            for action in Action::ALL {
                let t = grid.step(state, action);
                let candidate = state
                    .offset(action.delta())
                    .filter(|&c| grid.in_bounds(c) && !grid.is_wall(c));

                match candidate {
                    Some(expected) => {
                        assert_eq!(t.next_state, expected);
                        assert_eq!(t.next_state.manhattan(state), 1);
                        if expected == grid.goal() {
                            assert_eq!(t.reward, GOAL_REWARD);
                            assert!(t.terminal);
                        } else {
                            assert_eq!(t.reward, STEP_COST);
                            assert!(!t.terminal);
                        }
                    }
                    None => {
                        assert_eq!(t.next_state, state);
                        assert_eq!(t.reward, WALL_PENALTY);
                        assert!(!t.terminal);
                    }
                }
            }
        }
    }
}

#[test]
fn test_wall_next_to_start_is_a_deterministic_bump() {
    let start = Position::new(3, 3);
    let wall = Position::new(4, 3);
    let grid = GridWorld::new(8, 8, start, Position::new(7, 7), [wall]).unwrap();

    for _ in 0..10 {
        let t = grid.transition(start, Action::Right.index()).unwrap();
        assert_eq!(t.next_state, start);
        assert_eq!(t.reward, -5.0);
        assert!(!t.terminal);
    }

    let t = grid.transition(start, Action::Left.index()).unwrap();
    assert_eq!(t.next_state, Position::new(2, 3));
    assert_eq!(t.reward, -1.0);
}

#[test]
fn test_goal_reached_from_every_direction() {
    let goal = Position::new(2, 2);
    let grid = GridWorld::open(5, 5, Position::new(0, 0), goal).unwrap();

    let approaches = [
        (Position::new(2, 3), Action::Up),
        (Position::new(2, 1), Action::Down),
        (Position::new(3, 2), Action::Left),
        (Position::new(1, 2), Action::Right),
    ];
    for (from, action) in approaches {
        let t = grid.step(from, action);
        assert_eq!(t.next_state, goal);
        assert_eq!(t.reward, 50.0);
        assert!(t.terminal);
    }
}

#[test]
fn test_transition_rejects_out_of_range_index() {
    let grid = open_grid(4);
    for index in [4, 5, usize::MAX] {
        assert!(matches!(
            grid.transition(Position::new(1, 1), index),
            Err(Error::InvalidAction { .. })
        ));
    }
}

#[test]
fn test_transition_index_matches_typed_step() {
    let grid = open_grid(5);
    let state = Position::new(2, 2);
    for action in Action::ALL {
        assert_eq!(
            grid.transition(state, action.index()).unwrap(),
            grid.step(state, action)
        );
    }
}

#[test]
fn test_construction_errors() {
    let start = Position::new(0, 0);

    assert!(matches!(
        GridWorld::open(5, 5, Position::new(5, 0), Position::new(4, 4)),
        Err(Error::PositionOutOfBounds { role: "start", .. })
    ));
    assert!(matches!(
        GridWorld::from_rows(3, 3, &["...", "..."], start, Position::new(2, 2)),
        Err(Error::RowCountMismatch { .. })
    ));
    assert!(matches!(
        GridWorld::from_rows(3, 2, &["...", ".."], start, Position::new(2, 1)),
        Err(Error::RowLengthMismatch { row: 1, .. })
    ));
    assert!(matches!(
        GridWorld::from_rows(3, 1, &["..G"], start, Position::new(2, 0)),
        Err(Error::InvalidCellCharacter { character: 'G', .. })
    ));
}

#[test]
fn test_layout_walls_on_start_and_goal_are_cleared() {
    let grid = GridWorld::from_rows(
        3,
        2,
        &["#.#", "..#"],
        Position::new(0, 0),
        Position::new(2, 1),
    )
    .unwrap();
    assert!(!grid.is_wall(Position::new(0, 0)));
    assert!(!grid.is_wall(Position::new(2, 1)));
    assert!(grid.is_wall(Position::new(2, 0)));
    assert_eq!(grid.wall_count(), 1);
}
