//! Subcommands of the gridpath CLI

pub mod grid;
pub mod train;

use anyhow::{Result, bail};

use crate::types::Position;

/// Convert a two-value `X Y` argument into a position
pub(crate) fn parse_position(values: &[usize], flag: &str) -> Result<Position> {
    match values {
        [x, y] => Ok(Position::new(*x, *y)),
        other => bail!("{flag} expects two values X Y, got {}", other.len()),
    }
}
