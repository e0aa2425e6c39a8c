//! Text layouts for grid worlds
//!
//! A layout is `height` rows of `width` characters, `.` for an empty cell and
//! `#` for a wall.

use std::path::Path;

use crate::{
    error::{Error, Result},
    types::Position,
};

const EMPTY: char = '.';
const WALL: char = '#';

/// Parse layout rows into the list of wall cells.
///
/// # Errors
///
/// Returns an error on a wrong row count, a wrong row length, or any
/// character other than `.` and `#`.
pub fn parse_rows<S: AsRef<str>>(width: usize, height: usize, rows: &[S]) -> Result<Vec<Position>> {
    if rows.len() != height {
        return Err(Error::RowCountMismatch {
            expected: height,
            got: rows.len(),
        });
    }

    let mut walls = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let len = row.chars().count();
        if len != width {
            return Err(Error::RowLengthMismatch {
                row: y,
                expected: width,
                got: len,
            });
        }

        for (x, ch) in row.chars().enumerate() {
            match ch {
                EMPTY => {}
                WALL => walls.push(Position::new(x, y)),
                other => {
                    return Err(Error::InvalidCellCharacter {
                        character: other,
                        row: y,
                        column: x,
                    });
                }
            }
        }
    }

    Ok(walls)
}

/// Load and validate layout rows from a text file.
///
/// Lines are trimmed and blank lines are skipped before validation.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file can't be read, or the same validation
/// errors as [`parse_rows`].
pub fn load_grid_file<P: AsRef<Path>>(path: P, width: usize, height: usize) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("read grid file {}", path.display()), e))?;

    let rows: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    parse_rows(width, height, &rows)?;
    Ok(rows)
}
