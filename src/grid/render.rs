//! ASCII rendering of grid worlds

use std::collections::HashSet;

use super::GridWorld;
use crate::types::Position;

impl GridWorld {
    /// Render the grid as text, one line per row.
    ///
    /// Cell precedence: `S` start, `G` goal, `A` agent, `*` path, `#` wall,
    /// `.` empty.
    pub fn render(&self, path: Option<&[Position]>, agent: Option<Position>) -> String {
        let on_path: HashSet<Position> = path.unwrap_or_default().iter().copied().collect();

        let mut rows = Vec::with_capacity(self.height());
        for y in 0..self.height() {
            let row: String = (0..self.width())
                .map(|x| {
                    let cell = Position::new(x, y);
                    if cell == self.start() {
                        'S'
                    } else if cell == self.goal() {
                        'G'
                    } else if agent == Some(cell) {
                        'A'
                    } else if on_path.contains(&cell) {
                        '*'
                    } else if self.is_wall(cell) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            rows.push(row);
        }
        rows.join("\n")
    }
}
