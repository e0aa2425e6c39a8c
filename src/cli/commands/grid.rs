//! Grid command - Build and print a grid layout without training

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::parse_position;
use crate::{
    cli::output::print_kv,
    grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH, GridWorld, load_grid_file},
    types::Position,
};

#[derive(Parser, Debug)]
#[command(about = "Generate or validate a grid layout", allow_negative_numbers = true)]
pub struct GridArgs {
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Wall density for generated grids, in [0.0, 0.6)
    #[arg(long, default_value_t = 0.2)]
    pub wall_density: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start cell [default: 0 0]
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pub start: Option<Vec<usize>>,

    /// Goal cell [default: bottom-right corner]
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pub goal: Option<Vec<usize>>,

    /// Grid layout file to validate and render instead of generating one
    #[arg(long)]
    pub grid_file: Option<PathBuf>,
}

impl GridArgs {
    pub fn build(&self) -> Result<GridWorld> {
        let start = match &self.start {
            Some(values) => parse_position(values, "--start")?,
            None => Position::new(0, 0),
        };
        let goal = match &self.goal {
            Some(values) => parse_position(values, "--goal")?,
            None => Position::new(
                self.width.saturating_sub(1),
                self.height.saturating_sub(1),
            ),
        };

        let grid = match &self.grid_file {
            Some(path) => {
                let rows = load_grid_file(path, self.width, self.height)?;
                GridWorld::from_rows(self.width, self.height, &rows, start, goal)?
            }
            None => GridWorld::random(
                self.width,
                self.height,
                self.wall_density,
                start,
                goal,
                self.seed,
            )?,
        };
        Ok(grid)
    }
}

pub fn execute(args: GridArgs) -> Result<()> {
    let grid = args.build()?;
    println!("{}", grid.render(None, None));
    println!();
    print_kv("Size", &format!("{}x{}", grid.width(), grid.height()));
    print_kv("Walls", &grid.wall_count().to_string());
    print_kv("Start", &grid.start().to_string());
    print_kv("Goal", &grid.goal().to_string());
    Ok(())
}
