//! Train command - Train a Q-learning agent on a grid and show its path

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use super::parse_position;
use crate::{
    cli::output::{print_kv, print_section, print_training_stats},
    pipeline::{
        JsonlObserver, Observer, PathfindingResult, ProgressObserver, SimulationConfig,
        run_simulation_with_observers,
    },
    q_learning::TrainingStats,
    types::Position,
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    training: &'a TrainingStats,
    solved: bool,
    path_length: usize,
    path: &'a [Position],
    config: &'a SimulationConfig,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent on a grid", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Number of training episodes [default: 2500]
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Step budget per episode and for the final path [default: 400]
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Wall density for generated grids, in [0.0, 0.6) [default: 0.2]
    #[arg(long)]
    pub wall_density: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Grid width [default: 20]
    #[arg(long)]
    pub width: Option<usize>,

    /// Grid height [default: 20]
    #[arg(long)]
    pub height: Option<usize>,

    /// Start cell [default: 0 0]
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pub start: Option<Vec<usize>>,

    /// Goal cell [default: bottom-right corner]
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pub goal: Option<Vec<usize>>,

    /// Learning rate α [default: 0.1]
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor γ [default: 0.95]
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Initial exploration rate [default: 1.0]
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Exploration decay per episode [default: 0.995]
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Exploration floor [default: 0.05]
    #[arg(long)]
    pub min_epsilon: Option<f64>,

    /// Grid layout file using '.' for empty cells and '#' for walls
    #[arg(long)]
    pub grid_file: Option<PathBuf>,

    /// JSON simulation config; explicit flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Optional file for JSONL episode observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl TrainArgs {
    /// Merge the config file (if any) with explicit flags
    pub fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(episodes) = self.episodes {
            config.episodes = episodes;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if let Some(wall_density) = self.wall_density {
            config.wall_density = wall_density;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(start) = &self.start {
            config.start = parse_position(start, "--start")?;
        }
        if let Some(goal) = &self.goal {
            config.goal = Some(parse_position(goal, "--goal")?);
        }
        if let Some(alpha) = self.alpha {
            config.agent.learning_rate = alpha;
        }
        if let Some(gamma) = self.gamma {
            config.agent.discount_factor = gamma;
        }
        if let Some(epsilon) = self.epsilon {
            config.agent.epsilon = epsilon;
        }
        if let Some(epsilon_decay) = self.epsilon_decay {
            config.agent.epsilon_decay = epsilon_decay;
        }
        if let Some(min_epsilon) = self.min_epsilon {
            config.agent.min_epsilon = min_epsilon;
        }
        if let Some(grid_file) = &self.grid_file {
            config.grid_file = Some(grid_file.clone());
        }

        Ok(config)
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.simulation_config()?;

    let mut observers: Vec<Box<dyn Observer>> = Vec::new();
    if !args.no_progress {
        observers.push(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        observers.push(Box::new(JsonlObserver::create(path)?));
    }

    let result = run_simulation_with_observers(&config, observers)?;
    print_result(&result);

    if let Some(raw) = &args.summary {
        let summary_path = sanitize_summary_path(raw);
        if let Some(parent) = summary_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let summary = TrainingSummaryFile {
            training: &result.stats,
            solved: result.solved,
            path_length: result.path_length,
            path: &result.path,
            config: &config,
        };
        let file = File::create(&summary_path)
            .with_context(|| format!("failed to create {}", summary_path.display()))?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}

fn print_result(result: &PathfindingResult) {
    println!("{}", result.rendered_grid);

    print_section("Result");
    print_kv("Solved", &result.solved.to_string());
    print_kv("Path length", &result.path_length.to_string());

    print_section("Training");
    print_training_stats(&result.stats);
}
