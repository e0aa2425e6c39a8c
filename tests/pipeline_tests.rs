//! Tests for the training pipeline, observers and simulation driver

mod common;

use common::{open_grid, sealed_goal};
use gridpath::{
    AgentConfig, Error, Position, QLearningPathfinder,
    pipeline::{
        EpisodeRecord, JsonlObserver, MetricsObserver, Observer, SimulationConfig, TrainingConfig,
        TrainingPipeline, run_simulation, run_simulation_with_observers,
    },
};

#[test]
fn test_pipeline_matches_plain_training() {
    let grid = open_grid(5);
    let config = AgentConfig::default().with_seed(17);

    let mut plain = QLearningPathfinder::new(&grid, &config).unwrap();
    let expected = plain.train(150, 80);

    let mut observed = QLearningPathfinder::new(&grid, &config).unwrap();
    let mut metrics = MetricsObserver::new();
    let stats = TrainingPipeline::new(TrainingConfig {
        episodes: 150,
        max_steps: 80,
    })
    .with_observer(Box::new(&mut metrics))
    .run(&mut observed)
    .unwrap();

    assert_eq!(stats, expected);
    assert_eq!(plain.q_table(), observed.q_table());

    let summary = metrics.summary();
    assert_eq!(summary.episodes, 150);
    assert_eq!(summary.solved_episodes, stats.solved_episodes);
    assert_eq!(summary.final_epsilon, Some(observed.epsilon()));
    assert!(summary.avg_solved_steps.unwrap() >= 8.0);
}

#[test]
fn test_metrics_observer_on_unsolvable_grid() {
    let grid = sealed_goal();
    let mut agent = QLearningPathfinder::new(&grid, &AgentConfig::default().with_seed(4)).unwrap();
    let mut metrics = MetricsObserver::new();

    TrainingPipeline::new(TrainingConfig {
        episodes: 20,
        max_steps: 15,
    })
    .with_observer(Box::new(&mut metrics))
    .run(&mut agent)
    .unwrap();

    assert_eq!(metrics.solve_rate(), 0.0);
    assert_eq!(metrics.avg_solved_steps(), None);
    assert!(metrics.avg_reward() <= -15.0);
}

#[test]
fn test_jsonl_observer_writes_one_line_per_episode() {
    let tmp = tempfile::tempdir().unwrap();
    let log_path = tmp.path().join("episodes.jsonl");

    let grid = open_grid(4);
    let mut agent = QLearningPathfinder::new(&grid, &AgentConfig::default().with_seed(8)).unwrap();
    TrainingPipeline::new(TrainingConfig {
        episodes: 25,
        max_steps: 40,
    })
    .with_observer(Box::new(JsonlObserver::create(&log_path).unwrap()))
    .run(&mut agent)
    .unwrap();

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let records: Vec<EpisodeRecord> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 25);
    for (idx, record) in records.iter().enumerate() {
        assert_eq!(record.episode, idx);
        assert!(record.steps <= 40);
    }
    assert!(records.windows(2).all(|w| w[1].epsilon <= w[0].epsilon));
}

#[test]
fn test_run_simulation_on_layout_file() {
    let tmp = tempfile::tempdir().unwrap();
    let grid_path = tmp.path().join("grid.txt");
    std::fs::write(&grid_path, "......\n.####.\n......\n......\n.####.\n......\n").unwrap();

    let config = SimulationConfig {
        width: 6,
        height: 6,
        episodes: 800,
        max_steps: 150,
        seed: Some(21),
        grid_file: Some(grid_path),
        ..SimulationConfig::default()
    };

    let result = run_simulation(&config).unwrap();
    assert_eq!(result.stats.episodes, 800);
    assert!(result.solved);
    assert_eq!(result.path_length, result.path.len() - 1);
    assert_eq!(result.path.first(), Some(&Position::new(0, 0)));
    assert_eq!(result.path.last(), Some(&Position::new(5, 5)));

    let rows: Vec<&str> = result.rendered_grid.lines().collect();
    assert_eq!(rows.len(), 6);
    assert!(rows[0].starts_with('S'));
    assert!(rows[5].ends_with('G'));
    assert_eq!(rows[1].matches('#').count(), 4);
    assert_eq!(
        result.rendered_grid.matches('*').count(),
        result.path.len() - 2
    );
}

#[test]
fn test_run_simulation_is_reproducible() {
    let config = SimulationConfig {
        width: 8,
        height: 8,
        episodes: 300,
        max_steps: 100,
        wall_density: 0.25,
        seed: Some(5),
        ..SimulationConfig::default()
    };

    let first = run_simulation(&config).unwrap();
    let observers: Vec<Box<dyn Observer>> = vec![Box::new(MetricsObserver::new())];
    let second = run_simulation_with_observers(&config, observers).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_run_simulation_rejects_bad_density() {
    let config = SimulationConfig {
        wall_density: 0.75,
        ..SimulationConfig::default()
    };
    assert!(matches!(
        run_simulation(&config),
        Err(Error::InvalidWallDensity { .. })
    ));
}

#[test]
fn test_run_simulation_rejects_bad_hyperparameters() {
    let config = SimulationConfig {
        width: 4,
        height: 4,
        agent: AgentConfig::default().with_discount_factor(1.5),
        ..SimulationConfig::default()
    };
    assert!(matches!(
        run_simulation(&config),
        Err(Error::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_simulation_config_load_fills_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("sim.json");
    std::fs::write(
        &path,
        r#"{ "width": 10, "height": 12, "seed": 3, "agent": { "learning_rate": 0.25 } }"#,
    )
    .unwrap();

    let config = SimulationConfig::load(&path).unwrap();
    assert_eq!(config.width, 10);
    assert_eq!(config.height, 12);
    assert_eq!(config.goal(), Position::new(9, 11));
    assert_eq!(config.episodes, 2500);
    assert_eq!(config.agent.learning_rate, 0.25);
    assert_eq!(config.agent.discount_factor, 0.95);
}

#[test]
fn test_simulation_config_load_missing_file() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(matches!(
        SimulationConfig::load(tmp.path().join("missing.json")),
        Err(Error::Io { .. })
    ));
}
