//! Output formatting for CLI

use crate::q_learning::TrainingStats;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print training statistics
pub fn print_training_stats(stats: &TrainingStats) {
    print_kv("Episodes", &format_number(stats.episodes));
    print_kv(
        "Solved episodes",
        &format!(
            "{} ({:.1}%)",
            format_number(stats.solved_episodes),
            stats.solve_rate() * 100.0
        ),
    );
    print_kv(
        "Best steps",
        &stats
            .best_steps
            .map_or_else(|| "none".to_string(), |steps| steps.to_string()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(2500), "2,500");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}
