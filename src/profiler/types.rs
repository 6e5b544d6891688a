// Types module for profiler
// Contains data structure definitions for profile events and results

use std::fmt::Write as _;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::play::BatchSummary;

/// Profile event type for distinguishing different operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProfileEventType {
    /// A whole self-play episode
    Episode,
    /// Building a start state
    Start,
    /// Computing valid actions
    Valid,
    /// Applying an action
    Step,
    /// An agent choosing an action
    Act,
}

/// A profiling event that has started but not yet ended
#[derive(Debug, Clone)]
pub struct ProfileEvent {
    /// Event name
    pub name: String,
    /// Start time of the event
    pub start_time: Instant,
    /// Type of the event
    pub event_type: ProfileEventType,
}

/// Cumulative timing of one named operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationStats {
    /// Operation name
    pub name: String,
    /// Kind of operation the name was recorded for
    pub kind: ProfileEventType,
    /// Number of completed calls
    pub calls: usize,
    /// Total time including nested operations, in nanoseconds
    pub cumulative_ns: u64,
    /// Mean time per call in nanoseconds
    pub per_call_ns: f64,
    /// Share of the profiled wall time, in percent
    pub percentage: f64,
}

/// Results of a profiling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResults {
    /// Profiled game
    pub game: String,
    /// Whether operations were attributed per game and action
    pub detailed: bool,
    /// Wall time of the whole run in nanoseconds
    pub total_time_ns: u64,
    /// Operations sorted by descending cumulative time
    pub operations: Vec<OperationStats>,
    /// Outcomes of the profiled episodes
    pub summary: BatchSummary,
}

impl ProfileResults {
    /// Look up the statistics of an operation by name
    pub fn operation(&self, name: &str) -> Option<&OperationStats> {
        self.operations.iter().find(|op| op.name == name)
    }

    /// Render the cumulative-time report, truncated to its first `limit` lines
    pub fn report(&self, limit: usize) -> String {
        let mut text = String::new();
        let _ = writeln!(
            text,
            "{} episodes of {} in {:.3} ms",
            self.summary.episodes,
            self.game,
            self.total_time_ns as f64 / 1_000_000.0
        );
        let _ = writeln!(
            text,
            "first player: {} won, {} drawn, {} lost; mean length {:.2}",
            self.summary.first_wins, self.summary.draws, self.summary.first_losses, self.summary.mean_length
        );
        let _ = writeln!(text);
        let _ = writeln!(text, "Ordered by: cumulative time");
        let _ = writeln!(text);
        let _ = writeln!(
            text,
            "{:>10} {:>14} {:>14} {:>8}  {:<8} {}",
            "ncalls", "cumtime(ms)", "percall(us)", "%", "kind", "operation"
        );
        for op in &self.operations {
            let _ = writeln!(
                text,
                "{:>10} {:>14.3} {:>14.3} {:>7.2}%  {:<8} {}",
                op.calls,
                op.cumulative_ns as f64 / 1_000_000.0,
                op.per_call_ns / 1_000.0,
                op.percentage,
                op.kind.to_string(),
                op.name
            );
        }

        text.lines()
            .take(limit)
            .map(|line| format!("{}\n", line))
            .collect()
    }
}

/// Export formats for profile results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    /// Cumulative-time text report
    Text,
    /// JSON document, loadable again with `load_profile`
    Json,
    /// One CSV row per operation
    Csv,
}
