// Core profiler implementation module

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::info;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::agent::{Agent, RandomAgent};
use crate::error::Result;
use crate::game::{Game, Player, State, Transition};
use crate::options::ProfileOptions;
use crate::play::{self_play, BatchSummary};

use super::types::{OperationStats, ProfileEvent, ProfileEventType, ProfileResults};

/// Running totals of one named operation
#[derive(Debug, Clone)]
struct OperationTotals {
    event_type: ProfileEventType,
    calls: usize,
    cumulative_ns: u64,
}

/// Thread-safe profiling event recorder.
///
/// Only open events are kept; a finished event is folded into the totals of
/// its name, so memory is bounded by the number of distinct operations.
#[derive(Debug, Clone)]
pub struct EventCollector {
    /// Events started but not yet ended
    open: Arc<Mutex<HashMap<usize, ProfileEvent>>>,
    /// Completed calls per operation name
    totals: Arc<Mutex<HashMap<String, OperationTotals>>>,
    /// Unique event ID counter
    next_id: Arc<AtomicUsize>,
    /// Whether profiling is enabled
    enabled: bool,
}

impl EventCollector {
    /// Create a new profiler
    pub fn new(enabled: bool) -> Self {
        Self {
            open: Arc::new(Mutex::new(HashMap::new())),
            totals: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicUsize::new(0)),
            enabled,
        }
    }

    /// Start a new profiling event
    pub fn start_event(&self, name: &str, event_type: ProfileEventType) -> Option<usize> {
        if !self.enabled {
            return None;
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let event = ProfileEvent {
            name: name.to_string(),
            start_time: Instant::now(),
            event_type,
        };

        if let Ok(mut open) = self.open.lock() {
            open.insert(id, event);
        }

        Some(id)
    }

    /// End a profiling event by ID and fold it into the totals
    pub fn end_event(&self, id: usize) {
        if !self.enabled {
            return;
        }

        let now = Instant::now();
        let event = match self.open.lock() {
            Ok(mut open) => open.remove(&id),
            Err(_) => None,
        };
        let Some(event) = event else {
            return;
        };

        let elapsed = now.duration_since(event.start_time).as_nanos() as u64;
        if let Ok(mut totals) = self.totals.lock() {
            let entry = totals.entry(event.name).or_insert(OperationTotals {
                event_type: event.event_type,
                calls: 0,
                cumulative_ns: 0,
            });
            entry.calls += 1;
            entry.cumulative_ns += elapsed;
        }
    }

    /// Number of events started but not yet ended
    pub fn open_events(&self) -> usize {
        self.open.lock().map(|open| open.len()).unwrap_or(0)
    }

    /// Clear all recorded events and totals
    pub fn clear(&self) {
        if let Ok(mut open) = self.open.lock() {
            open.clear();
        }
        if let Ok(mut totals) = self.totals.lock() {
            totals.clear();
        }
    }

    /// Record a complete operation with timing
    pub fn record_operation<F, T>(&self, name: &str, event_type: ProfileEventType, operation: F) -> T
    where
        F: FnOnce() -> T,
    {
        if !self.enabled {
            return operation();
        }

        let event_id = self.start_event(name, event_type);
        let result = operation();
        if let Some(id) = event_id {
            self.end_event(id);
        }
        result
    }

    /// Per-name statistics of completed events, sorted by descending
    /// cumulative time
    pub fn operation_stats(&self, total_time_ns: u64) -> Vec<OperationStats> {
        let totals = match self.totals.lock() {
            Ok(totals) => totals.clone(),
            Err(_) => HashMap::new(),
        };

        let mut stats: Vec<OperationStats> = totals
            .into_iter()
            .map(|(name, totals)| OperationStats {
                name,
                kind: totals.event_type,
                calls: totals.calls,
                cumulative_ns: totals.cumulative_ns,
                per_call_ns: totals.cumulative_ns as f64 / totals.calls as f64,
                percentage: if total_time_ns > 0 {
                    totals.cumulative_ns as f64 * 100.0 / total_time_ns as f64
                } else {
                    0.0
                },
            })
            .collect();
        stats.sort_by(|a, b| {
            b.cumulative_ns
                .cmp(&a.cumulative_ns)
                .then_with(|| a.name.cmp(&b.name))
        });
        stats
    }
}

/// A game whose operations are recorded in a collector
#[derive(Debug)]
pub struct ProfiledGame<'a> {
    inner: &'a dyn Game,
    collector: &'a EventCollector,
    detailed: bool,
}

impl<'a> ProfiledGame<'a> {
    pub fn new(inner: &'a dyn Game, collector: &'a EventCollector, detailed: bool) -> Self {
        Self {
            inner,
            collector,
            detailed,
        }
    }

    fn label(&self, operation: &str) -> String {
        if self.detailed {
            format!("{}::{}", self.inner.name(), operation)
        } else {
            operation.to_string()
        }
    }
}

impl Game for ProfiledGame<'_> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn description(&self) -> &'static str {
        self.inner.description()
    }

    fn action_count(&self) -> usize {
        self.inner.action_count()
    }

    fn start(&self, rng: &mut dyn RngCore) -> State {
        self.collector
            .record_operation(&self.label("start"), ProfileEventType::Start, || self.inner.start(rng))
    }

    fn valid(&self, state: &State) -> Result<Vec<bool>> {
        self.collector
            .record_operation(&self.label("valid"), ProfileEventType::Valid, || self.inner.valid(state))
    }

    fn step(&self, state: &State, action: usize) -> Result<Transition> {
        let label = if self.detailed {
            format!("{}::step[{}]", self.inner.name(), action)
        } else {
            self.label("step")
        };
        self.collector
            .record_operation(&label, ProfileEventType::Step, || self.inner.step(state, action))
    }

    fn human(&self, state: &State) -> String {
        self.inner.human(state)
    }
}

/// An agent whose decisions are recorded in a collector
pub struct ProfiledAgent<'a, A> {
    inner: A,
    collector: &'a EventCollector,
    label: String,
}

impl<'a, A: Agent> ProfiledAgent<'a, A> {
    pub fn new(inner: A, collector: &'a EventCollector, label: impl Into<String>) -> Self {
        Self {
            inner,
            collector,
            label: label.into(),
        }
    }
}

impl<A: Agent> Agent for ProfiledAgent<'_, A> {
    fn act(&mut self, game: &dyn Game, state: &State, player: Player, rng: &mut dyn RngCore) -> Result<usize> {
        let inner = &mut self.inner;
        self.collector
            .record_operation(&self.label, ProfileEventType::Act, || inner.act(game, state, player, rng))
    }
}

/// Profile `options.episodes` episodes of random self-play.
///
/// Episodes run one after another so the timings are not skewed by
/// contention; episode `i` is seeded with `seed + i` as in batch self-play.
pub fn profile_self_play(game: &dyn Game, options: &ProfileOptions) -> Result<ProfileResults> {
    let collector = EventCollector::new(true);
    let profiled = ProfiledGame::new(game, &collector, options.detailed);
    let prefix = if options.detailed {
        format!("{}::", game.name())
    } else {
        String::new()
    };

    let mut first = ProfiledAgent::new(RandomAgent, &collector, format!("{}act[first]", prefix));
    let mut second = ProfiledAgent::new(RandomAgent, &collector, format!("{}act[second]", prefix));
    let episode_label = format!("{}episode", prefix);

    let run_start = Instant::now();
    let mut records = Vec::with_capacity(options.episodes);
    for i in 0..options.episodes {
        let mut rng = StdRng::seed_from_u64(options.play.seed.wrapping_add(i as u64));
        let record = collector.record_operation(&episode_label, ProfileEventType::Episode, || {
            self_play(&profiled, [&mut first, &mut second], &options.play, &mut rng)
        })?;
        records.push(record);
    }
    let total_time_ns = run_start.elapsed().as_nanos() as u64;

    let results = ProfileResults {
        game: game.name().to_string(),
        detailed: options.detailed,
        total_time_ns,
        operations: collector.operation_stats(total_time_ns),
        summary: BatchSummary::from_records(&records),
    };
    info!(
        "Profiled {} episodes of {} in {:.3} ms",
        options.episodes,
        game.name(),
        total_time_ns as f64 / 1_000_000.0
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::Count;

    #[test]
    fn test_disabled_collector_records_nothing() {
        let collector = EventCollector::new(false);
        let value = collector.record_operation("noop", ProfileEventType::Step, || 7);
        assert_eq!(value, 7);
        assert!(collector.operation_stats(1).is_empty());
    }

    #[test]
    fn test_operation_stats_group_by_name() {
        let collector = EventCollector::new(true);
        for _ in 0..3 {
            collector.record_operation("step", ProfileEventType::Step, || ());
        }
        collector.record_operation("valid", ProfileEventType::Valid, || ());

        let stats = collector.operation_stats(0);
        assert_eq!(stats.len(), 2);
        let step = stats.iter().find(|s| s.name == "step").unwrap();
        assert_eq!(step.calls, 3);
        assert_eq!(step.kind, ProfileEventType::Step);
        assert_eq!(step.percentage, 0.0);
    }

    #[test]
    fn test_finished_events_are_not_retained() {
        let collector = EventCollector::new(true);
        for _ in 0..1_000 {
            collector.record_operation("step", ProfileEventType::Step, || ());
        }
        assert_eq!(collector.open_events(), 0);
        assert_eq!(collector.operation_stats(1)[0].calls, 1_000);

        collector.clear();
        assert!(collector.operation_stats(1).is_empty());
    }

    #[test]
    fn test_unfinished_events_are_ignored() {
        let collector = EventCollector::new(true);
        collector.start_event("open", ProfileEventType::Episode);
        assert_eq!(collector.open_events(), 1);
        assert!(collector.operation_stats(1).is_empty());
    }

    #[test]
    fn test_profiled_game_records_each_call() {
        let collector = EventCollector::new(true);
        let game = ProfiledGame::new(&Count, &collector, false);
        let state = State::new(vec![0]);
        game.valid(&state).unwrap();
        game.step(&state, 1).unwrap();

        let mut kinds: Vec<(String, ProfileEventType)> = collector
            .operation_stats(0)
            .into_iter()
            .map(|op| (op.name, op.kind))
            .collect();
        kinds.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            kinds,
            vec![
                ("step".to_string(), ProfileEventType::Step),
                ("valid".to_string(), ProfileEventType::Valid),
            ]
        );
    }
}
