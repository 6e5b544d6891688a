pub mod error;
pub mod game;
pub mod games;
pub mod memo;
pub mod registry;
pub mod util;
pub mod agent;
pub mod options;
pub mod play;
pub mod profiler;

// Re-export commonly used types
pub use error::{Error, Result};
pub use game::{Game, Outcome, Player, State, Transition};
pub use memo::{CacheStats, Memoized};
pub use registry::{GameKind, GameRegistry};
pub use agent::{Agent, HumanAgent, PolicyAgent, RandomAgent};
pub use options::{PlayOptions, ProfileOptions};
pub use play::{play_interactive, self_play, self_play_batch, BatchSummary, GameRecord, Move, TrainingExample};
pub use profiler::{profile_self_play, ExportFormat, ProfileResults};
