// Profiler module
//
// Times game operations during self-play and reports cumulative time per
// operation, the way a cumulative-time profiler reports per function.

mod types;
mod core;
mod export;

// Re-export public API
pub use types::{
    ProfileEventType, ProfileEvent, ProfileResults, OperationStats, ExportFormat,
};
pub use core::{EventCollector, ProfiledGame, ProfiledAgent, profile_self_play};
pub use export::{
    export_profile_data, write_profile, load_profile, run_profile, default_output,
    CUMULATIVE_PROFILE_PATH, DETAILED_PROFILE_PATH,
};
