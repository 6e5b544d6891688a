// Export module for profiler
// Contains functionality for exporting profiling data in various formats

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::game::Game;
use crate::options::ProfileOptions;

use super::core::profile_self_play;
use super::types::{ExportFormat, ProfileResults};

/// Default artifact of a cumulative run
pub const CUMULATIVE_PROFILE_PATH: &str = "azero.cprof";
/// Default artifact of a detailed run
pub const DETAILED_PROFILE_PATH: &str = "azero.lprof";

/// Export profiling data to various formats
pub fn export_profile_data(profile_results: &ProfileResults, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Text => Ok(profile_results.report(usize::MAX).into_bytes()),
        ExportFormat::Json => serde_json::to_vec_pretty(profile_results)
            .map_err(|e| anyhow!("Failed to serialize profile data to JSON: {}", e)),
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for op in &profile_results.operations {
                writer
                    .serialize(op)
                    .with_context(|| format!("Failed to write CSV row for {}", op.name))?;
            }
            writer
                .into_inner()
                .map_err(|e| anyhow!("Failed to flush CSV output: {}", e))
        }
    }
}

/// Write profiling data to `path`, creating parent directories as needed
pub fn write_profile(profile_results: &ProfileResults, format: ExportFormat, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let data = export_profile_data(profile_results, format)?;
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create profile output {}", path.display()))?;
    file.write_all(&data)?;
    Ok(())
}

/// Load results previously written in JSON format
pub fn load_profile(path: &Path) -> Result<ProfileResults> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open profile {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse profile {}", path.display()))
}

/// Output path and format used when none are given: a text report in
/// `azero.cprof`, or JSON in `azero.lprof` for detailed runs
pub fn default_output(detailed: bool) -> (PathBuf, ExportFormat) {
    if detailed {
        (PathBuf::from(DETAILED_PROFILE_PATH), ExportFormat::Json)
    } else {
        (PathBuf::from(CUMULATIVE_PROFILE_PATH), ExportFormat::Text)
    }
}

/// Profile self-play, save the results and return the first
/// `options.top_n` lines of the report.
///
/// JSON artifacts are loaded back before rendering, so the printed report
/// is exactly what `azero report` shows for the same file.
pub fn run_profile(
    game: &dyn Game,
    options: &ProfileOptions,
    output: Option<&Path>,
    format: Option<ExportFormat>,
) -> Result<String> {
    let (default_path, default_format) = default_output(options.detailed);
    let path = output.map(Path::to_path_buf).unwrap_or(default_path);
    let format = format.unwrap_or(default_format);

    let results = profile_self_play(game, options)?;
    write_profile(&results, format, &path)?;

    let results = if format == ExportFormat::Json {
        load_profile(&path)?
    } else {
        results
    };
    Ok(results.report(options.top_n))
}
