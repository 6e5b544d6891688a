use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simple_logger::SimpleLogger;

use azero::profiler::{load_profile, run_profile};
use azero::{
    play_interactive, self_play_batch, BatchSummary, ExportFormat, GameRegistry, PlayOptions,
    ProfileOptions,
};

#[derive(Debug, Parser)]
#[clap(name = "azero", version, about = "Self-play games for AlphaZero-style agents")]
struct Cli {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser)]
struct GlobalOpts {
    /// Enable debug logging
    #[clap(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[clap(about = "List the available games")]
    List,
    #[clap(arg_required_else_help = true, about = "Play a game at the console")]
    Play {
        game: String,
        #[clap(long, default_value_t = 0)]
        seed: u64,
    },
    #[clap(arg_required_else_help = true, about = "Run random self-play episodes")]
    SelfPlay {
        game: String,
        #[clap(short = 'n', long, default_value_t = 100)]
        episodes: usize,
        #[clap(long)]
        seed: Option<u64>,
        #[clap(long)]
        max_moves: Option<usize>,
        /// JSON file with play options
        #[clap(long)]
        config: Option<PathBuf>,
        /// Write the game records as JSON
        #[clap(short = 'o', long)]
        output: Option<PathBuf>,
    },
    #[clap(arg_required_else_help = true, about = "Profile self-play and report cumulative time per operation")]
    Profile {
        game: String,
        #[clap(short = 'n', long)]
        episodes: Option<usize>,
        #[clap(long)]
        seed: Option<u64>,
        /// Number of report lines to print
        #[clap(long)]
        top: Option<usize>,
        /// Attribute time per game and per action
        #[clap(long)]
        detailed: bool,
        /// JSON file with profile options
        #[clap(long)]
        config: Option<PathBuf>,
        /// Output file (azero.cprof, or azero.lprof with --detailed)
        #[clap(short = 'o', long)]
        output: Option<PathBuf>,
        /// Output format: text, json or csv
        #[clap(long, value_parser = ExportFormat::from_str)]
        format: Option<ExportFormat>,
    },
    #[clap(arg_required_else_help = true, about = "Render a saved JSON profile")]
    Report {
        path: PathBuf,
        #[clap(long, default_value_t = 40)]
        top: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.global_opts.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    let registry = GameRegistry::with_builtin_games()?;

    match cli.command {
        Commands::List => {
            for name in registry.names() {
                let game = registry.get(name)?;
                println!("{:<20} {}", name, game.description());
            }
        }
        Commands::Play { game, seed } => {
            let game = registry.get(&game)?;
            let mut rng = StdRng::seed_from_u64(seed);
            let stdin = io::stdin();
            play_interactive(game.as_ref(), stdin.lock(), io::stdout(), &mut rng)?;
        }
        Commands::SelfPlay {
            game,
            episodes,
            seed,
            max_moves,
            config,
            output,
        } => {
            let game = registry.get(&game)?;
            let mut options = match config {
                Some(path) => PlayOptions::from_json_file(&path)
                    .with_context(|| format!("Failed to load play options from {}", path.display()))?,
                None => PlayOptions::new(),
            };
            if let Some(seed) = seed {
                options = options.set_seed(seed);
            }
            if let Some(max_moves) = max_moves {
                options = options.set_max_moves(max_moves);
            }

            let records = self_play_batch(game.as_ref(), episodes, &options)?;
            let summary = BatchSummary::from_records(&records);
            println!("{}", serde_json::to_string_pretty(&summary)?);

            if let Some(path) = output {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                serde_json::to_writer(BufWriter::new(file), &records)?;
            }
        }
        Commands::Profile {
            game,
            episodes,
            seed,
            top,
            detailed,
            config,
            output,
            format,
        } => {
            let game = registry.get(&game)?;
            let mut options = match config {
                Some(path) => ProfileOptions::from_json_file(&path)
                    .with_context(|| format!("Failed to load profile options from {}", path.display()))?,
                None => ProfileOptions::new(),
            };
            if let Some(episodes) = episodes {
                options = options.set_episodes(episodes);
            }
            if let Some(seed) = seed {
                let play = options.play.clone().set_seed(seed);
                options = options.set_play_options(play);
            }
            if let Some(top) = top {
                options = options.set_top_n(top);
            }
            if detailed {
                options = options.enable_detailed(true);
            }

            let report = run_profile(game.as_ref(), &options, output.as_deref(), format)?;
            print!("{}", report);
        }
        Commands::Report { path, top } => {
            let results = load_profile(&path)?;
            print!("{}", results.report(top));
        }
    }

    Ok(())
}
