//! Duel Pong - headless match runner
//!
//! Plays one match at the fixed tick rate with no human input and prints the
//! final frame as JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use duel_pong::consts::SIM_DT;
use duel_pong::{Driver, EngineError, MatchConfig, MatchSettings, TickInput};

#[derive(Parser)]
#[command(name = "duel-pong")]
#[command(about = "Run a headless two-paddle match and print the final frame")]
struct Args {
    /// Match mode: ai-vs-ai, ai-vs-human or human-vs-human
    #[arg(short, long, default_value = "ai-vs-ai")]
    mode: String,

    /// RNG seed (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON settings file; missing fields use the defaults
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Give up after this many display frames
    #[arg(long, default_value_t = 1_000_000)]
    max_frames: u64,

    /// Pretty-print the final frame
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            if e.is_config_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(args: &Args) -> Result<(), EngineError> {
    let config: MatchConfig = args.mode.parse()?;
    let settings = match &args.settings {
        Some(path) => MatchSettings::load(path)?,
        None => MatchSettings::default(),
    };
    let seed = args.seed.unwrap_or_else(clock_seed);

    log::info!("Duel Pong (headless) starting: {}", config.mode_name());
    let mut driver = Driver::start(config, settings, seed)?;
    let input = TickInput::default();

    let mut frames = 0;
    let mut announced = None;
    while frames < args.max_frames && announced.is_none() {
        let out = driver.frame(SIM_DT, &input);
        announced = out.announcement;
        frames += 1;
    }

    match announced {
        Some(winner) => {
            let snapshot = driver.snapshot();
            println!("{} wins!", snapshot.label(winner));
        }
        None => log::warn!("No winner after {} frames", frames),
    }

    let snapshot = driver.snapshot();
    let json = if args.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");
    log::info!("Seed {} finished after {} frames", seed, frames);
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
