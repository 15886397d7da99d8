//! Headless simulation runner (default binary).
//!
//! Drives the engine with fixed 16 ms frames and lets the greedy planner play
//! until the game ends or the frame budget runs out, then prints the final
//! snapshot as JSON.
//!
//! ```text
//! blockfall [--seed <u64>] [--frames <u32>] [--config <path>] [--verbose]
//! ```

use std::fs;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

use blockfall::autoplay::{apply_place, plan_placement};
use blockfall::core::{EngineConfig, GameEngine};
use blockfall::types::FRAME_MS;

/// Frames between two placements, so gravity gets a say
const FRAMES_PER_MOVE: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunArgs {
    seed: Option<u64>,
    frames: u32,
    config_path: Option<String>,
    verbose: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            seed: None,
            frames: 60 * 60 * 5,
            config_path: None,
            verbose: false,
        }
    }
}

fn parse_args(args: &[String]) -> Result<RunArgs> {
    let mut run = RunArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                run.seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--frames" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --frames"))?;
                run.frames = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --frames value: {}", v))?;
            }
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                run.config_path = Some(v.clone());
            }
            "--verbose" | "-v" => run.verbose = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(run)
}

/// Log to stderr so stdout carries only the JSON snapshot
fn init_log(level: LevelFilter) -> Result<()> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S%.3f)} {l} {t} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .context("building log config")?;
    log4rs::init_config(config).context("installing logger")?;
    Ok(())
}

fn load_config(run: &RunArgs) -> Result<EngineConfig> {
    let mut config = match &run.config_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path))?;
            EngineConfig::from_json(&text).with_context(|| format!("loading {}", path))?
        }
        None => EngineConfig::default(),
    };
    if let Some(seed) = run.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let run = parse_args(&args)?;
    init_log(if run.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    })?;

    let config = load_config(&run)?;
    let mut engine = GameEngine::with_config(config)?;
    let frame = Duration::from_millis(FRAME_MS as u64);

    for n in 0..run.frames {
        if engine.is_game_over() {
            log::info!("stopped after {} frames", n);
            break;
        }

        if n % FRAMES_PER_MOVE == 0 && !engine.is_lock_pending() {
            if let Some(placement) = plan_placement(&engine) {
                if let Err(err) = apply_place(&mut engine, placement) {
                    log::debug!("placement {:?} rejected: {}", placement, err.message());
                }
            }
        }

        if let Some(clear) = engine.advance(frame) {
            if clear.rows_removed > 0 {
                log::info!(
                    "cleared {} rows (+{}), score {}",
                    clear.rows_removed,
                    clear.points,
                    engine.score()
                );
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}
