//! Updraft headless driver
//!
//! Runs a session with the autopilot at the controls and prints the final
//! screen. Frames can be traced to a JSON lines file for an external viewer.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use updraft::consts::{FRAME_DT, FRAME_RATE};
use updraft::host::{Autopilot, Clock, FixedStepClock, FramePacer, InputSource, MonotonicClock};
use updraft::hud::screen_text;
use updraft::render::{JsonLinesSink, NullSink, RenderFrame, RenderSink};
use updraft::sim::{GameState, tick};
use updraft::{ConfigError, GameConfig, SinkError};

#[derive(Parser, Debug)]
#[command(name = "updraft", version, about = "Vertically scrolling platformer, headless")]
struct Args {
    /// Session seed (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many frames
    #[arg(short, long, default_value_t = 3600)]
    frames: u64,

    /// JSON file overriding the default game constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write every frame as a JSON line to this file
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Pace frames at 60 Hz on the wall clock instead of simulating time
    #[arg(short, long)]
    realtime: bool,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("failed to create trace file {path}: {source}")]
    Trace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Vec<String>, RunError> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(time_seed);
    log::info!("Updraft starting with seed {}", seed);

    let mut state = GameState::with_config(seed, config)?;

    let mut sink: Box<dyn RenderSink> = match &args.trace {
        Some(path) => {
            let file = File::create(path).map_err(|source| RunError::Trace {
                path: path.clone(),
                source,
            })?;
            Box::new(JsonLinesSink::new(BufWriter::new(file)))
        }
        None => Box::new(NullSink),
    };

    let mut clock: Box<dyn Clock> = if args.realtime {
        Box::new(MonotonicClock::new())
    } else {
        Box::new(FixedStepClock::new(FRAME_DT))
    };
    let mut pacer = args.realtime.then(|| FramePacer::new(FRAME_RATE));
    let mut input_source = Autopilot;

    let mut last = RenderFrame::capture(&state, 0.0);
    for _ in 0..args.frames {
        let now = clock.now();
        let input = input_source.poll(&state);
        if input.quit {
            log::info!("Quit requested");
            break;
        }

        for event in tick(&mut state, &input, now) {
            log::trace!("{:?}", event);
        }

        last = RenderFrame::capture(&state, now);
        sink.submit(&last)?;

        if state.is_game_over() {
            break;
        }
        if let Some(pacer) = pacer.as_mut() {
            pacer.wait();
        }
    }
    sink.finish()?;

    log::info!(
        "Stopped after {} running frames in phase {:?}",
        state.frame,
        state.phase
    );
    Ok(screen_text(&last))
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
