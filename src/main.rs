//! Flappy headless runner
//!
//! Plays rounds in demo mode through the same frame pump a renderer would
//! use, then prints the results.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use flappy::audio::{AudioManager, LogSink};
use flappy::consts::FRAME_RATE;
use flappy::sim::{GamePhase, InputEvent};
use flappy::{Preset, Session, Tuning};

#[derive(Parser, Debug)]
#[command(name = "flappy")]
#[command(about = "Run Flappy rounds headless with the autopilot")]
struct Args {
    /// Number of rounds to play
    #[arg(short, long, default_value_t = 3)]
    rounds: u32,

    /// Seed for gap generation
    #[arg(short, long, default_value_t = 0xF1A9)]
    seed: u64,

    /// Tuning preset (classic, gentle, arcade)
    #[arg(short, long, default_value = "classic")]
    preset: String,

    /// JSON tuning file (overrides the preset)
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// Give up on a round after this many ticks
    #[arg(long, default_value_t = 60 * 60 * 5)]
    max_ticks: u64,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Recover from a failing tick instead of aborting
    #[arg(long)]
    resilient: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => {
            let Some(preset) = Preset::from_str(&args.preset) else {
                bail!("unknown preset '{}'", args.preset);
            };
            log::info!("Using {} preset", preset.as_str());
            Tuning::from_preset(preset)
        }
    };

    let mut session = Session::new(tuning, args.seed)
        .context("invalid tuning")?
        .with_audio(AudioManager::new(Box::new(LogSink)));
    session.set_autopilot(true);
    session.set_resilient(args.resilient);
    log::info!("Game initialized with seed: {}", args.seed);

    let frame_secs = 1.0 / FRAME_RATE;
    for round in 1..=args.rounds {
        session.push_input(InputEvent::Start);
        let mut snapshot = session.frame(frame_secs);

        while snapshot.phase == GamePhase::Playing {
            if session.state.round_ticks >= args.max_ticks {
                log::warn!("Round {round} capped at {} ticks", args.max_ticks);
                break;
            }
            snapshot = session.frame(frame_secs);
        }

        println!(
            "Round {round}: score {} in {} ticks ({})",
            session.state.score,
            session.state.round_ticks,
            session
                .state
                .last_collision
                .map(|c| format!("{c:?}"))
                .unwrap_or_else(|| "survived".to_string())
        );

        if session.state.phase == GamePhase::Playing {
            session.state.reset_to_menu();
        }
    }

    println!("High score: {}", session.state.high_score());
    for (rank, entry) in session.state.high_scores.entries().iter().enumerate() {
        println!(
            "  {:>2}. {:>4} pts  round {} ({} ticks)",
            rank + 1,
            entry.score,
            entry.round,
            entry.ticks
        );
    }
    if session.recoveries() > 0 {
        println!("Recovered from {} failed ticks", session.recoveries());
    }

    if args.json {
        let json = serde_json::to_string_pretty(&session.state.snapshot())
            .context("serializing snapshot")?;
        println!("{json}");
    }

    Ok(())
}
