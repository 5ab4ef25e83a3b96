//! Danmaku entry point
//!
//! Native headless runner: drives a session at a fixed frame rate with the
//! autopilot at the controls, records each frame into a draw list and prints
//! a summary. Set `RUST_LOG=debug` to follow spawns and kills.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use danmaku::renderer::DrawList;
use danmaku::session::Autopilot;
use danmaku::sim::GameEvent;
use danmaku::{Session, Settings};

#[derive(Parser)]
#[command(name = "danmaku")]
#[command(about = "Headless bullet-hell simulation runner")]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Run seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Simulated frame rate (overrides the settings file)
    #[arg(long)]
    fps: Option<u32>,
    /// Write the effective settings to this path and exit
    #[arg(long)]
    write_settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(fps) = cli.fps {
        settings.target_fps = fps;
    }
    settings.validate().context("Invalid settings")?;

    if let Some(path) = &cli.write_settings {
        settings
            .save_to(path)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        println!("Settings written to {}", path.display());
        return Ok(());
    }

    let seed = settings.seed.unwrap_or_else(seed_from_clock);
    log::info!("Danmaku (native) starting with seed {}", seed);

    let mut session = Session::new(&settings, seed).context("Failed to start session")?;
    let mut pilot = Autopilot::new(settings.autopilot.clone());
    let mut frame = DrawList::new();
    let dt = settings.frame_dt();
    let mut peak_draw_calls = 0;
    let mut peak_entities = 0;

    for _ in 0..cli.frames {
        let input = pilot.input_for(session.state(), dt);
        session.set_input(input);

        for event in session.advance(dt) {
            if let GameEvent::PlayerHit { bullet } = event {
                log::info!(
                    "Player hit by enemy bullet {} (score {})",
                    bullet,
                    session.state().player.score
                );
            }
        }

        frame.clear();
        session.draw(&mut frame);
        peak_draw_calls = peak_draw_calls.max(frame.len());
        peak_entities = peak_entities.max(session.state().live_entities());
    }

    let stats = session.stats();
    println!("Simulated {} frames at {} fps (seed {})", stats.frames, settings.target_fps, seed);
    println!(
        "Games started: {}  lost: {}  enemies destroyed: {}",
        stats.games_started, stats.games_lost, stats.enemies_killed
    );
    println!(
        "Best score: {}  current score: {}",
        stats.best_score.max(session.state().player.score),
        session.state().player.score
    );
    println!(
        "Peak live entities: {}  peak draw calls: {}",
        peak_entities, peak_draw_calls
    );

    Ok(())
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
