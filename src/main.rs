//! Mars Runner headless driver
//!
//! Plays a few seeded runs under the autopilot on a fixed-step clock and
//! prints the resulting leaderboard as JSON.
//!
//! Usage: `mars-runner [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
use mars_runner::sim::RunSummary;
#[cfg(not(target_arch = "wasm32"))]
use mars_runner::{Tuning, consts::SIM_HZ};

/// Seeds played per invocation
#[cfg(not(target_arch = "wasm32"))]
const DEMO_RUNS: u64 = 3;
/// Simulated time cap per run (10 minutes)
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 10 * 60 * SIM_HZ as u64;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mars Runner (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation core is driven by the embedding page; nothing to run here
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> mars_runner::Result<()> {
    use mars_runner::{HighScores, RunRecord};

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let mut board = HighScores::new();
    for seed in 1..=DEMO_RUNS {
        let summary = play(tuning, seed)?;
        log::info!(
            "Run {}: level {}, score {}, stone {} ice {} energy {}",
            seed,
            summary.level,
            summary.score,
            summary.ledger.stone,
            summary.ledger.ice,
            summary.ledger.energy
        );
        board.add(RunRecord::from_summary(&summary, seed));
    }

    println!("{}", serde_json::to_string_pretty(&board)?);
    Ok(())
}

/// Play one run to game over (or the time cap), retrying every lost life
#[cfg(not(target_arch = "wasm32"))]
fn play(tuning: Tuning, seed: u64) -> mars_runner::Result<RunSummary> {
    use mars_runner::sim::{Autopilot, Clock, FixedStepClock, Phase, RunSession};

    let mut session = RunSession::new(tuning, seed)?;
    let mut clock = FixedStepClock::new(SIM_HZ);
    let pilot = Autopilot::default();
    let mut snapshot = session.snapshot();

    for _ in 0..MAX_TICKS {
        if pilot.decide(&snapshot) {
            session.request_jump();
        }
        snapshot = session.advance(clock.now());
        match snapshot.phase {
            Phase::LifeLost => {
                session.retry(true);
            }
            Phase::GameOver => break,
            _ => {}
        }
    }
    if snapshot.phase != Phase::GameOver {
        log::warn!(
            "Run {} hit the time cap on level {} after {} ticks",
            seed,
            snapshot.level,
            clock.ticks()
        );
    }

    Ok(session.abandon())
}
