//! Headless stride runner.
//!
//! Plays a scripted input timeline against a small course and logs every
//! state change, jump and grounding edge. `RUST_LOG=stride=debug` shows the
//! core's own transition logs.

mod course;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use stride_core::player::{Player, PlayerConfig};
use stride_core::simulation::Simulation;
use stride_core::state::Actor;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs a scripted player through the test course
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Player config (JSON). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 720)]
    ticks: u32,

    /// Unscaled seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Time scale applied to the clock
    #[arg(long, default_value_t = 1.0)]
    time_scale: f32,

    /// Stat set to select before the run
    #[arg(long, default_value_t = 0)]
    stat_set: usize,

    /// Print the final kinematic snapshot as JSON
    #[arg(long)]
    snapshot: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&PathBuf>) -> Result<PlayerConfig> {
    match path {
        Some(path) => PlayerConfig::from_path(path)
            .with_context(|| format!("loading player config from {}", path.display())),
        None => Ok(PlayerConfig::default()),
    }
}

fn wire_observers(sim: &mut Simulation<Player, sweep::StaticWorld>) {
    sim.states_mut().events.on_change.connect(|change| {
        info!(target: "stride::sim", from = ?change.from, to = ?change.to, "state");
    });

    let player = sim.actor_mut();
    player.events.on_jump.connect(|count| {
        info!(target: "stride::sim", count, "jump");
    });
    let events = &mut player.entity_mut().events;
    events.on_ground_enter.connect(|_| info!(target: "stride::sim", "landed"));
    events.on_ground_exit.connect(|_| info!(target: "stride::sim", "airborne"));
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if !args.dt.is_finite() || args.dt <= 0.0 {
        bail!("--dt must be positive, got {}", args.dt);
    }

    let config = load_config(args.config.as_ref())?;
    let mut player = Player::from_config(&config)
        .context("building player")?
        .with_position(course::SPAWN);
    if !player.stats_mut().change(args.stat_set) {
        bail!(
            "--stat-set {} is out of range ({} sets)",
            args.stat_set,
            player.stats().len()
        );
    }

    let mut sim = Simulation::new(player, course::build(), &config.states);
    sim.set_time_scale(args.time_scale);
    wire_observers(&mut sim);

    let mut script = course::Script::new(course::timeline());
    for _ in 0..args.ticks {
        let now = sim.clock().time();
        script.apply(now, sim.actor_mut().input_mut());
        sim.step(args.dt);
    }

    let body = sim.actor().entity();
    info!(
        target: "stride::sim",
        frames = sim.clock().frame(),
        time = sim.clock().time(),
        state = ?sim.current_state(),
        position = ?body.position(),
        grounded = body.is_grounded(),
        script_done = script.is_finished(),
        "run complete"
    );

    if args.snapshot {
        let json = serde_json::to_string_pretty(&body.snapshot()).context("encoding snapshot")?;
        println!("{json}");
    }
    Ok(())
}
