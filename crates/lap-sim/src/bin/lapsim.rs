//! Simulate a lap-track run and export the trace.
//!
//! Run with:
//! ```
//! cargo run -p lap-sim --bin lapsim -- routes
//! cargo run -p lap-sim --bin lapsim -- simulate --route 28 --output run.gpx
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use lap_sim::prelude::*;
use track_geometry::TrackError;

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate lap-track runs as GPS traces", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List supported routes
    Routes,
    /// Simulate a run on a route
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Route id
    #[arg(short, long)]
    route: Option<u32>,

    /// Total distance, in meters
    #[arg(short, long)]
    distance: Option<f64>,

    /// Total time, in seconds
    #[arg(short, long)]
    time: Option<f64>,

    /// RNG seed for a reproducible trace
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file (defaults to ./settings.json when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the trace
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format; guessed from the output extension when omitted
    #[arg(short, long, value_enum)]
    format: Option<TraceFormat>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Routes => {
            list_routes();
            Ok(())
        }
        Command::Simulate(args) => simulate(args),
    }
}

fn list_routes() {
    for route in TrackRegistry::global().routes() {
        println!(
            "{:>4}  {:<11} {:<26} {:<17} start {} facing {}",
            route.id,
            route.campus,
            route.venue,
            route.session,
            route.geometry.start(),
            route.geometry.direction()
        );
    }
}

fn simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let mut config = RunConfig::load(args.config.as_deref()).context("failed to load settings")?;
    if let Some(route) = args.route {
        config.route_id = Some(route);
    }
    if let Some(distance) = args.distance {
        config.distance_m = distance;
    }
    if let Some(time) = args.time {
        config.duration_s = time;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let route_id = config
        .route_id
        .context("no route given; pass --route or set LAPSIM_ROUTE")?;
    let route = TrackRegistry::global()
        .route(route_id)
        .ok_or(TrackError::UnsupportedRoute(route_id))?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let plan = RunPlan::new(route_id, &config, &mut rng)?;
    tracing::info!(
        "START: {} {} ({})",
        route.campus,
        route.venue,
        route.session
    );

    let trace = Simulator::new(&route.geometry, plan, OffsetDateTime::now_utc()).run(&mut rng);
    let summary = trace.summary();

    tracing::info!("Simulation completed!");
    tracing::info!("  Points: {}", summary.point_count);
    tracing::info!("  Distance: {:.2}m", summary.distance_m);
    tracing::info!("  Path length: {:.2}m", summary.path_length_m);
    tracing::info!("  Duration: {:.0}s", summary.duration_s);
    tracing::info!("  Pace: {}", format_pace(summary.pace_s_per_km));

    if let Some(path) = args.output {
        let format = args
            .format
            .or_else(|| TraceFormat::from_path(&path))
            .unwrap_or(TraceFormat::Gpx);
        let name = format!("{} {} {}", route.campus, route.venue, route.session);
        save(&trace, &name, &path, format)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}
