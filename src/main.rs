use anyhow::{ensure, Result};
use clap::Parser;
use log::{info, warn};

use corridor_sim::logging;
use corridor_sim::simulation::{Autopilot, DriveMode, SimWorld};

/// Largest step the simulation is ever handed
const MAX_DELTA: f64 = 1.0 / 30.0;

#[derive(Parser)]
#[command(name = "corridor_sim")]
#[command(about = "Drivable street corridor with ambient traffic, with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "1800")]
    ticks: u32,

    /// Time delta per tick in seconds (clamped to 1/30)
    #[arg(long, default_value = "0.033")]
    delta: f64,

    /// Seed for reproducible traffic, pedestrians and props
    #[arg(long)]
    seed: Option<u64>,

    /// Landmark the headless autopilot drives to
    #[arg(long, default_value = "Walmart")]
    destination: String,

    /// Seconds of simulated time between headless reports
    #[arg(long, default_value = "5")]
    report_every: f64,

    /// Enable debug logging for the simulation
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(&cli);
            return Ok(());
        }
        #[cfg(not(feature = "ui"))]
        {
            anyhow::bail!("UI feature is not enabled. Rebuild with --features ui");
        }
    }

    logging::init(cli.verbose);
    run_headless(&cli)
}

fn build_world(seed: Option<u64>) -> SimWorld {
    match seed {
        Some(seed) => SimWorld::with_seed(seed),
        None => SimWorld::new(),
    }
}

/// Run the simulation in headless mode (no graphics), driven by the autopilot
fn run_headless(cli: &Cli) -> Result<()> {
    ensure!(cli.delta > 0.0, "--delta must be positive, got {}", cli.delta);
    ensure!(
        cli.report_every > 0.0,
        "--report-every must be positive, got {}",
        cli.report_every
    );
    let delta = if cli.delta > MAX_DELTA {
        warn!("Delta {}s clamped to {:.4}s", cli.delta, MAX_DELTA);
        MAX_DELTA
    } else {
        cli.delta
    };

    println!("Running corridor simulation in headless mode...");
    println!("Ticks: {}, Delta: {:.4}s", cli.ticks, delta);
    println!();

    let mut world = build_world(cli.seed);
    world.set_mode(DriveMode::Drive);
    ensure!(
        world.set_destination(&cli.destination),
        "no landmark matches destination {:?}",
        cli.destination
    );
    let autopilot = Autopilot::default();

    println!("Initial state:");
    world.print_summary();
    world.draw_map();
    println!();

    let ticks_per_report = ((cli.report_every / delta).ceil() as u32).max(1);
    let mut tick = 0;
    while tick < cli.ticks {
        let ticks_to_run = ticks_per_report.min(cli.ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;
            let input = autopilot.input(&world.vehicle.state(), &world.navigation);
            let report = world.tick(delta, input);
            if let Some(name) = report.arrived_at {
                info!("Autopilot reached {} after {:.1}s", name, world.stats.time);
            }
        }

        println!(
            "--- After tick {} ({:.1}s simulated time) ---",
            tick,
            f64::from(tick) * delta
        );
        world.print_summary();
        world.draw_map();
        println!();
    }

    println!("=== Final State ===");
    world.print_summary();
    print_legend(&world);
    Ok(())
}

fn print_legend(world: &SimWorld) {
    println!();
    println!("Map legend: @ you, + waypoint, ^/v traffic, * pedestrian, # building, . road");
    println!(
        "Landmarks: {}",
        world
            .layout
            .landmarks
            .iter()
            .map(|landmark| format!("{} ({})", landmark.kind.glyph(), landmark.name))
            .collect::<Vec<_>>()
            .join(", ")
    );
}

#[cfg(feature = "ui")]
fn run_with_ui(cli: &Cli) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;
    use corridor_sim::ui;

    println!("Starting Corridor Sim UI...");
    println!();
    println!("Controls:");
    println!("  Tab              - Toggle showroom / drive");
    println!("  W/S or Up/Down   - Accelerate / reverse");
    println!("  A/D or Left/Right - Steer");
    println!("  Space/Shift      - Brake");
    println!("  1-5              - Navigate to a landmark, 0 to clear");
    println!("  ESC              - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: logging::default_filter(cli.verbose).to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Corridor Sim".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(ui::SimWorldResource(build_world(cli.seed)))
        .add_plugins(ui::CorridorSimUIPlugin)
        .run();
}
