//! ferry_building — smallest end-to-end run of the wayfinder engine.
//!
//! Resolves every transport mode from the Ferry Building to Coit Tower with
//! no directions backend (every route falls back to the straight-line
//! estimate), prints the option table, then plays the selected option back
//! as simulated fixes while watching for heading alignment with the tower.
//!
//! Usage: `ferry_building [config.json]`.  Without a file the configuration
//! comes from `WAYFINDER_*` environment variables.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wf_core::{Coordinate, FixOrigin, format_distance};
use wf_nav::{EventBroadcaster, NavConfig, NavEvent, NavSessionBuilder, spawn_session};
use wf_routing::UnavailableProvider;

// ── Constants ─────────────────────────────────────────────────────────────────

const FERRY_BUILDING: Coordinate = Coordinate::new(37.7955, -122.3937);
const COIT_TOWER:     Coordinate = Coordinate::new(37.8024, -122.4058);

const SPEED_MULTIPLIER: f64 = 4.0;

fn load_config(path: Option<&Path>) -> Result<NavConfig> {
    let Some(path) = path else {
        return Ok(NavConfig::from_env()?);
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let cfg: NavConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ferry_building=info,wf_nav=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::args().nth(1);
    let config = load_config(config_path.as_deref().map(Path::new))?;
    info!(deadline = ?config.resolver.deadline, "configuration loaded");

    println!("=== ferry_building — wayfinder ===");
    println!("From {FERRY_BUILDING} to {COIT_TOWER}");
    println!("Straight line: {}", format_distance(FERRY_BUILDING.distance_m(COIT_TOWER)));
    println!();

    // 1. Session on its own task; events fan out over a broadcast channel.
    let events = EventBroadcaster::new(config.event_capacity);
    let mut rx = events.subscribe();
    let session = NavSessionBuilder::new(UnavailableProvider)
        .config(config)
        .observer(events)
        .build()?;
    let handle = spawn_session(session);

    // 2. Resolve every mode.
    let t0 = Instant::now();
    let options = handle.resolve_routes(FERRY_BUILDING, COIT_TOWER, &[]).await?;
    println!("Resolved {} options in {:.3} s", options.len(), t0.elapsed().as_secs_f64());
    println!();

    println!("{:<3} {:<12} {:>8} {:>9} {:>9}", "", "Mode", "Minutes", "Distance", "Fare");
    println!("{}", "-".repeat(45));
    for option in &options {
        println!(
            "{:<3} {:<12} {:>8.1} {:>9} {:>9}",
            if option.selected { "*" } else { "" },
            option.mode.as_str(),
            option.travel_time_secs / 60.0,
            format_distance(option.distance_m),
            option.fare_display().unwrap_or_else(|| "-".into()),
        );
    }
    if !options.unavailable().is_empty() {
        println!("Unavailable: {:?}", options.unavailable());
    }
    println!();

    // 3. Play back the selected option facing the tower.
    handle.set_target(Some(COIT_TOWER)).await?;
    handle.simulate_selected(SPEED_MULTIPLIER).await?;

    loop {
        match rx.recv().await {
            Ok(NavEvent::SimulationStarted { points, interval }) => {
                println!("Simulating {points} points every {interval:?}");
            }
            Ok(NavEvent::Fix { fix, origin: FixOrigin::Simulated }) => {
                println!(
                    "  fix {}  course {:>6.1}°  t={:.3}",
                    fix.coordinate, fix.course_deg, fix.timestamp_secs
                );
            }
            Ok(NavEvent::Aligned(event)) => {
                println!(
                    "  aligned: heading {:.1}° vs bearing {:.1}° (bucket {})",
                    event.heading_deg, event.bearing_to_target_deg, event.bucket
                );
            }
            Ok(NavEvent::SimulationStopped { finished }) => {
                println!("Simulation stopped (finished: {finished})");
                break;
            }
            Ok(_) => {}
            Err(RecvError::Lagged(missed)) => warn!(missed, "event subscriber lagged"),
            Err(RecvError::Closed) => break,
        }
    }
    println!();

    // 4. Look back at the ferry terminal and sweep the compass across it:
    //    only the first on-bearing sample fires.
    handle.set_target(Some(FERRY_BUILDING)).await?;
    let snapshot = handle.snapshot().await?;
    if let Some(fix) = snapshot.last_fix {
        let bearing = fix.coordinate.bearing_to(FERRY_BUILDING);
        for heading in [bearing - 30.0, bearing - 0.4, bearing, bearing + 0.6, bearing + 45.0] {
            let fired = handle.observe_heading(heading).await?;
            println!(
                "  heading {:>6.1}° → {}",
                heading,
                if fired.is_some() { "aligned" } else { "-" }
            );
        }
        println!();
        println!("Last fix: {}", serde_json::to_string(&fix)?);
    }

    handle.shutdown().await?;
    Ok(())
}
