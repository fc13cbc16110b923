//! Progressive Breach Engine — Reference Demo CLI
//!
//! Runs one or all of the reference scenarios. Each scenario wires the real
//! components (catalog pipeline, topology scanner, unlock strategies,
//! in-memory store) over a scripted world.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- hub-camera
//!   cargo run -p demo -- ttl-expiry
//!   cargo run -p demo -- remote-turret
//!   cargo run -p demo -- failure-lockout
//!   cargo run -p demo -- session-flow

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use breach_contracts::error::BreachResult;
use breach_ref_world::scenarios::{failure_lockout, hub_camera, remote_turret, session_flow, ttl_expiry};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Progressive breach engine reference demo.
///
/// Each subcommand runs one or all of the reference scenarios, showing how
/// offers are filtered, grants cascade, grants expire, and failures lock
/// out an area.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Progressive breach engine reference demo",
    long_about = "Runs reference breach scenarios showing catalog filtering,\n\
                  grant cascades, grant expiry, and failure lockouts."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every scenario in sequence.
    RunAll,
    /// Scenario 1: Hub with one camera (offer, grant, re-offer).
    HubCamera,
    /// Scenario 2: Grant expiry with a one-hour lifetime.
    TtlExpiry,
    /// Scenario 3: Remote breach of a standalone turret.
    RemoteTurret,
    /// Scenario 4: Failed breach lockout by radius and time.
    FailureLockout,
    /// Scenario 5: Session tokens across a delayed callback, and a save round trip.
    SessionFlow,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to watch each pipeline rule.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::HubCamera => hub_camera::run_scenario(),
        Command::TtlExpiry => ttl_expiry::run_scenario(),
        Command::RemoteTurret => remote_turret::run_scenario(),
        Command::FailureLockout => failure_lockout::run_scenario(),
        Command::SessionFlow => session_flow::run_scenario(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all() -> BreachResult<()> {
    let scenarios: [(&str, fn() -> BreachResult<()>); 5] = [
        ("hub-camera", hub_camera::run_scenario),
        ("ttl-expiry", ttl_expiry::run_scenario),
        ("remote-turret", remote_turret::run_scenario),
        ("failure-lockout", failure_lockout::run_scenario),
        ("session-flow", session_flow::run_scenario),
    ];
    for (name, run) in scenarios {
        debug!(scenario = name, "running scenario");
        run()?;
    }
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Progressive Breach Engine");
    println!("Reference Demo");
    println!("=========================");
    println!();
    println!("Per breach:");
    println!("  [1] Topology scan: hub children, then radius scan");
    println!("  [2] Catalog pipeline: inject, expire, restrict, require topology, suppress rewards");
    println!("  [3] Minigame runs; the host keeps the session token");
    println!("  [4] Success: write grant, mark breached, cascade, record position");
    println!("  [5] Failure: stamp failure, lock out the surrounding area");
    println!();
}
