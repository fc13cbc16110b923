//! Scenario 2: Grant expiry
//!
//! A lone hub with a one-hour grant lifetime. Basic is granted at `t = 0`.
//!
//! Walk-through:
//!   1. At t = 3599 s the grant is still live, so Basic is not offered
//!   2. At t = 3601 s the grant has expired: the pipeline resets its
//!      timestamp to zero and offers Basic again

use breach_contracts::{
    breach::BreachPointKind,
    capability::CapabilityClass,
    error::BreachResult,
    resource::ResourceKind,
};

use crate::{
    runtime::{reference_settings, RefRuntime},
    scenarios::{classes, describe},
    world::lone_hub,
};

/// Grant lifetime for this scenario, in hours.
pub const TTL_HOURS: f64 = 1.0;

#[derive(Debug)]
pub struct TtlOutcome {
    pub before_expiry: Vec<CapabilityClass>,
    pub granted_before_expiry: bool,
    pub after_expiry: Vec<CapabilityClass>,
    pub timestamp_after_expiry: f64,
}

pub fn evaluate() -> BreachResult<TtlOutcome> {
    let (world, hub) = lone_hub();
    let settings = reference_settings()?.with_ttl_hours(TTL_HOURS);
    let runtime = RefRuntime::new(world, settings, 0.0)?;
    let engine = &runtime.engine;

    engine.apply_grant(ResourceKind::Hub, CapabilityClass::Basic, &hub);

    runtime.clock.set(3_599.0);
    let before = engine.offer(BreachPointKind::Hub, &hub);
    let granted_before_expiry = engine.is_already_granted(&hub, CapabilityClass::Basic);

    runtime.clock.set(3_601.0);
    let after = engine.offer(BreachPointKind::Hub, &hub);

    Ok(TtlOutcome {
        before_expiry: classes(&before),
        granted_before_expiry,
        after_expiry: classes(&after),
        timestamp_after_expiry: runtime.store.grant_at(&hub.id, CapabilityClass::Basic),
    })
}

/// Run Scenario 2 and print each step.
pub fn run_scenario() -> BreachResult<()> {
    println!("=== Scenario 2: Grant expiry ===");
    println!();
    println!("  Target:   relay-hub (ttl = {} h)", TTL_HOURS);
    println!("  Basic granted at t = 0");
    println!();

    let outcome = evaluate()?;

    println!("  t = 3599 s  offered: {}", describe(&outcome.before_expiry));
    println!(
        "              still granted: {}",
        if outcome.granted_before_expiry { "yes" } else { "no" }
    );
    println!("  t = 3601 s  offered: {}", describe(&outcome.after_expiry));
    println!("              basic timestamp reset to {:.0}", outcome.timestamp_after_expiry);
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}
