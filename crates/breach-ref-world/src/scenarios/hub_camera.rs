//! Scenario 1: Hub with one camera
//!
//! A hub jacked into directly, with a single networked camera and nothing
//! else around it. Grants are permanent.
//!
//! Walk-through:
//!   1. Topology: the hub itself is basic, its child is a camera
//!   2. Catalog offers Basic and Camera (no turrets or agents present)
//!   3. The player exercises Basic; the hub's Basic timestamp becomes `now`
//!   4. The cascade writes Basic on the camera without exposing it
//!   5. Re-evaluating the catalog offers only Camera

use breach_contracts::{
    breach::BreachPointKind,
    capability::CapabilityClass,
    error::BreachResult,
    resource::ResourceKind,
    unlock::UnlockReport,
};

use crate::{
    runtime::RefRuntime,
    scenarios::{classes, describe},
    world::camera_office,
};

/// What the scenario observed.
#[derive(Debug)]
pub struct HubCameraOutcome {
    pub first_offer: Vec<CapabilityClass>,
    pub report: UnlockReport,
    pub basic_timestamp: f64,
    pub now: f64,
    pub second_offer: Vec<CapabilityClass>,
}

/// Clock start for the scenario, in seconds.
const START: f64 = 7_200.0;

pub fn evaluate() -> BreachResult<HubCameraOutcome> {
    let (world, hub) = camera_office();
    let runtime = RefRuntime::reference(world, START)?;
    let engine = &runtime.engine;

    let first = engine.offer(BreachPointKind::Hub, &hub);
    let report = engine.apply_grant(ResourceKind::Hub, CapabilityClass::Basic, &hub);
    let second = engine.offer(BreachPointKind::Hub, &hub);

    Ok(HubCameraOutcome {
        first_offer: classes(&first),
        report,
        basic_timestamp: runtime.store.grant_at(&hub.id, CapabilityClass::Basic),
        now: runtime.now(),
        second_offer: classes(&second),
    })
}

/// Run Scenario 1 and print each step.
pub fn run_scenario() -> BreachResult<()> {
    println!("=== Scenario 1: Hub with one camera ===");
    println!();
    println!("  Target:   office-hub (hub, permanent grants)");
    println!("  Network:  1 camera child");
    println!();

    let outcome = evaluate()?;

    println!("  Offered:                {}", describe(&outcome.first_offer));
    println!("  Exercised:              basic");
    println!(
        "  Hub basic timestamp:    {:.0} (now = {:.0})",
        outcome.basic_timestamp, outcome.now
    );
    println!("  Cascaded to:            {} resource(s)", outcome.report.cascaded.len());
    println!("  Exposed:                {} resource(s)", outcome.report.exposed.len());
    println!("  Re-offered:             {}", describe(&outcome.second_offer));
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}
