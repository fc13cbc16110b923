//! Scenario 3: Remote breach of a turret
//!
//! A standalone turret on a rooftop with nothing else in range.
//!
//! Walk-through:
//!   1. A remote breach injects the turret's fixed set: Basic and Turret
//!   2. Topology is not consulted for remote breaches, so Basic stays offered
//!      even though the scan finds only the turret itself
//!   3. For contrast, a backdoor breach of the same turret consults
//!      topology and offers nothing: it may only inject Basic and Camera

use breach_contracts::{
    breach::{BreachPointKind, LeafDeviceKind},
    capability::CapabilityClass,
    error::BreachResult,
};

use crate::{
    runtime::RefRuntime,
    scenarios::{classes, describe},
    world::rooftop_turret,
};

#[derive(Debug)]
pub struct RemoteTurretOutcome {
    pub remote_offer: Vec<CapabilityClass>,
    pub reachable: Vec<CapabilityClass>,
    pub backdoor_offer: Vec<CapabilityClass>,
}

pub fn evaluate() -> BreachResult<RemoteTurretOutcome> {
    let (world, turret) = rooftop_turret();
    let runtime = RefRuntime::reference(world, 600.0)?;
    let engine = &runtime.engine;

    let remote = BreachPointKind::RemoteLeaf(LeafDeviceKind::Turret);
    let ctx = engine.open_context(remote, &turret);
    let remote_offer = engine.evaluate_catalog(&ctx);

    let backdoor_offer = engine.offer(BreachPointKind::BackdoorLeaf, &turret);

    Ok(RemoteTurretOutcome {
        remote_offer: classes(&remote_offer),
        reachable: ctx.topology.reachable(),
        backdoor_offer: classes(&backdoor_offer),
    })
}

/// Run Scenario 3 and print each step.
pub fn run_scenario() -> BreachResult<()> {
    println!("=== Scenario 3: Remote breach of a turret ===");
    println!();
    println!("  Target:   roof-turret (standalone, nothing in range)");
    println!();

    let outcome = evaluate()?;

    println!("  Reachable by scan:      {}", describe(&outcome.reachable));
    println!("  Remote breach offers:   {}", describe(&outcome.remote_offer));
    println!("  Backdoor breach offers: {}", describe(&outcome.backdoor_offer));
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use breach_contracts::capability::CapabilityClass::*;

    use super::evaluate;

    #[test]
    fn test_remote_offer_is_basic_and_turret() {
        let outcome = evaluate().unwrap();
        assert_eq!(outcome.remote_offer, vec![Basic, Turret]);
    }

    #[test]
    fn test_remote_offer_ignores_topology() {
        let outcome = evaluate().unwrap();
        assert_eq!(outcome.reachable, vec![Turret]);
        assert!(outcome.remote_offer.contains(&Basic));
    }

    #[test]
    fn test_backdoor_offer_respects_topology() {
        let outcome = evaluate().unwrap();
        assert!(outcome.backdoor_offer.is_empty());
    }
}
