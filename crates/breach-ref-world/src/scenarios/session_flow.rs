//! Scenario 5: Session handoff and save
//!
//! The minigame callback arrives after the offer, possibly after the world
//! has changed. The engine hands the host a token when the breach starts
//! and resolves it in the callback.
//!
//! Walk-through:
//!   1. A breach of the office hub starts, is retried, and the first token
//!      goes stale
//!   2. The camera on the hub's network is destroyed before the callback
//!   3. The success callback applies Basic and Camera; the destroyed camera
//!      is skipped, the hub is still granted
//!   4. A duplicate callback with the same token is ignored
//!   5. The store is saved to JSON and restored with identical state

use breach_contracts::{
    breach::BreachPointKind,
    capability::CapabilityClass,
    error::{BreachError, BreachResult},
    resource::{ResourceId, ResourceKind},
    unlock::UnlockReport,
};
use breach_core::traits::PersistenceStore;
use breach_store::InMemoryStore;

use crate::{
    runtime::RefRuntime,
    scenarios::{classes, describe},
    world::camera_office,
};

#[derive(Debug)]
pub struct SessionOutcome {
    pub offered: Vec<CapabilityClass>,
    pub stale_token_applied: bool,
    pub report: UnlockReport,
    pub duplicate_applied: bool,
    pub session_cleared: bool,
    pub save_bytes: usize,
    pub restored_matches: bool,
    pub restored_breached_hubs: Vec<ResourceId>,
}

pub fn evaluate() -> BreachResult<SessionOutcome> {
    let (world, hub) = camera_office();
    let runtime = RefRuntime::reference(world, 4_000.0)?;
    let engine = &runtime.engine;

    let offered = engine.offer(BreachPointKind::Hub, &hub);

    let stale = engine.begin_session(ResourceKind::Hub, &hub);
    let token = engine.begin_session(ResourceKind::Hub, &hub);
    let stale_token_applied = engine.complete_success(&stale, &[CapabilityClass::Basic]).is_some();

    runtime.world.destroy(&ResourceId::new("office-cam"));
    runtime.clock.advance(12.0);

    let report = engine
        .complete_success(&token, &[CapabilityClass::Basic, CapabilityClass::Camera])
        .ok_or_else(|| BreachError::UnknownSession {
            token: token.to_string(),
        })?;
    let duplicate_applied = engine.complete_success(&token, &[CapabilityClass::Basic]).is_some();
    let session_cleared = engine.active_session(ResourceKind::Hub).is_none();

    let saved = runtime.store.to_json()?;
    let restored = InMemoryStore::from_json(&saved)?;

    Ok(SessionOutcome {
        offered: classes(&offered),
        stale_token_applied,
        report,
        duplicate_applied,
        session_cleared,
        save_bytes: saved.len(),
        restored_matches: restored.export_snapshot()? == runtime.store.export_snapshot()?,
        restored_breached_hubs: restored.breached(ResourceKind::Hub)?,
    })
}

/// Run Scenario 5 and print each step.
pub fn run_scenario() -> BreachResult<()> {
    println!("=== Scenario 5: Session handoff and save ===");
    println!();
    println!("  Target:   office-hub, camera destroyed before the callback");
    println!();

    let outcome = evaluate()?;
    let report = &outcome.report;

    println!("  Offered:                {}", describe(&outcome.offered));
    println!(
        "  Stale token:            {}",
        if outcome.stale_token_applied { "APPLIED" } else { "ignored" }
    );
    println!("  Applied:                {}", describe(&report.capabilities));
    println!(
        "  Hub written:            {}",
        if report.target_written { "yes" } else { "no" }
    );
    println!("  Skipped (destroyed):    {}", report.skipped.len());
    println!(
        "  Duplicate callback:     {}",
        if outcome.duplicate_applied { "APPLIED" } else { "ignored" }
    );
    println!(
        "  Session slot cleared:   {}",
        if outcome.session_cleared { "yes" } else { "no" }
    );
    println!(
        "  Save round trip:        {} bytes, {}",
        outcome.save_bytes,
        if outcome.restored_matches { "identical" } else { "MISMATCH" }
    );
    println!();
    println!("  Scenario 5 complete.");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use breach_contracts::{capability::CapabilityClass::*, resource::ResourceId};

    use super::evaluate;

    #[test]
    fn test_stale_and_duplicate_tokens_ignored() {
        let outcome = evaluate().unwrap();
        assert!(!outcome.stale_token_applied);
        assert!(!outcome.duplicate_applied);
        assert!(outcome.session_cleared);
    }

    #[test]
    fn test_destroyed_camera_skipped_hub_granted() {
        let outcome = evaluate().unwrap();
        assert!(outcome.report.target_written);
        assert_eq!(outcome.report.capabilities, vec![Basic, Camera]);
        assert_eq!(outcome.report.skipped, vec![ResourceId::new("office-cam")]);
        assert!(outcome.report.cascaded.is_empty());
    }

    #[test]
    fn test_save_round_trip() {
        let outcome = evaluate().unwrap();
        assert!(outcome.restored_matches);
        assert_eq!(outcome.restored_breached_hubs, vec![ResourceId::new("office-hub")]);
    }

    #[test]
    fn test_offer_precedes_destruction() {
        let outcome = evaluate().unwrap();
        assert_eq!(outcome.offered, vec![Basic, Camera]);
    }
}
