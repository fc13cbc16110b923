//! Scenario 4: Failed breach lockout
//!
//! The player fails a breach of a street door at the origin. Lockouts last
//! ten minutes and cover a radius of 50.
//!
//! Walk-through:
//!   1. The breach session ends in failure; the door's position is recorded
//!   2. Five minutes later a camera 49 units away is locked out, one 51
//!      units away is not
//!   3. Eleven minutes later the camera at 49 units is free again

use breach_contracts::{
    error::{BreachError, BreachResult},
    grant::SECONDS_PER_MINUTE,
    resource::{ResourceId, ResourceKind, ResourceRef},
};

use crate::{runtime::RefRuntime, world::street};

/// Clock start for the scenario, in seconds.
const START: f64 = 1_000.0;

#[derive(Debug)]
pub struct LockoutOutcome {
    pub penalty_recorded: bool,
    pub door_locked_at_5_min: bool,
    pub near_locked_at_5_min: bool,
    pub far_locked_at_5_min: bool,
    pub near_locked_at_11_min: bool,
}

pub fn evaluate() -> BreachResult<LockoutOutcome> {
    let (world, door) = street(&[49.0, 51.0]);
    let runtime = RefRuntime::reference(world, START)?;
    let engine = &runtime.engine;

    let near = resource(&runtime, "street-cam-1")?;
    let far = resource(&runtime, "street-cam-2")?;

    let token = engine.begin_session(ResourceKind::Leaf, &door);
    let penalty_recorded = engine.complete_failure(&token);

    runtime.clock.set(START + 5.0 * SECONDS_PER_MINUTE);
    let door_locked_at_5_min = engine.is_locked_out(&door);
    let near_locked_at_5_min = engine.is_locked_out(&near);
    let far_locked_at_5_min = engine.is_locked_out(&far);

    runtime.clock.set(START + 11.0 * SECONDS_PER_MINUTE);
    let near_locked_at_11_min = engine.is_locked_out(&near);

    Ok(LockoutOutcome {
        penalty_recorded,
        door_locked_at_5_min,
        near_locked_at_5_min,
        far_locked_at_5_min,
        near_locked_at_11_min,
    })
}

fn resource(runtime: &RefRuntime, id: &str) -> BreachResult<ResourceRef> {
    let id = ResourceId::new(id);
    runtime
        .world
        .get(&id)
        .ok_or_else(|| BreachError::ResourceUnavailable {
            resource: id.to_string(),
        })
}

fn yes_no(locked: bool) -> &'static str {
    if locked {
        "LOCKED"
    } else {
        "free"
    }
}

/// Run Scenario 4 and print each step.
pub fn run_scenario() -> BreachResult<()> {
    println!("=== Scenario 4: Failed breach lockout ===");
    println!();
    println!("  Failure at: street-door (origin), lockout 10 min, radius 50");
    println!();

    let outcome = evaluate()?;

    println!(
        "  Penalty recorded:                 {}",
        if outcome.penalty_recorded { "yes" } else { "no" }
    );
    println!("  +5 min   street-door:             {}", yes_no(outcome.door_locked_at_5_min));
    println!("  +5 min   camera at 49:            {}", yes_no(outcome.near_locked_at_5_min));
    println!("  +5 min   camera at 51:            {}", yes_no(outcome.far_locked_at_5_min));
    println!("  +11 min  camera at 49:            {}", yes_no(outcome.near_locked_at_11_min));
    println!();
    println!("  Scenario 4 complete.");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::evaluate;

    #[test]
    fn test_failure_penalty_recorded() {
        assert!(evaluate().unwrap().penalty_recorded);
    }

    #[test]
    fn test_locked_within_radius_and_window() {
        let outcome = evaluate().unwrap();
        assert!(outcome.door_locked_at_5_min);
        assert!(outcome.near_locked_at_5_min);
    }

    #[test]
    fn test_free_outside_radius() {
        assert!(!evaluate().unwrap().far_locked_at_5_min);
    }

    #[test]
    fn test_free_after_window() {
        assert!(!evaluate().unwrap().near_locked_at_11_min);
    }
}
