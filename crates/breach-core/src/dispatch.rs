//! Unlock dispatch: the shared template around the per-kind strategies.
//!
//! Every successful capability exercise runs the same five steps:
//!
//!   1. Resolve the device type implied by the capability
//!   2. Write the grant timestamp on the target
//!   3. Mark the target breached in its kind's registry
//!   4. Run the kind-specific cascade
//!   5. Record the breach position in the radial-unlock history, when step 2
//!      or step 4 wrote anything
//!
//! Steps 2 and 3 always precede step 4: cascades re-read the target's own
//! grant state. Step 1 uses the capability, never the target's class, since
//! a hub reports its own type whatever it is granting.

use std::collections::HashMap;

use breach_contracts::{
    capability::CapabilityClass,
    error::{BreachError, BreachResult},
    grant::stamp,
    resource::{DeviceClass, ResourceKind, ResourceRef},
    unlock::UnlockReport,
};
use tracing::{debug, info, warn};

use crate::{
    services::HostServices,
    traits::{UnlockRequest, UnlockStrategy},
};

/// Routes each grant to the strategy registered for the resource's kind.
#[derive(Default)]
pub struct UnlockDispatcher {
    strategies: HashMap<ResourceKind, Box<dyn UnlockStrategy>>,
}

impl UnlockDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `strategy` for its kind. A later registration replaces an earlier one.
    pub fn register(&mut self, strategy: Box<dyn UnlockStrategy>) {
        self.strategies.insert(strategy.kind(), strategy);
    }

    pub fn with(mut self, strategy: Box<dyn UnlockStrategy>) -> Self {
        self.register(strategy);
        self
    }

    pub fn supports(&self, kind: ResourceKind) -> bool {
        self.strategies.contains_key(&kind)
    }

    /// Apply one exercised capability to `target` through the strategy for `kind`.
    ///
    /// Returns `StrategyMissing` only when no strategy is registered. A
    /// destroyed target or a failing cascade still yields a report.
    pub fn apply(
        &self,
        kind: ResourceKind,
        capability: CapabilityClass,
        target: &ResourceRef,
        services: &HostServices,
    ) -> BreachResult<UnlockReport> {
        let strategy = self
            .strategies
            .get(&kind)
            .ok_or_else(|| BreachError::StrategyMissing {
                kind: kind.to_string(),
            })?;

        // Step 1
        let device = DeviceClass::from(capability);
        let timestamp = stamp(services.now());
        let ledger = services.ledger();

        let mut report = UnlockReport::new(kind, target.id.clone(), timestamp);
        report.capabilities.push(capability);

        // Steps 2 & 3
        if services.is_alive(&target.id) {
            report.target_written = ledger.write(&target.id, device.capability(), timestamp);
            ledger.mark_breached(kind, &target.id, timestamp);
        } else {
            warn!(
                kind = %kind,
                resource = %target.id,
                capability = %capability,
                "breach target no longer exists, cascading without it"
            );
            report.skip(&target.id);
        }

        // Step 4
        let request = UnlockRequest {
            target,
            capability,
            device,
            timestamp,
        };
        if let Err(e) = strategy.cascade(&request, services, &mut report) {
            warn!(
                kind = %kind,
                resource = %target.id,
                capability = %capability,
                error = %e,
                "cascade incomplete"
            );
        }

        // Step 5
        if !services.settings().radial_unlock_enabled() {
            debug!(resource = %target.id, "radial unlock disabled, position not recorded");
        } else if report.target_written || !report.cascaded.is_empty() {
            services
                .ledger()
                .record_radial_unlock(services.player(), target.position, timestamp);
        } else {
            debug!(resource = %target.id, "nothing unlocked, position not recorded");
        }

        info!(
            kind = %kind,
            resource = %target.id,
            capability = %capability,
            cascaded = report.cascaded.len(),
            exposed = report.exposed.len(),
            skipped = report.skipped.len(),
            "grant applied"
        );

        Ok(report)
    }
}
