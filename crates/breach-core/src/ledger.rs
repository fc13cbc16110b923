//! Grant ledger: the engine's view over `PersistenceStore`.
//!
//! Every method absorbs store errors. A failed read degrades to the
//! permissive answer (ungranted, not locked out), a failed write is logged
//! and reported as `false`. Nothing here can fail a breach.

use breach_contracts::{
    capability::CapabilityClass,
    grant::{BoundedHistory, FailureLockout, GrantSet},
    resource::{PlayerId, ResourceId, ResourceKind, Vec3},
};
use tracing::{debug, warn};

use crate::traits::PersistenceStore;

pub struct GrantLedger<'a> {
    store: &'a dyn PersistenceStore,
}

impl<'a> GrantLedger<'a> {
    pub fn new(store: &'a dyn PersistenceStore) -> Self {
        Self { store }
    }

    /// All four grant timestamps of `resource`; ungranted on read failure.
    pub fn grants(&self, resource: &ResourceId) -> GrantSet {
        self.store.grants(resource).unwrap_or_else(|e| {
            warn!(resource = %resource, error = %e, "grant read failed, treating as ungranted");
            GrantSet::default()
        })
    }

    pub fn write(&self, resource: &ResourceId, capability: CapabilityClass, timestamp: f64) -> bool {
        match self.store.set_grant(resource, capability, timestamp) {
            Ok(()) => {
                debug!(resource = %resource, capability = %capability, timestamp, "grant written");
                true
            }
            Err(e) => {
                warn!(resource = %resource, capability = %capability, error = %e, "grant write failed");
                false
            }
        }
    }

    /// Reset an expired grant to ungranted.
    pub fn reset(&self, resource: &ResourceId, capability: CapabilityClass) -> bool {
        self.write(resource, capability, 0.0)
    }

    pub fn expose(&self, resource: &ResourceId, capability: CapabilityClass) -> bool {
        self.store
            .set_exposed(resource, capability, true)
            .map_err(|e| {
                warn!(resource = %resource, capability = %capability, error = %e, "expose flag write failed");
            })
            .is_ok()
    }

    pub fn mark_breached(&self, kind: ResourceKind, resource: &ResourceId, timestamp: f64) -> bool {
        self.store
            .mark_breached(kind, resource, timestamp)
            .map_err(|e| {
                warn!(kind = %kind, resource = %resource, error = %e, "breach registry write failed");
            })
            .is_ok()
    }

    pub fn is_breached(&self, resource: &ResourceId) -> bool {
        self.store
            .direct_breach(resource)
            .map(|ts| ts > 0.0)
            .unwrap_or_else(|e| {
                warn!(resource = %resource, error = %e, "breach registry read failed");
                false
            })
    }

    pub fn breached(&self, kind: ResourceKind) -> Vec<ResourceId> {
        self.store.breached(kind).unwrap_or_else(|e| {
            warn!(kind = %kind, error = %e, "breach registry read failed");
            Vec::new()
        })
    }

    /// Stamp a failure on the resource and append it to the player's history.
    pub fn record_failure(&self, player: &PlayerId, resource: &ResourceId, position: Vec3, timestamp: f64) {
        if let Err(e) = self.store.set_failure(resource, timestamp) {
            warn!(resource = %resource, error = %e, "failure timestamp write failed");
        }
        if let Err(e) = self.store.append_failure(player, FailureLockout { position, timestamp }) {
            warn!(player = %player, error = %e, "failure history append failed");
        }
    }

    pub fn failure(&self, resource: &ResourceId) -> f64 {
        self.store.failure(resource).unwrap_or_else(|e| {
            warn!(resource = %resource, error = %e, "failure timestamp read failed");
            0.0
        })
    }

    /// Prune stale failures, then return what remains.
    pub fn live_failures(&self, player: &PlayerId, cutoff: f64) -> BoundedHistory {
        match self.store.prune_failures(player, cutoff) {
            Ok(0) => {}
            Ok(pruned) => debug!(player = %player, pruned, "pruned expired failure lockouts"),
            Err(e) => warn!(player = %player, error = %e, "failure history prune failed"),
        }
        self.store.failures(player).unwrap_or_else(|e| {
            warn!(player = %player, error = %e, "failure history read failed");
            BoundedHistory::new()
        })
    }

    pub fn record_radial_unlock(&self, player: &PlayerId, position: Vec3, timestamp: f64) {
        if let Err(e) = self.store.append_radial_unlock(player, position, timestamp) {
            warn!(player = %player, error = %e, "radial unlock history append failed");
        }
    }

    pub fn radial_unlocks(&self, player: &PlayerId) -> BoundedHistory {
        self.store.radial_unlocks(player).unwrap_or_else(|e| {
            warn!(player = %player, error = %e, "radial unlock history read failed");
            BoundedHistory::new()
        })
    }
}
