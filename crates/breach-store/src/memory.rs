//! In-memory implementation of `PersistenceStore`.
//!
//! `InMemoryStore` is the reference implementation of the
//! `PersistenceStore` trait. It keeps the whole `StoreSnapshot` behind an
//! `Arc<Mutex<_>>`, so the engine and the host's save hook can share one
//! store. Use `export_snapshot()` / `to_json()` to persist it and
//! `from_json()` to restore it.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use breach_contracts::{
    capability::CapabilityClass,
    error::{BreachError, BreachResult},
    grant::{BoundedHistory, FailureLockout, GrantSet},
    resource::{PlayerId, ResourceId, ResourceKind, Vec3},
};
use breach_core::traits::PersistenceStore;

use crate::record::{PlayerRecord, ResourceRecord, StoreSnapshot};

/// An in-memory store of grants, registries, and per-player histories.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    pub(crate) state: Arc<Mutex<StoreSnapshot>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a snapshot, re-applying the history bounds.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let StoreSnapshot { resources, players } = snapshot;
        let players = players
            .into_iter()
            .map(|(player, record)| (player, record.normalized()))
            .collect();
        Self {
            state: Arc::new(Mutex::new(StoreSnapshot { resources, players })),
        }
    }

    /// Parse a JSON snapshot produced by `to_json`.
    pub fn from_json(json: &str) -> BreachResult<Self> {
        let snapshot: StoreSnapshot = serde_json::from_str(json).map_err(|e| BreachError::Persistence {
            reason: format!("failed to parse store snapshot: {}", e),
        })?;
        info!(
            resources = snapshot.resources.len(),
            players = snapshot.players.len(),
            "store snapshot restored"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn export_snapshot(&self) -> BreachResult<StoreSnapshot> {
        Ok(self.lock()?.clone())
    }

    pub fn to_json(&self) -> BreachResult<String> {
        let snapshot = self.export_snapshot()?;
        serde_json::to_string(&snapshot).map_err(|e| BreachError::Persistence {
            reason: format!("failed to serialize store snapshot: {}", e),
        })
    }

    /// Write a grant timestamp directly, bypassing the engine.
    ///
    /// For save migration and test setup.
    pub fn seed_grant(&self, resource: &ResourceId, capability: CapabilityClass, timestamp: f64) {
        if let Ok(mut state) = self.lock() {
            state
                .resources
                .entry(resource.clone())
                .or_default()
                .grants
                .set(capability, timestamp);
        }
    }

    /// The raw grant timestamp, `0.0` when absent or unreadable.
    pub fn grant_at(&self, resource: &ResourceId, capability: CapabilityClass) -> f64 {
        self.lock()
            .ok()
            .and_then(|state| state.resources.get(resource).map(|r| r.grants.get(capability)))
            .unwrap_or(0.0)
    }

    /// A copy of the record for `resource`, if anything was ever stored for it.
    pub fn record(&self, resource: &ResourceId) -> Option<ResourceRecord> {
        self.lock().ok().and_then(|state| state.resources.get(resource).cloned())
    }

    fn lock(&self) -> BreachResult<MutexGuard<'_, StoreSnapshot>> {
        self.state.lock().map_err(|e| BreachError::Persistence {
            reason: format!("store lock poisoned: {}", e),
        })
    }

    fn with_resource<T>(&self, resource: &ResourceId, f: impl FnOnce(&mut ResourceRecord) -> T) -> BreachResult<T> {
        let mut state = self.lock()?;
        Ok(f(state.resources.entry(resource.clone()).or_default()))
    }

    fn read_resource<T>(&self, resource: &ResourceId, f: impl FnOnce(&ResourceRecord) -> T) -> BreachResult<T>
    where
        T: Default,
    {
        let state = self.lock()?;
        Ok(state.resources.get(resource).map(f).unwrap_or_default())
    }

    fn with_player<T>(&self, player: &PlayerId, f: impl FnOnce(&mut PlayerRecord) -> T) -> BreachResult<T> {
        let mut state = self.lock()?;
        Ok(f(state.players.entry(player.clone()).or_default()))
    }
}

// ── PersistenceStore impl ─────────────────────────────────────────────────────

impl PersistenceStore for InMemoryStore {
    fn grants(&self, resource: &ResourceId) -> BreachResult<GrantSet> {
        self.read_resource(resource, |r| r.grants)
    }

    fn set_grant(&self, resource: &ResourceId, capability: CapabilityClass, timestamp: f64) -> BreachResult<()> {
        self.with_resource(resource, |r| r.grants.set(capability, timestamp))
    }

    fn set_exposed(&self, resource: &ResourceId, capability: CapabilityClass, exposed: bool) -> BreachResult<()> {
        self.with_resource(resource, |r| r.exposed[capability.index()] = exposed)
    }

    fn is_exposed(&self, resource: &ResourceId, capability: CapabilityClass) -> BreachResult<bool> {
        self.read_resource(resource, |r| r.is_exposed(capability))
    }

    fn mark_breached(&self, kind: ResourceKind, resource: &ResourceId, timestamp: f64) -> BreachResult<()> {
        self.with_resource(resource, |r| {
            r.direct_breach = timestamp;
            r.breached_as = Some(kind);
        })?;
        debug!(kind = %kind, resource = %resource, "resource marked breached");
        Ok(())
    }

    fn direct_breach(&self, resource: &ResourceId) -> BreachResult<f64> {
        self.read_resource(resource, |r| r.direct_breach)
    }

    fn breached(&self, kind: ResourceKind) -> BreachResult<Vec<ResourceId>> {
        let state = self.lock()?;
        Ok(state
            .resources
            .iter()
            .filter(|(_, r)| r.breached_as == Some(kind) && r.direct_breach > 0.0)
            .map(|(id, _)| id.clone())
            .collect())
    }

    fn set_failure(&self, resource: &ResourceId, timestamp: f64) -> BreachResult<()> {
        self.with_resource(resource, |r| r.failure = timestamp)
    }

    fn failure(&self, resource: &ResourceId) -> BreachResult<f64> {
        self.read_resource(resource, |r| r.failure)
    }

    fn failures(&self, player: &PlayerId) -> BreachResult<BoundedHistory> {
        let state = self.lock()?;
        Ok(state
            .players
            .get(player)
            .map(|p| p.failures.clone())
            .unwrap_or_default())
    }

    fn append_failure(&self, player: &PlayerId, entry: FailureLockout) -> BreachResult<()> {
        self.with_player(player, |p| p.failures.push(entry.position, entry.timestamp))
    }

    fn prune_failures(&self, player: &PlayerId, cutoff: f64) -> BreachResult<usize> {
        self.with_player(player, |p| {
            let before = p.failures.len();
            p.failures.retain(|_, timestamp| timestamp > cutoff);
            before - p.failures.len()
        })
    }

    fn radial_unlocks(&self, player: &PlayerId) -> BreachResult<BoundedHistory> {
        let state = self.lock()?;
        Ok(state
            .players
            .get(player)
            .map(|p| p.radial_unlocks.clone())
            .unwrap_or_default())
    }

    fn append_radial_unlock(&self, player: &PlayerId, position: Vec3, timestamp: f64) -> BreachResult<()> {
        self.with_player(player, |p| p.radial_unlocks.push(position, timestamp))
    }
}
