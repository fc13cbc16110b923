//! Trait definitions for the breach engine.
//!
//! Two groups of traits live here.
//!
//! Host collaborators, implemented by the game host:
//!
//! - `ResourceGraphProvider` — one-level network traversal
//! - `SpatialQueryProvider`  — bounded radius scans
//! - `Clock`                 — monotonic in-world time
//! - `SettingsProvider`      — read-only configuration
//! - `PersistenceStore`      — grant timestamps and per-player histories
//!
//! Engine seams, implemented by the component crates:
//!
//! - `CatalogFilter`   — narrows the candidate catalog (breach-catalog)
//! - `TopologyScanner` — classifies reachability (breach-topology)
//! - `UnlockStrategy`  — per-kind cascade (breach-unlock)
//!
//! All engine logic runs on the host's main simulation step. The `Send +
//! Sync` bounds let hosts keep collaborators in shared handles; they do not
//! imply parallel execution.

use breach_contracts::{
    breach::{BreachContext, TopologySnapshot},
    capability::{CapabilityClass, CatalogEntry},
    error::BreachResult,
    grant::{BoundedHistory, FailureLockout, GrantSet},
    resource::{DeviceClass, PlayerId, ResourceId, ResourceKind, ResourceRef, Vec3},
    unlock::UnlockReport,
};

use crate::services::HostServices;

// ── Host collaborators ───────────────────────────────────────────────────────

/// Network structure of the host world.
pub trait ResourceGraphProvider: Send + Sync {
    /// Direct children of `hub`. One level only, never recursive.
    fn children_of(&self, hub: &ResourceId) -> Vec<ResourceRef>;

    /// Whether `id` still exists. Resources can be destroyed between the
    /// moment a breach is offered and the moment its grant is applied.
    fn is_alive(&self, _id: &ResourceId) -> bool {
        true
    }
}

/// Spatial index of the host world.
pub trait SpatialQueryProvider: Send + Sync {
    /// Resources near `origin`, optionally restricted to one device class.
    ///
    /// Implementations may return a coarse superset; callers re-check each
    /// hit against `radius²`.
    fn nearby(&self, origin: &Vec3, radius: f64, class_filter: Option<DeviceClass>) -> Vec<ResourceRef>;
}

/// Monotonic in-world time, in seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> f64;
}

/// Read-only access to the player-facing settings.
pub trait SettingsProvider: Send + Sync {
    /// Grant lifetime in hours. `0` is permanent mode.
    fn ttl_hours(&self) -> f64;
    /// How long a failed breach locks out the area, in minutes.
    fn lockout_minutes(&self) -> f64;
    fn lockout_enabled(&self) -> bool;
    /// Radius around a failure position that is locked out.
    fn lockout_radius(&self) -> f64;
    /// Radius of radial unlocks after a successful breach.
    fn unlock_radius(&self) -> f64;
    /// Radius of the topology fallback scan.
    fn scan_radius(&self) -> f64;
    /// Rewards are granted automatically after success instead of offered.
    fn auto_reward_granting(&self) -> bool;
    fn radial_unlock_enabled(&self) -> bool;
    /// Use the spatial provider even when a hub network is available.
    fn spatial_scan_enabled(&self) -> bool;
}

/// Durable state owned by the host's save system.
///
/// Per resource: four grant timestamps, a direct-breach timestamp, a failure
/// timestamp, and the exposed flags. Per player: two bounded histories.
pub trait PersistenceStore: Send + Sync {
    fn grants(&self, resource: &ResourceId) -> BreachResult<GrantSet>;

    fn set_grant(&self, resource: &ResourceId, capability: CapabilityClass, timestamp: f64) -> BreachResult<()>;

    /// Flip the externally visible "capabilities exposed" flag.
    fn set_exposed(&self, resource: &ResourceId, capability: CapabilityClass, exposed: bool) -> BreachResult<()>;

    fn is_exposed(&self, resource: &ResourceId, capability: CapabilityClass) -> BreachResult<bool>;

    /// Record a direct breach of `resource` in the registry for `kind`.
    fn mark_breached(&self, kind: ResourceKind, resource: &ResourceId, timestamp: f64) -> BreachResult<()>;

    /// Direct-breach timestamp, `0.0` if never breached directly.
    fn direct_breach(&self, resource: &ResourceId) -> BreachResult<f64>;

    /// Every resource recorded in the registry for `kind`.
    fn breached(&self, kind: ResourceKind) -> BreachResult<Vec<ResourceId>>;

    fn set_failure(&self, resource: &ResourceId, timestamp: f64) -> BreachResult<()>;

    /// Last failure timestamp on `resource`, `0.0` if none.
    fn failure(&self, resource: &ResourceId) -> BreachResult<f64>;

    fn failures(&self, player: &PlayerId) -> BreachResult<BoundedHistory>;

    /// Append to the player's failure history, evicting the oldest past capacity.
    fn append_failure(&self, player: &PlayerId, entry: FailureLockout) -> BreachResult<()>;

    /// Drop failures stamped at or before `cutoff`. Returns how many were dropped.
    fn prune_failures(&self, player: &PlayerId, cutoff: f64) -> BreachResult<usize>;

    fn radial_unlocks(&self, player: &PlayerId) -> BreachResult<BoundedHistory>;

    fn append_radial_unlock(&self, player: &PlayerId, position: Vec3, timestamp: f64) -> BreachResult<()>;
}

// ── Engine seams ─────────────────────────────────────────────────────────────

/// Turns the candidate catalog into the entries actually offered.
pub trait CatalogFilter: Send + Sync {
    /// Run every filter rule in order against `ctx`.
    ///
    /// May write to the store (expired grants are reset to `0.0`). Running
    /// twice without an intervening grant change yields the same list.
    fn evaluate(&self, ctx: &BreachContext, services: &HostServices) -> Vec<CatalogEntry>;
}

/// Classifies which capability classes are reachable from a breach target.
pub trait TopologyScanner: Send + Sync {
    fn scan(&self, target: &ResourceRef, services: &HostServices) -> TopologySnapshot;
}

/// One successful capability exercise, as handed to a strategy.
#[derive(Debug, Clone, Copy)]
pub struct UnlockRequest<'a> {
    pub target: &'a ResourceRef,
    pub capability: CapabilityClass,
    /// Device type implied by the capability (not by the target).
    pub device: DeviceClass,
    /// The grant timestamp being written.
    pub timestamp: f64,
}

/// Kind-specific grant propagation.
///
/// The shared steps (timestamp write, registry mark, history record) run in
/// the dispatcher; a strategy only supplies the cascade.
pub trait UnlockStrategy: Send + Sync {
    fn kind(&self) -> ResourceKind;

    /// Propagate the grant in `request` beyond the target itself.
    ///
    /// Destroyed resources are skipped and recorded in `report.skipped`; the
    /// rest of the cascade still runs.
    fn cascade(
        &self,
        request: &UnlockRequest<'_>,
        services: &HostServices,
        report: &mut UnlockReport,
    ) -> BreachResult<()>;
}
