//! The breach engine: the host-facing facade.
//!
//! The engine wires the components together in the order a breach unfolds:
//!
//!   Context → Topology → Catalog pipeline → [minigame] → Dispatch → Grant store
//!
//! No method here returns an error to the host. Failures inside the engine
//! are logged and degrade to the conservative answer: offer rather than
//! hide, grant nothing rather than crash.

use std::sync::{Mutex, MutexGuard};

use breach_contracts::{
    breach::{BreachContext, BreachPointKind},
    capability::{CapabilityClass, CatalogEntry},
    grant::{is_expired, stamp, SECONDS_PER_MINUTE},
    resource::{ResourceId, ResourceKind, ResourceRef, Vec3},
    session::SessionToken,
    unlock::UnlockReport,
};
use tracing::{debug, info, warn};

use crate::{
    dispatch::UnlockDispatcher,
    services::HostServices,
    session::SessionBridge,
    traits::{CatalogFilter, TopologyScanner},
};

/// The progressive access-control engine for one player.
pub struct BreachEngine {
    services: HostServices,
    catalog: Box<dyn CatalogFilter>,
    scanner: Box<dyn TopologyScanner>,
    dispatcher: UnlockDispatcher,
    sessions: Mutex<SessionBridge>,
}

impl BreachEngine {
    /// Create an engine from the host services and the three components.
    pub fn new(
        services: HostServices,
        catalog: Box<dyn CatalogFilter>,
        scanner: Box<dyn TopologyScanner>,
        dispatcher: UnlockDispatcher,
    ) -> Self {
        Self {
            services,
            catalog,
            scanner,
            dispatcher,
            sessions: Mutex::new(SessionBridge::new()),
        }
    }

    pub fn services(&self) -> &HostServices {
        &self.services
    }

    // ── Offer time ───────────────────────────────────────────────────────────

    /// Scan the target's topology and read its grants into a fresh context.
    pub fn open_context(&self, point: BreachPointKind, target: &ResourceRef) -> BreachContext {
        let topology = self.scanner.scan(target, &self.services);
        let grants = self.services.ledger().grants(&target.id);

        debug!(
            resource = %target.id,
            point = ?point,
            reachable = ?topology.reachable(),
            "breach context opened"
        );

        BreachContext::new(point, target.clone(), grants, topology)
    }

    /// Run the catalog filter pipeline over `ctx`.
    pub fn evaluate_catalog(&self, ctx: &BreachContext) -> Vec<CatalogEntry> {
        let offered = self.catalog.evaluate(ctx, &self.services);
        info!(
            resource = %ctx.target.id,
            offered = offered.len(),
            "catalog evaluated"
        );
        offered
    }

    /// Open a context for `target` and evaluate the catalog in one call.
    pub fn offer(&self, point: BreachPointKind, target: &ResourceRef) -> Vec<CatalogEntry> {
        let ctx = self.open_context(point, target);
        self.evaluate_catalog(&ctx)
    }

    // ── Grant application ────────────────────────────────────────────────────

    /// Apply one exercised capability to `resource` with the strategy for `kind`.
    pub fn apply_grant(
        &self,
        kind: ResourceKind,
        capability: CapabilityClass,
        resource: &ResourceRef,
    ) -> UnlockReport {
        self.dispatcher
            .apply(kind, capability, resource, &self.services)
            .unwrap_or_else(|e| {
                warn!(kind = %kind, resource = %resource.id, error = %e, "grant not applied");
                UnlockReport::new(kind, resource.id.clone(), stamp(self.services.now()))
            })
    }

    /// Apply several exercised capabilities in order, merging the reports.
    pub fn apply_grants(
        &self,
        kind: ResourceKind,
        capabilities: &[CapabilityClass],
        resource: &ResourceRef,
    ) -> UnlockReport {
        let mut combined = UnlockReport::new(kind, resource.id.clone(), stamp(self.services.now()));
        for capability in capabilities {
            combined.merge(self.apply_grant(kind, *capability, resource));
        }
        combined
    }

    /// Record a failed or cancelled breach of `resource`.
    ///
    /// Stamps the resource's own failure time and appends the position to
    /// the player's failure history. A no-op when lockouts are disabled.
    pub fn apply_failure_penalty(&self, kind: ResourceKind, resource: &ResourceRef) {
        if !self.services.settings().lockout_enabled() {
            debug!(kind = %kind, resource = %resource.id, "lockout disabled, no penalty applied");
            return;
        }
        let now = self.services.now();
        self.services.ledger().record_failure(
            self.services.player(),
            &resource.id,
            resource.position,
            stamp(now),
        );
        info!(
            kind = %kind,
            resource = %resource.id,
            lockout_minutes = self.services.settings().lockout_minutes(),
            "breach failure recorded"
        );
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// True when `capability` is granted on `resource` and has not expired.
    ///
    /// Read-only: an expired grant reads as not granted but is not reset.
    pub fn is_already_granted(&self, resource: &ResourceRef, capability: CapabilityClass) -> bool {
        self.services
            .ledger()
            .grants(&resource.id)
            .grant(&resource.id, capability)
            .is_active(self.services.now(), self.services.settings().ttl_hours())
    }

    /// True when a recent failure locks `resource` out of remote breaching.
    ///
    /// Locked when the resource's own failure is inside the lockout window,
    /// or when any recorded failure inside the window lies within the
    /// lockout radius of the resource (boundary inclusive). Stale history
    /// entries are pruned here.
    pub fn is_locked_out(&self, resource: &ResourceRef) -> bool {
        let settings = self.services.settings();
        if !settings.lockout_enabled() {
            return false;
        }

        let now = self.services.now();
        let window = settings.lockout_minutes() * SECONDS_PER_MINUTE;
        let ledger = self.services.ledger();

        let own_failure = ledger.failure(&resource.id);
        if own_failure > 0.0 && now - own_failure < window {
            debug!(resource = %resource.id, "locked out by own failure");
            return true;
        }

        let radius = settings.lockout_radius();
        let locked = ledger
            .live_failures(self.services.player(), now - window)
            .entries()
            .any(|failure| failure.covers(&resource.position, now, window, radius));

        if locked {
            debug!(resource = %resource.id, "locked out by nearby failure");
        }
        locked
    }

    /// True when `position` lies inside a still-valid radial unlock.
    pub fn is_radially_unlocked(&self, position: &Vec3) -> bool {
        let settings = self.services.settings();
        if !settings.radial_unlock_enabled() {
            return false;
        }
        let now = self.services.now();
        let ttl_hours = settings.ttl_hours();
        let radius = settings.unlock_radius();

        self.services
            .ledger()
            .radial_unlocks(self.services.player())
            .entries()
            .any(|unlock| {
                !is_expired(unlock.timestamp, now, ttl_hours) && unlock.position.within(position, radius)
            })
    }

    /// True when `resource` was breached directly and is in the registry for `kind`.
    pub fn is_breached(&self, kind: ResourceKind, resource: &ResourceId) -> bool {
        let ledger = self.services.ledger();
        ledger.is_breached(resource) && ledger.breached(kind).contains(resource)
    }

    pub fn breached_resources(&self, kind: ResourceKind) -> Vec<ResourceId> {
        self.services.ledger().breached(kind)
    }

    // ── Sessions ─────────────────────────────────────────────────────────────

    fn sessions(&self) -> MutexGuard<'_, SessionBridge> {
        // The bridge holds plain data; a panic elsewhere cannot leave it torn.
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record `resource` as under breach and return the token the host
    /// passes back in the minigame callback.
    pub fn begin_session(&self, kind: ResourceKind, resource: &ResourceRef) -> SessionToken {
        let token = self.sessions().begin(kind, resource.clone(), self.services.now());
        debug!(kind = %kind, resource = %resource.id, token = %token, "breach session opened");
        token
    }

    /// Success callback: apply every exercised capability to the session's resource.
    ///
    /// Returns `None` when the token is unknown or already consumed.
    /// The session is cleared by the first callback, so a retry needs a
    /// fresh `begin_session`.
    pub fn complete_success(
        &self,
        token: &SessionToken,
        capabilities: &[CapabilityClass],
    ) -> Option<UnlockReport> {
        let consumed = self.sessions().consume(token);
        let entry = match consumed {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "success callback ignored");
                return None;
            }
        };
        Some(self.apply_grants(entry.kind, capabilities, &entry.resource))
    }

    /// Failure or cancellation callback: apply the lockout penalty.
    ///
    /// Returns false when the token is unknown or already consumed.
    /// The session is cleared by the first callback, so a retry needs a
    /// fresh `begin_session`.
    pub fn complete_failure(&self, token: &SessionToken) -> bool {
        let consumed = self.sessions().consume(token);
        match consumed {
            Ok(entry) => {
                self.apply_failure_penalty(entry.kind, &entry.resource);
                true
            }
            Err(e) => {
                warn!(error = %e, "failure callback ignored");
                false
            }
        }
    }

    /// The resource currently under breach for `kind`, if any.
    pub fn active_session(&self, kind: ResourceKind) -> Option<ResourceRef> {
        self.sessions().active(kind).map(|entry| entry.resource.clone())
    }
}
