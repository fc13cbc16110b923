//! The network topology scanner.
//!
//! `NetworkTopologyScanner` implements the `TopologyScanner` trait from
//! `breach-core`. A scan runs in up to two phases:
//!
//! 1. **Hierarchical**: when the target is a hub, its direct children are
//!    listed through the graph provider (one level, never recursive) and
//!    classified.
//! 2. **Radial**: when the target is not a hub, or the host has spatial
//!    scanning enabled, every resource within `scan_radius` is classified.
//!    Hits are re-checked against `radius²` and resources already seen by
//!    the hierarchical phase are skipped, so each resource counts once.
//!
//! Radial results are absorbed additively: they can add classes, never
//! clear one the hierarchical phase confirmed.
//!
//! The target counts toward its own class unless it is an agent. Without a
//! spatial provider a hub still reports agents reachable, since unlinked
//! agents are only found by the radius scan.

use std::collections::HashSet;

use tracing::{debug, warn};

use breach_contracts::{
    breach::TopologySnapshot,
    capability::CapabilityClass,
    resource::{ResourceId, ResourceKind, ResourceRef},
};
use breach_core::{services::HostServices, traits::TopologyScanner};

use crate::classify::{classify, permissive_fallback, Reach};

/// Classifies reachability through the host's graph and spatial providers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkTopologyScanner {
    /// Overrides `scan_radius` from settings when set.
    radius: Option<f64>,
}

impl NetworkTopologyScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan with a fixed radius instead of the configured one.
    pub fn with_radius(radius: f64) -> Self {
        Self { radius: Some(radius) }
    }

    fn radius(&self, services: &HostServices) -> f64 {
        self.radius.unwrap_or_else(|| services.settings().scan_radius())
    }

    // ── Phases ────────────────────────────────────────────────────────────────

    /// Classify the hub's direct children into `snapshot`. Returns `false`
    /// when the graph is unavailable.
    fn scan_children(
        &self,
        hub: &ResourceRef,
        services: &HostServices,
        seen: &mut HashSet<ResourceId>,
        snapshot: &mut TopologySnapshot,
    ) -> bool {
        let graph = match services.graph() {
            Ok(graph) => graph,
            Err(e) => {
                warn!(resource = %hub.id, error = %e, "hub children unavailable");
                return false;
            }
        };

        for child in graph.children_of(&hub.id) {
            if !services.is_alive(&child.id) || !seen.insert(child.id.clone()) {
                continue;
            }
            classify(&child, Reach::Network, snapshot);
        }

        debug!(
            resource = %hub.id,
            children = seen.len() - 1,
            reachable = ?snapshot.reachable(),
            "hierarchical scan complete"
        );
        true
    }

    /// Classify everything within the scan radius. `None` when there is no
    /// spatial provider.
    fn scan_radius(
        &self,
        target: &ResourceRef,
        services: &HostServices,
        seen: &mut HashSet<ResourceId>,
    ) -> Option<TopologySnapshot> {
        let spatial = match services.spatial() {
            Ok(spatial) => spatial,
            Err(e) => {
                debug!(resource = %target.id, reason = %e, "radial scan skipped");
                return None;
            }
        };

        let radius = self.radius(services);
        let mut snapshot = TopologySnapshot::default();
        let mut hits = 0usize;
        for hit in spatial.nearby(&target.position, radius, None) {
            if !target.position.within(&hit.position, radius) {
                continue;
            }
            if !services.is_alive(&hit.id) || !seen.insert(hit.id.clone()) {
                continue;
            }
            classify(&hit, Reach::Radius, &mut snapshot);
            hits += 1;
        }

        debug!(
            resource = %target.id,
            radius,
            hits,
            reachable = ?snapshot.reachable(),
            "radial scan complete"
        );
        Some(snapshot)
    }
}

impl TopologyScanner for NetworkTopologyScanner {
    fn scan(&self, target: &ResourceRef, services: &HostServices) -> TopologySnapshot {
        let mut seen = HashSet::from([target.id.clone()]);
        let mut snapshot = TopologySnapshot::default();

        if !target.is_agent() {
            snapshot.mark(target.class.capability());
        }

        let is_hub = target.kind == ResourceKind::Hub;
        if is_hub {
            if !self.scan_children(target, services, &mut seen, &mut snapshot) {
                // Hub with no readable network: offer everything.
                return TopologySnapshot::all_reachable();
            }
            if !services.settings().spatial_scan_enabled() {
                if services.spatial().is_err() {
                    snapshot.mark(CapabilityClass::Npc);
                }
                return snapshot;
            }
        }

        match self.scan_radius(target, services, &mut seen) {
            Some(radial) => snapshot.absorb(&radial),
            None if is_hub => {
                debug!(resource = %target.id, "no spatial data, agents assumed reachable");
                snapshot.mark(CapabilityClass::Npc);
            }
            None => {
                debug!(resource = %target.id, "no spatial data, using permissive fallback");
                snapshot.absorb(&permissive_fallback());
            }
        }

        snapshot
    }
}
