//! Cascade helpers shared by the strategies.
//!
//! Two fan-outs exist. A network cascade walks the direct children of a
//! resource through the graph provider. A radial cascade asks the spatial
//! provider for resources around a position and keeps those a predicate
//! accepts. Both write the request's grant timestamp on every live resource
//! they reach, flip the exposed flag where the resource's class matches the
//! granted device type, and skip destroyed resources without stopping.

use tracing::{debug, info};

use breach_contracts::{
    capability::CapabilityClass,
    error::BreachResult,
    resource::{DeviceClass, ResourceRef},
    unlock::UnlockReport,
};
use breach_core::{services::HostServices, traits::UnlockRequest};

/// Grant `request` on one cascaded resource.
fn unlock_one(
    resource: &ResourceRef,
    request: &UnlockRequest<'_>,
    services: &HostServices,
    expose: bool,
    report: &mut UnlockReport,
) {
    if !services.is_alive(&resource.id) {
        debug!(resource = %resource.id, "cascade target destroyed, skipping");
        report.skip(&resource.id);
        return;
    }

    let ledger = services.ledger();
    if ledger.write(&resource.id, request.device.capability(), request.timestamp) {
        report.cascade(&resource.id);
    }
    if expose && ledger.expose(&resource.id, request.device.capability()) {
        report.expose(&resource.id);
    }
}

/// Grant `request` on every direct child of `parent`.
///
/// Children whose class matches the granted device type are exposed. Linked
/// agents are exposed only once the parent itself holds an agent grant,
/// which is re-read here after the dispatcher has written it.
pub fn network_cascade(
    parent: &ResourceRef,
    request: &UnlockRequest<'_>,
    services: &HostServices,
    report: &mut UnlockReport,
) -> BreachResult<usize> {
    let children = services.graph()?.children_of(&parent.id);
    let parent_holds_agents = request.device == DeviceClass::Npc
        && services.ledger().grants(&parent.id).is_granted(CapabilityClass::Npc);

    for child in &children {
        let matches = child.class == request.device;
        let expose = if matches && child.is_agent() && child.traits.linked {
            parent_holds_agents
        } else {
            matches
        };
        unlock_one(child, request, services, expose, report);
    }

    info!(
        resource = %parent.id,
        capability = %request.capability,
        children = children.len(),
        "network cascade complete"
    );
    Ok(children.len())
}

/// Grant `request` on every resource within `radius` of `origin` accepted by `accept`.
///
/// The breach target itself is never re-granted. Hits are re-checked
/// against `radius²`.
pub fn radial_cascade(
    origin: &ResourceRef,
    radius: f64,
    class_filter: Option<DeviceClass>,
    request: &UnlockRequest<'_>,
    services: &HostServices,
    report: &mut UnlockReport,
    accept: impl Fn(&ResourceRef) -> bool,
) -> BreachResult<usize> {
    let hits = services.spatial()?.nearby(&origin.position, radius, class_filter);

    let mut unlocked = 0;
    for hit in hits.iter().filter(|hit| {
        hit.id != origin.id && origin.position.within(&hit.position, radius) && accept(hit)
    }) {
        unlock_one(hit, request, services, hit.class == request.device, report);
        unlocked += 1;
    }

    debug!(
        resource = %origin.id,
        capability = %request.capability,
        radius,
        unlocked,
        "radial cascade complete"
    );
    Ok(unlocked)
}
