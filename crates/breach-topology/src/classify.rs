//! Per-resource classification into topology flags.

use breach_contracts::{
    breach::TopologySnapshot,
    resource::{DeviceClass, ResourceRef},
};

/// How a resource was reached by the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Direct child of the hub under breach.
    Network,
    /// Found by the radius scan only.
    Radius,
}

/// Mark the class of `resource` in `snapshot`.
///
/// Agents are additionally tallied: a network child counts as linked when it
/// carries the linked trait, a radius hit always counts as unlinked.
pub fn classify(resource: &ResourceRef, reach: Reach, snapshot: &mut TopologySnapshot) {
    snapshot.mark(resource.class.capability());

    if resource.class == DeviceClass::Npc {
        match reach {
            Reach::Network if resource.traits.linked => snapshot.linked_npcs += 1,
            _ => snapshot.unlinked_npcs += 1,
        }
    }
}

/// The snapshot used when no spatial information exists for a non-hub target.
///
/// Basic and agents are assumed reachable; cameras and turrets are not.
pub fn permissive_fallback() -> TopologySnapshot {
    TopologySnapshot {
        basic: true,
        npc: true,
        ..TopologySnapshot::default()
    }
}
