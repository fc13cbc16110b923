//! Breach points, topology snapshots, and the per-run breach context.

use serde::{Deserialize, Serialize};

use crate::{
    capability::CapabilityClass,
    grant::GrantSet,
    resource::ResourceRef,
};

/// Clearance tier of an unconscious agent used as a breach point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentTier {
    Regular,
    Privileged,
}

/// Device kind of a leaf breached remotely. Decides the fixed offer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeafDeviceKind {
    Generic,
    Camera,
    Turret,
    Vehicle,
    Agent,
}

impl LeafDeviceKind {
    /// The capability classes a remote breach of this leaf kind injects.
    pub fn offered(self) -> &'static [CapabilityClass] {
        match self {
            LeafDeviceKind::Generic | LeafDeviceKind::Vehicle => &[CapabilityClass::Basic],
            LeafDeviceKind::Camera => &[CapabilityClass::Basic, CapabilityClass::Camera],
            LeafDeviceKind::Turret => &[CapabilityClass::Basic, CapabilityClass::Turret],
            LeafDeviceKind::Agent => &CapabilityClass::ALL,
        }
    }
}

/// How a breach was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreachPointKind {
    /// Jacked directly into a network hub.
    Hub,
    /// Breached through a computer that proxies its hub.
    HubProxy,
    /// Breached through a backdoor on a leaf device.
    BackdoorLeaf,
    /// Jacked into an unconscious agent.
    UnconsciousAgent(AgentTier),
    /// Breached remotely from range.
    RemoteLeaf(LeafDeviceKind),
}

impl BreachPointKind {
    pub fn is_remote(self) -> bool {
        matches!(self, BreachPointKind::RemoteLeaf(_))
    }

    pub fn is_hub(self) -> bool {
        matches!(self, BreachPointKind::Hub)
    }

    /// Whether `capability` may be injected at this breach point.
    ///
    /// Remote leaves ignore this table and inject the leaf's fixed set.
    pub fn may_inject(self, capability: CapabilityClass) -> bool {
        use BreachPointKind::*;
        match self {
            RemoteLeaf(leaf) => leaf.offered().contains(&capability),
            Hub | HubProxy => true,
            BackdoorLeaf => matches!(capability, CapabilityClass::Basic | CapabilityClass::Camera),
            UnconsciousAgent(AgentTier::Privileged) => true,
            UnconsciousAgent(AgentTier::Regular) => {
                matches!(capability, CapabilityClass::Basic | CapabilityClass::Npc)
            }
        }
    }
}

/// Which capability classes are structurally reachable from a breach target.
///
/// Recomputed for every breach session; never cached across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopologySnapshot {
    pub basic: bool,
    pub camera: bool,
    pub turret: bool,
    pub npc: bool,
    /// Agents reached through a network link.
    pub linked_npcs: u32,
    /// Agents reached only by radius.
    pub unlinked_npcs: u32,
}

impl TopologySnapshot {
    /// Everything reachable. Used where no information is available and
    /// offering is preferred over hiding.
    pub fn all_reachable() -> Self {
        Self {
            basic: true,
            camera: true,
            turret: true,
            npc: true,
            ..Self::default()
        }
    }

    pub fn has(&self, capability: CapabilityClass) -> bool {
        match capability {
            CapabilityClass::Basic => self.basic,
            CapabilityClass::Camera => self.camera,
            CapabilityClass::Turret => self.turret,
            CapabilityClass::Npc => self.npc,
        }
    }

    pub fn mark(&mut self, capability: CapabilityClass) {
        match capability {
            CapabilityClass::Basic => self.basic = true,
            CapabilityClass::Camera => self.camera = true,
            CapabilityClass::Turret => self.turret = true,
            CapabilityClass::Npc => self.npc = true,
        }
    }

    /// Add the classes `other` confirmed that `self` has not. Never clears a flag.
    pub fn absorb(&mut self, other: &TopologySnapshot) {
        for class in CapabilityClass::ALL {
            if other.has(class) && !self.has(class) {
                self.mark(class);
            }
        }
        self.unlinked_npcs += other.unlinked_npcs;
    }

    /// The reachable classes, in catalog order.
    pub fn reachable(&self) -> Vec<CapabilityClass> {
        CapabilityClass::ALL.into_iter().filter(|c| self.has(*c)).collect()
    }
}

/// Everything one run of the catalog pipeline reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreachContext {
    pub point: BreachPointKind,
    pub target: ResourceRef,
    /// The target's grant timestamps at context construction.
    pub grants: GrantSet,
    pub topology: TopologySnapshot,
}

impl BreachContext {
    pub fn new(
        point: BreachPointKind,
        target: ResourceRef,
        grants: GrantSet,
        topology: TopologySnapshot,
    ) -> Self {
        Self {
            point,
            target,
            grants,
            topology,
        }
    }
}
