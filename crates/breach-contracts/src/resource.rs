//! Resource identity, kind, and position types.
//!
//! A resource's kind and device class are decided once, when the host
//! creates the `ResourceRef`, and carried explicitly from then on. Nothing
//! downstream probes the host object to find out what it is.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capability::CapabilityClass;

/// Stable identifier for a host resource (device, vehicle, agent).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier for the player whose failure and unlock histories are tracked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self("player".to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The structural kind of a resource. Selects the unlock strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Owns a network of child resources (an access point or computer).
    Hub,
    /// A generic device, possibly connected to a hub.
    Leaf,
    /// Moves independently of any network (a vehicle).
    Mobile,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Hub => "hub",
            ResourceKind::Leaf => "leaf",
            ResourceKind::Mobile => "mobile",
        })
    }
}

/// What a resource is, for capability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceClass {
    Basic,
    Camera,
    Turret,
    Npc,
}

impl DeviceClass {
    /// The capability class that governs access to this device class.
    pub fn capability(self) -> CapabilityClass {
        match self {
            DeviceClass::Basic => CapabilityClass::Basic,
            DeviceClass::Camera => CapabilityClass::Camera,
            DeviceClass::Turret => CapabilityClass::Turret,
            DeviceClass::Npc => CapabilityClass::Npc,
        }
    }
}

impl From<CapabilityClass> for DeviceClass {
    /// The device type a capability implies. A grant is always filed under
    /// this class, never under the class of the resource issuing it.
    fn from(capability: CapabilityClass) -> Self {
        match capability {
            CapabilityClass::Basic => DeviceClass::Basic,
            CapabilityClass::Camera => DeviceClass::Camera,
            CapabilityClass::Turret => DeviceClass::Turret,
            CapabilityClass::Npc => DeviceClass::Npc,
        }
    }
}

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ORIGIN: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared euclidean distance. Radius checks compare against `radius²`.
    pub fn distance_squared(&self, other: &Vec3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// True when `other` lies within `radius` of `self`, boundary inclusive.
    pub fn within(&self, other: &Vec3, radius: f64) -> bool {
        self.distance_squared(other) <= radius * radius
    }
}

/// Per-resource traits the breach rules consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceTraits {
    /// Agent carries the privileged (officer-level) clearance.
    pub privileged: bool,
    /// Agent is unconscious and can be jacked into directly.
    pub unconscious: bool,
    /// Agent is linked to a hub's network.
    pub linked: bool,
}

/// A snapshot of one host resource as seen by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub class: DeviceClass,
    pub position: Vec3,
    /// Connected to some hub's network.
    pub networked: bool,
    pub traits: ResourceTraits,
}

impl ResourceRef {
    pub fn new(id: impl Into<String>, kind: ResourceKind, class: DeviceClass, position: Vec3) -> Self {
        Self {
            id: ResourceId::new(id),
            kind,
            class,
            position,
            networked: false,
            traits: ResourceTraits::default(),
        }
    }

    /// A hub resource. Hubs classify as basic devices.
    pub fn hub(id: impl Into<String>, position: Vec3) -> Self {
        Self::new(id, ResourceKind::Hub, DeviceClass::Basic, position).networked()
    }

    pub fn leaf(id: impl Into<String>, class: DeviceClass, position: Vec3) -> Self {
        Self::new(id, ResourceKind::Leaf, class, position)
    }

    pub fn mobile(id: impl Into<String>, position: Vec3) -> Self {
        Self::new(id, ResourceKind::Mobile, DeviceClass::Basic, position)
    }

    pub fn networked(mut self) -> Self {
        self.networked = true;
        self
    }

    pub fn privileged(mut self) -> Self {
        self.traits.privileged = true;
        self
    }

    pub fn unconscious(mut self) -> Self {
        self.traits.unconscious = true;
        self
    }

    pub fn linked(mut self) -> Self {
        self.traits.linked = true;
        self
    }

    pub fn is_agent(&self) -> bool {
        self.class == DeviceClass::Npc
    }
}
