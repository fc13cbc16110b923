//! Capability classes and catalog entries.
//!
//! A breach unlocks access one capability class at a time. The set of
//! classes is closed: every match over `CapabilityClass` is exhaustive, so a
//! new class cannot be added without visiting every consumer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four grantable subnet types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityClass {
    /// Generic devices: doors, terminals, lights, vending machines.
    Basic,
    /// Surveillance cameras.
    Camera,
    /// Automated turrets.
    Turret,
    /// Networked agents (guards wired into the building network).
    Npc,
}

impl CapabilityClass {
    /// Every class, in catalog order.
    pub const ALL: [CapabilityClass; 4] = [
        CapabilityClass::Basic,
        CapabilityClass::Camera,
        CapabilityClass::Turret,
        CapabilityClass::Npc,
    ];

    /// Stable slot index used by fixed-size per-class arrays.
    pub fn index(self) -> usize {
        match self {
            CapabilityClass::Basic => 0,
            CapabilityClass::Camera => 1,
            CapabilityClass::Turret => 2,
            CapabilityClass::Npc => 3,
        }
    }

    /// Short lowercase name used in logs and display ids.
    pub fn as_str(self) -> &'static str {
        match self {
            CapabilityClass::Basic => "basic",
            CapabilityClass::Camera => "camera",
            CapabilityClass::Turret => "turret",
            CapabilityClass::Npc => "npc",
        }
    }
}

impl fmt::Display for CapabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a catalog entry is treated by the access restrictions.
///
/// In TOML catalogs this is written kebab-case:
/// ```toml
/// category = "unlock"
/// category = "hub-only"
/// category = "reward"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryCategory {
    /// A plain subnet unlock.
    #[default]
    Unlock,
    /// Only offered when the breach reaches hub-level access.
    HubOnly,
    /// A post-success reward; suppressed when rewards are granted automatically.
    Reward,
}

/// A candidate offer in the current breach session.
///
/// Entries are rebuilt for every breach session and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display identifier shown by the minigame UI (e.g. "unlock-camera").
    pub id: String,
    /// The capability class this entry grants or depends on.
    pub capability: CapabilityClass,
    /// Access category used by the restriction rules.
    #[serde(default)]
    pub category: EntryCategory,
}

impl CatalogEntry {
    /// The standard unlock entry for `capability`.
    pub fn unlock(capability: CapabilityClass) -> Self {
        Self {
            id: format!("unlock-{}", capability.as_str()),
            capability,
            category: EntryCategory::Unlock,
        }
    }

    /// An entry with an explicit id and category.
    pub fn new(id: impl Into<String>, capability: CapabilityClass, category: EntryCategory) -> Self {
        Self {
            id: id.into(),
            capability,
            category,
        }
    }

    pub fn is_hub_only(&self) -> bool {
        self.category == EntryCategory::HubOnly
    }

    pub fn is_reward(&self) -> bool {
        self.category == EntryCategory::Reward
    }
}
