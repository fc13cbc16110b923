//! Persisted record layout.
//!
//! `StoreSnapshot` is the full persisted state of the engine, shaped the way
//! a host save file stores it:
//!
//!   per resource: four grant timestamps, a direct-breach timestamp, a
//!                 failure timestamp, and the exposed flags
//!   per player:   two pairs of parallel bounded arrays (failures and radial
//!                 unlocks), each capped at 50 entries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use breach_contracts::{
    capability::CapabilityClass,
    grant::{BoundedHistory, GrantSet},
    resource::{PlayerId, ResourceId, ResourceKind},
};

/// Everything persisted for one resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub grants: GrantSet,
    /// Capabilities currently exposed to the player, by class slot.
    pub exposed: [bool; 4],
    /// When the resource was last breached directly; `0.0` if never.
    pub direct_breach: f64,
    /// Registry the direct breach was filed under.
    pub breached_as: Option<ResourceKind>,
    /// Last failed breach on this resource; `0.0` if none.
    pub failure: f64,
}

impl ResourceRecord {
    pub fn is_exposed(&self, capability: CapabilityClass) -> bool {
        self.exposed[capability.index()]
    }
}

/// Bounded per-player histories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub failures: BoundedHistory,
    pub radial_unlocks: BoundedHistory,
}

impl PlayerRecord {
    /// Re-apply the history invariants to data read from outside.
    pub fn normalized(self) -> Self {
        let normalize = |history: BoundedHistory| {
            BoundedHistory::from_parts(history.positions().to_vec(), history.timestamps().to_vec())
        };
        Self {
            failures: normalize(self.failures),
            radial_unlocks: normalize(self.radial_unlocks),
        }
    }
}

/// The complete persisted state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub resources: BTreeMap<ResourceId, ResourceRecord>,
    pub players: BTreeMap<PlayerId, PlayerRecord>,
}
