//! # breach-store
//!
//! In-memory persistence for the progressive breach engine.
//!
//! ## Overview
//!
//! [`InMemoryStore`] implements
//! [`PersistenceStore`](breach_core::traits::PersistenceStore). It holds the
//! per-resource grant timestamps, exposed flags, breach registries and
//! failure timestamps, plus the bounded per-player failure and radial-unlock
//! histories. The whole state can be exported as a [`StoreSnapshot`] and
//! serialized to JSON for a host save file.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use breach_store::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! // ... run the engine ...
//! let saved = store.to_json()?;
//! let restored = InMemoryStore::from_json(&saved)?;
//! ```

pub mod memory;
pub mod record;

pub use memory::InMemoryStore;
pub use record::{PlayerRecord, ResourceRecord, StoreSnapshot};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use breach_contracts::{
        capability::CapabilityClass,
        error::BreachError,
        grant::{FailureLockout, HISTORY_CAPACITY},
        resource::{PlayerId, ResourceId, ResourceKind, Vec3},
    };
    use breach_core::traits::PersistenceStore;

    use super::{InMemoryStore, StoreSnapshot};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn id(s: &str) -> ResourceId {
        ResourceId::new(s)
    }

    fn at(x: f64) -> Vec3 {
        Vec3::new(x, 0.0, 0.0)
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    /// Unknown resources read as ungranted and unexposed.
    #[test]
    fn test_unknown_resource_reads_as_empty() {
        let store = InMemoryStore::new();
        let grants = store.grants(&id("ghost")).unwrap();

        for class in CapabilityClass::ALL {
            assert!(!grants.is_granted(class));
            assert!(!store.is_exposed(&id("ghost"), class).unwrap());
        }
        assert_eq!(store.direct_breach(&id("ghost")).unwrap(), 0.0);
        assert_eq!(store.failure(&id("ghost")).unwrap(), 0.0);
        assert!(store.record(&id("ghost")).is_none());
    }

    /// Grants are stored per capability slot.
    #[test]
    fn test_set_grant_is_per_capability() {
        let store = InMemoryStore::new();
        store.set_grant(&id("cam-1"), CapabilityClass::Camera, 120.0).unwrap();

        let grants = store.grants(&id("cam-1")).unwrap();
        assert_eq!(grants.get(CapabilityClass::Camera), 120.0);
        assert_eq!(grants.get(CapabilityClass::Basic), 0.0);
        assert_eq!(store.grant_at(&id("cam-1"), CapabilityClass::Camera), 120.0);
    }

    /// `seed_grant` writes through to the same slot the trait reads.
    #[test]
    fn test_seed_grant_visible_through_trait() {
        let store = InMemoryStore::new();
        store.seed_grant(&id("hub-1"), CapabilityClass::Npc, 42.0);

        assert!(store.grants(&id("hub-1")).unwrap().is_granted(CapabilityClass::Npc));
    }

    /// Exposed flags can be set and cleared.
    #[test]
    fn test_exposed_flag_toggles() {
        let store = InMemoryStore::new();
        store.set_exposed(&id("turret-1"), CapabilityClass::Turret, true).unwrap();
        assert!(store.is_exposed(&id("turret-1"), CapabilityClass::Turret).unwrap());
        assert!(!store.is_exposed(&id("turret-1"), CapabilityClass::Camera).unwrap());

        store.set_exposed(&id("turret-1"), CapabilityClass::Turret, false).unwrap();
        assert!(!store.is_exposed(&id("turret-1"), CapabilityClass::Turret).unwrap());
    }

    /// The breach registry lists only resources filed under the queried kind.
    #[test]
    fn test_breached_registry_filters_by_kind() {
        let store = InMemoryStore::new();
        store.mark_breached(ResourceKind::Hub, &id("hub-b"), 10.0).unwrap();
        store.mark_breached(ResourceKind::Hub, &id("hub-a"), 11.0).unwrap();
        store.mark_breached(ResourceKind::Leaf, &id("cam-1"), 12.0).unwrap();

        assert_eq!(store.breached(ResourceKind::Hub).unwrap(), vec![id("hub-a"), id("hub-b")]);
        assert_eq!(store.breached(ResourceKind::Leaf).unwrap(), vec![id("cam-1")]);
        assert!(store.breached(ResourceKind::Mobile).unwrap().is_empty());
        assert_eq!(store.direct_breach(&id("hub-a")).unwrap(), 11.0);
    }

    /// A resource re-breached as another kind moves registries.
    #[test]
    fn test_rebreach_moves_registry() {
        let store = InMemoryStore::new();
        store.mark_breached(ResourceKind::Leaf, &id("x"), 10.0).unwrap();
        store.mark_breached(ResourceKind::Mobile, &id("x"), 20.0).unwrap();

        assert!(store.breached(ResourceKind::Leaf).unwrap().is_empty());
        assert_eq!(store.breached(ResourceKind::Mobile).unwrap(), vec![id("x")]);
    }

    /// The failure history evicts its oldest entry once full.
    #[test]
    fn test_failure_history_evicts_oldest() {
        let store = InMemoryStore::new();
        let player = PlayerId::default();

        for i in 0..=HISTORY_CAPACITY {
            let entry = FailureLockout {
                position: at(i as f64),
                timestamp: (i + 1) as f64,
            };
            store.append_failure(&player, entry).unwrap();
        }

        let history = store.failures(&player).unwrap();
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.timestamps()[0], 2.0, "entry with timestamp 1 was evicted");
        assert_eq!(history.positions().len(), history.timestamps().len());
    }

    /// Pruning removes entries at or before the cutoff and reports how many.
    #[test]
    fn test_prune_failures_by_cutoff() {
        let store = InMemoryStore::new();
        let player = PlayerId::default();
        for ts in [100.0, 200.0, 300.0] {
            store
                .append_failure(&player, FailureLockout { position: at(0.0), timestamp: ts })
                .unwrap();
        }

        let removed = store.prune_failures(&player, 200.0).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(store.failures(&player).unwrap().timestamps(), &[300.0]);
    }

    /// Histories are kept per player.
    #[test]
    fn test_histories_are_per_player() {
        let store = InMemoryStore::new();
        store
            .append_radial_unlock(&PlayerId::new("v"), at(5.0), 50.0)
            .unwrap();

        assert_eq!(store.radial_unlocks(&PlayerId::new("v")).unwrap().len(), 1);
        assert!(store.radial_unlocks(&PlayerId::new("judy")).unwrap().is_empty());
    }

    /// Clones share the same underlying state.
    #[test]
    fn test_clone_shares_state() {
        let store = InMemoryStore::new();
        let other = store.clone();
        other.set_failure(&id("hub-1"), 77.0).unwrap();

        assert_eq!(store.failure(&id("hub-1")).unwrap(), 77.0);
    }

    /// A JSON save restores grants, registries and histories.
    #[test]
    fn test_json_snapshot_restores_state() {
        let store = InMemoryStore::new();
        let player = PlayerId::default();
        store.set_grant(&id("hub-1"), CapabilityClass::Basic, 10.0).unwrap();
        store.set_exposed(&id("cam-1"), CapabilityClass::Camera, true).unwrap();
        store.mark_breached(ResourceKind::Hub, &id("hub-1"), 10.0).unwrap();
        store.append_radial_unlock(&player, at(3.0), 10.0).unwrap();

        let json = store.to_json().unwrap();
        let restored = InMemoryStore::from_json(&json).unwrap();

        assert_eq!(restored.export_snapshot().unwrap(), store.export_snapshot().unwrap());
        assert_eq!(restored.breached(ResourceKind::Hub).unwrap(), vec![id("hub-1")]);
        assert!(restored.is_exposed(&id("cam-1"), CapabilityClass::Camera).unwrap());
    }

    /// Mismatched history arrays in a save are truncated to a consistent length.
    #[test]
    fn test_restore_normalizes_parallel_arrays() {
        let json = r#"{
            "resources": {},
            "players": {
                "player": {
                    "failures": {
                        "positions": [{"x": 0.0, "y": 0.0, "z": 0.0}, {"x": 1.0, "y": 0.0, "z": 0.0}],
                        "timestamps": [5.0]
                    },
                    "radial_unlocks": { "positions": [], "timestamps": [] }
                }
            }
        }"#;

        let store = InMemoryStore::from_json(json).unwrap();
        let failures = store.failures(&PlayerId::default()).unwrap();

        assert_eq!(failures.len(), 1);
        assert_eq!(failures.positions().len(), 1);
    }

    /// Corrupt JSON surfaces as a persistence error.
    #[test]
    fn test_corrupt_json_is_persistence_error() {
        let err = InMemoryStore::from_json("{ not json").unwrap_err();
        assert!(matches!(err, BreachError::Persistence { .. }));
    }

    /// An empty snapshot round-trips to an empty store.
    #[test]
    fn test_empty_snapshot() {
        let store = InMemoryStore::from_snapshot(StoreSnapshot::default());
        assert!(store.export_snapshot().unwrap().resources.is_empty());
    }
}
