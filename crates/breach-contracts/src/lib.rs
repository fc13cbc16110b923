//! # breach-contracts
//!
//! Shared types, grant records, and error contracts for the progressive
//! breach engine.
//!
//! All crates in the workspace import from here. Only data definitions and
//! pure helpers (TTL expiry, distance checks, bounded histories) live here.

pub mod breach;
pub mod capability;
pub mod error;
pub mod grant;
pub mod resource;
pub mod session;
pub mod unlock;

#[cfg(test)]
mod tests {
    use super::*;
    use breach::{AgentTier, BreachPointKind, LeafDeviceKind, TopologySnapshot};
    use capability::{CapabilityClass, CatalogEntry, EntryCategory};
    use error::BreachError;
    use grant::{is_expired, BoundedHistory, GrantSet, HISTORY_CAPACITY};
    use resource::{DeviceClass, ResourceId, ResourceKind, Vec3};
    use unlock::UnlockReport;

    // ── TTL ──────────────────────────────────────────────────────────────────

    #[test]
    fn ttl_boundary_is_strict() {
        // One hour TTL, granted at t=100.
        assert!(!is_expired(100.0, 100.0 + 3599.0, 1.0));
        assert!(!is_expired(100.0, 100.0 + 3600.0, 1.0));
        assert!(is_expired(100.0, 100.0 + 3600.5, 1.0));
    }

    #[test]
    fn permanent_mode_never_expires() {
        assert!(!is_expired(1.0, 1.0e12, 0.0));
    }

    #[test]
    fn ungranted_is_never_expired() {
        assert!(!is_expired(0.0, 1.0e9, 1.0));
    }

    #[test]
    fn grant_set_slots_are_independent() {
        let mut grants = GrantSet::default();
        grants.set(CapabilityClass::Npc, 42.0);

        assert!(grants.is_granted(CapabilityClass::Npc));
        assert!(!grants.is_granted(CapabilityClass::Basic));
        assert_eq!(grants.get(CapabilityClass::Npc), 42.0);

        grants.reset(CapabilityClass::Npc);
        assert!(!grants.is_granted(CapabilityClass::Npc));
    }

    #[test]
    fn grant_active_until_ttl() {
        let id = ResourceId::new("door-1");
        let grants = GrantSet::default().with(CapabilityClass::Camera, 100.0);

        let camera = grants.grant(&id, CapabilityClass::Camera);
        assert_eq!(camera.resource, id);
        assert!(camera.is_active(100.0 + 3600.0, 1.0));
        assert!(!camera.is_active(100.0 + 3601.0, 1.0));
        assert!(camera.is_active(1.0e12, 0.0));

        let turret = grants.grant(&id, CapabilityClass::Turret);
        assert!(!turret.is_granted());
        assert!(!turret.is_active(100.0, 0.0));
    }

    // ── BoundedHistory ───────────────────────────────────────────────────────

    #[test]
    fn history_evicts_oldest_at_capacity() {
        let mut history = BoundedHistory::new();
        for i in 0..=HISTORY_CAPACITY {
            history.push(Vec3::new(i as f64, 0.0, 0.0), i as f64 + 1.0);
        }

        // 51 pushes, 50 kept, the first one gone.
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.timestamps()[0], 2.0);
        assert_eq!(history.positions().len(), history.timestamps().len());
    }

    #[test]
    fn history_from_parts_truncates_to_shorter_array_and_capacity() {
        let positions = vec![Vec3::ORIGIN; 60];
        let timestamps: Vec<f64> = (0..70).map(|t| t as f64).collect();
        let history = BoundedHistory::from_parts(positions, timestamps);

        assert_eq!(history.len(), HISTORY_CAPACITY);
        // Ten oldest of the 60 paired entries were dropped.
        assert_eq!(history.timestamps()[0], 10.0);
    }

    #[test]
    fn history_retain_keeps_arrays_parallel() {
        let mut history = BoundedHistory::new();
        history.push(Vec3::new(1.0, 0.0, 0.0), 10.0);
        history.push(Vec3::new(2.0, 0.0, 0.0), 20.0);
        history.push(Vec3::new(3.0, 0.0, 0.0), 30.0);

        history.retain(|_, ts| ts >= 20.0);

        assert_eq!(history.timestamps(), &[20.0, 30.0]);
        assert_eq!(history.positions()[0].x, 2.0);
    }

    #[test]
    fn lockout_radius_is_inclusive() {
        let mut history = BoundedHistory::new();
        history.push(Vec3::ORIGIN, 0.0);
        let entry = history.entries().next().unwrap();

        assert!(entry.covers(&Vec3::new(50.0, 0.0, 0.0), 60.0, 600.0, 50.0));
        assert!(!entry.covers(&Vec3::new(50.001, 0.0, 0.0), 60.0, 600.0, 50.0));
        assert!(!entry.covers(&Vec3::new(10.0, 0.0, 0.0), 600.0, 600.0, 50.0));
    }

    // ── Breach points ────────────────────────────────────────────────────────

    #[test]
    fn injection_table_matches_breach_point() {
        use CapabilityClass::*;

        let backdoor = BreachPointKind::BackdoorLeaf;
        assert!(backdoor.may_inject(Basic));
        assert!(backdoor.may_inject(Camera));
        assert!(!backdoor.may_inject(Turret));
        assert!(!backdoor.may_inject(Npc));

        let regular = BreachPointKind::UnconsciousAgent(AgentTier::Regular);
        assert!(regular.may_inject(Npc));
        assert!(!regular.may_inject(Camera));
        assert!(!regular.may_inject(Turret));

        let privileged = BreachPointKind::UnconsciousAgent(AgentTier::Privileged);
        assert!(CapabilityClass::ALL.iter().all(|c| privileged.may_inject(*c)));
        assert!(CapabilityClass::ALL.iter().all(|c| BreachPointKind::HubProxy.may_inject(*c)));
    }

    #[test]
    fn remote_leaf_injects_fixed_subset() {
        let turret = BreachPointKind::RemoteLeaf(LeafDeviceKind::Turret);
        let offered: Vec<CapabilityClass> = CapabilityClass::ALL
            .into_iter()
            .filter(|c| turret.may_inject(*c))
            .collect();
        assert_eq!(offered, vec![CapabilityClass::Basic, CapabilityClass::Turret]);
        assert!(turret.is_remote());
    }

    #[test]
    fn topology_absorb_only_adds() {
        let mut hierarchical = TopologySnapshot {
            basic: true,
            camera: true,
            ..TopologySnapshot::default()
        };
        let radial = TopologySnapshot {
            turret: true,
            unlinked_npcs: 0,
            ..TopologySnapshot::default()
        };
        hierarchical.absorb(&radial);

        assert_eq!(
            hierarchical.reachable(),
            vec![CapabilityClass::Basic, CapabilityClass::Camera, CapabilityClass::Turret]
        );
    }

    // ── Misc ─────────────────────────────────────────────────────────────────

    #[test]
    fn device_class_round_trips_through_capability() {
        for capability in CapabilityClass::ALL {
            assert_eq!(DeviceClass::from(capability).capability(), capability);
        }
    }

    #[test]
    fn catalog_entry_category_parses_kebab_case() {
        let entry: CatalogEntry =
            serde_json::from_str(r#"{"id":"shutdown","capability":"turret","category":"hub-only"}"#)
                .unwrap();
        assert_eq!(entry.category, EntryCategory::HubOnly);
        assert!(entry.is_hub_only());
        assert!(!entry.is_reward());
    }

    #[test]
    fn unlock_report_merge_deduplicates() {
        let target = ResourceId::new("hub-1");
        let mut first = UnlockReport::new(ResourceKind::Hub, target.clone(), 10.0);
        first.capabilities.push(CapabilityClass::Basic);
        first.cascade(&ResourceId::new("door-1"));

        let mut second = UnlockReport::new(ResourceKind::Hub, target, 12.0);
        second.capabilities.push(CapabilityClass::Camera);
        second.target_written = true;
        second.cascade(&ResourceId::new("door-1"));
        second.expose(&ResourceId::new("cam-1"));

        first.merge(second);
        assert_eq!(first.capabilities, vec![CapabilityClass::Basic, CapabilityClass::Camera]);
        assert_eq!(first.cascaded.len(), 1);
        assert_eq!(first.exposed.len(), 1);
        assert_eq!(first.timestamp, 12.0);
        assert!(first.target_written);
    }

    #[test]
    fn error_display_messages() {
        let err = BreachError::MissingCollaborator {
            collaborator: "spatial".to_string(),
        };
        assert!(err.to_string().contains("spatial"));

        let err = BreachError::UnknownSession {
            token: "abc".to_string(),
        };
        assert!(err.to_string().contains("unknown breach session"));
    }
}
