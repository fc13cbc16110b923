//! # breach-topology
//!
//! Reachability scanning for breach targets.
//!
//! [`NetworkTopologyScanner`] implements
//! [`TopologyScanner`](breach_core::traits::TopologyScanner): a one-level
//! walk of a hub's network, plus a bounded radius scan for non-hub targets
//! or hosts with spatial scanning enabled. Without spatial data a non-hub
//! target falls back to the permissive snapshot (basic and agents
//! reachable).

pub mod classify;
pub mod scanner;

pub use scanner::NetworkTopologyScanner;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{
        collections::{HashMap, HashSet},
        sync::{Arc, Mutex},
    };

    use breach_contracts::{
        capability::CapabilityClass,
        resource::{DeviceClass, ResourceId, ResourceRef, Vec3},
    };
    use breach_core::{
        traits::{ResourceGraphProvider, SpatialQueryProvider, TopologyScanner},
        BreachSettings, HostServices, ManualClock,
    };
    use breach_store::InMemoryStore;

    use crate::NetworkTopologyScanner;

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// A tiny world. `nearby` returns every resource of the requested class,
    /// ignoring distance, so the scanner's own radius check is exercised.
    #[derive(Default)]
    struct TestWorld {
        children: HashMap<ResourceId, Vec<ResourceRef>>,
        placed: Vec<ResourceRef>,
        dead: Mutex<HashSet<ResourceId>>,
    }

    impl TestWorld {
        fn with_children(mut self, hub: &str, children: Vec<ResourceRef>) -> Self {
            self.children.insert(ResourceId::new(hub), children);
            self
        }

        fn with_placed(mut self, resource: ResourceRef) -> Self {
            self.placed.push(resource);
            self
        }

        fn destroy(&self, id: &str) {
            self.dead.lock().unwrap().insert(ResourceId::new(id));
        }
    }

    impl ResourceGraphProvider for TestWorld {
        fn children_of(&self, hub: &ResourceId) -> Vec<ResourceRef> {
            self.children.get(hub).cloned().unwrap_or_default()
        }

        fn is_alive(&self, id: &ResourceId) -> bool {
            !self.dead.lock().unwrap().contains(id)
        }
    }

    impl SpatialQueryProvider for TestWorld {
        fn nearby(&self, _origin: &Vec3, _radius: f64, class_filter: Option<DeviceClass>) -> Vec<ResourceRef> {
            self.placed
                .iter()
                .filter(|r| class_filter.map_or(true, |c| r.class == c))
                .cloned()
                .collect()
        }
    }

    fn services(settings: BreachSettings) -> HostServices {
        HostServices::new(
            Arc::new(ManualClock::at(100.0)),
            Arc::new(settings),
            Arc::new(InMemoryStore::new()),
        )
    }

    fn with_graph(world: Arc<TestWorld>, settings: BreachSettings) -> HostServices {
        services(settings).with_graph(world)
    }

    fn with_both(world: Arc<TestWorld>, settings: BreachSettings) -> HostServices {
        services(settings).with_graph(world.clone()).with_spatial(world)
    }

    fn at(x: f64) -> Vec3 {
        Vec3::new(x, 0.0, 0.0)
    }

    fn hub() -> ResourceRef {
        ResourceRef::hub("hub-1", Vec3::ORIGIN)
    }

    fn camera(id: &str, x: f64) -> ResourceRef {
        ResourceRef::leaf(id, DeviceClass::Camera, at(x)).networked()
    }

    fn turret(id: &str, x: f64) -> ResourceRef {
        ResourceRef::leaf(id, DeviceClass::Turret, at(x)).networked()
    }

    fn agent(id: &str, x: f64) -> ResourceRef {
        ResourceRef::leaf(id, DeviceClass::Npc, at(x))
    }

    // ── Hierarchical ──────────────────────────────────────────────────────────

    /// A hub with a single camera child reaches basic (itself) and camera.
    #[test]
    fn test_hub_with_camera_child() {
        let world = Arc::new(TestWorld::default().with_children("hub-1", vec![camera("cam-1", 5.0)]));
        let services = with_both(world, BreachSettings::default());

        let snapshot = NetworkTopologyScanner::new().scan(&hub(), &services);

        assert!(snapshot.basic);
        assert!(snapshot.camera);
        assert!(!snapshot.turret);
        assert!(!snapshot.npc);
    }

    /// Adding a child of a new class adds that class and keeps the others.
    #[test]
    fn test_adding_child_is_monotonic() {
        let before_world = Arc::new(TestWorld::default().with_children("hub-1", vec![camera("cam-1", 5.0)]));
        let after_world = Arc::new(
            TestWorld::default().with_children("hub-1", vec![camera("cam-1", 5.0), turret("tur-1", 6.0)]),
        );
        let scanner = NetworkTopologyScanner::new();

        let before = scanner.scan(&hub(), &with_graph(before_world, BreachSettings::default()));
        let after = scanner.scan(&hub(), &with_graph(after_world, BreachSettings::default()));

        for class in before.reachable() {
            assert!(after.has(class), "{class} must stay reachable");
        }
        assert!(after.turret);
    }

    /// Linked agents on the network are tallied separately from unlinked ones.
    #[test]
    fn test_agent_children_tally_linked_and_unlinked() {
        let world = Arc::new(TestWorld::default().with_children(
            "hub-1",
            vec![agent("npc-1", 1.0).linked(), agent("npc-2", 2.0).linked(), agent("npc-3", 3.0)],
        ));
        let services = with_graph(world, BreachSettings::default());

        let snapshot = NetworkTopologyScanner::new().scan(&hub(), &services);

        assert!(snapshot.npc);
        assert_eq!(snapshot.linked_npcs, 2);
        assert_eq!(snapshot.unlinked_npcs, 1);
    }

    /// Destroyed children do not contribute.
    #[test]
    fn test_destroyed_child_is_ignored() {
        let world = Arc::new(TestWorld::default().with_children("hub-1", vec![turret("tur-1", 5.0)]));
        world.destroy("tur-1");
        let services = with_graph(world, BreachSettings::default());

        let snapshot = NetworkTopologyScanner::new().scan(&hub(), &services);

        assert!(!snapshot.turret);
    }

    /// A hub scanned without a graph provider offers everything.
    #[test]
    fn test_hub_without_graph_is_permissive() {
        let services = services(BreachSettings::default());

        let snapshot = NetworkTopologyScanner::new().scan(&hub(), &services);

        assert!(snapshot.basic && snapshot.camera && snapshot.turret && snapshot.npc);
    }

    // ── Radial ────────────────────────────────────────────────────────────────

    /// With spatial scanning on, nearby resources add classes to a hub scan.
    #[test]
    fn test_radial_scan_is_additive() {
        let world = Arc::new(
            TestWorld::default()
                .with_children("hub-1", vec![camera("cam-1", 5.0)])
                .with_placed(camera("cam-1", 5.0))
                .with_placed(turret("tur-near", 20.0)),
        );
        let services = with_both(world, BreachSettings::default());

        let snapshot = NetworkTopologyScanner::new().scan(&hub(), &services);

        assert!(snapshot.camera);
        assert!(snapshot.turret);
        assert!(!snapshot.npc);
    }

    /// Hits outside the radius are discarded even when the provider returns them.
    #[test]
    fn test_radial_hits_rechecked_against_radius() {
        let world = Arc::new(TestWorld::default().with_placed(turret("tur-far", 51.0)));
        let target = ResourceRef::leaf("door-1", DeviceClass::Basic, Vec3::ORIGIN);
        let services = services(BreachSettings::default()).with_spatial(world);

        let snapshot = NetworkTopologyScanner::new().scan(&target, &services);

        assert!(!snapshot.turret);
        assert!(snapshot.basic, "the target itself is basic");
    }

    /// The radius boundary is inclusive.
    #[test]
    fn test_radius_boundary_inclusive() {
        let world = Arc::new(TestWorld::default().with_placed(camera("cam-edge", 50.0)));
        let target = ResourceRef::leaf("door-1", DeviceClass::Basic, Vec3::ORIGIN);
        let services = services(BreachSettings::default()).with_spatial(world);

        let snapshot = NetworkTopologyScanner::new().scan(&target, &services);

        assert!(snapshot.camera);
    }

    /// A resource seen as a child is not counted again by the radius scan.
    #[test]
    fn test_resource_counted_once() {
        let world = Arc::new(
            TestWorld::default()
                .with_children("hub-1", vec![agent("npc-1", 5.0).linked()])
                .with_placed(agent("npc-1", 5.0).linked()),
        );
        let services = with_both(world, BreachSettings::default());

        let snapshot = NetworkTopologyScanner::new().scan(&hub(), &services);

        assert_eq!(snapshot.linked_npcs, 1);
        assert_eq!(snapshot.unlinked_npcs, 0);
    }

    /// A fixed radius overrides the configured one.
    #[test]
    fn test_radius_override() {
        let world = Arc::new(TestWorld::default().with_placed(turret("tur-1", 30.0)));
        let target = ResourceRef::leaf("door-1", DeviceClass::Basic, Vec3::ORIGIN);
        let services = services(BreachSettings::default()).with_spatial(world);

        let snapshot = NetworkTopologyScanner::with_radius(10.0).scan(&target, &services);

        assert!(!snapshot.turret);
    }

    // ── Fallback ──────────────────────────────────────────────────────────────

    /// A non-hub target without spatial data assumes basic and agents, plus
    /// its own class.
    #[test]
    fn test_no_spatial_fallback_for_leaf() {
        let target = ResourceRef::leaf("cam-9", DeviceClass::Camera, Vec3::ORIGIN);
        let services = services(BreachSettings::default());

        let snapshot = NetworkTopologyScanner::new().scan(&target, &services);

        assert!(snapshot.basic);
        assert!(snapshot.npc);
        assert!(snapshot.camera);
        assert!(!snapshot.turret);
    }

    /// The scan flag only governs hubs; a leaf still scans its radius.
    #[test]
    fn test_leaf_scans_radius_with_scan_flag_off() {
        let world = Arc::new(TestWorld::default().with_placed(turret("tur-1", 5.0)));
        let target = ResourceRef::leaf("door-1", DeviceClass::Basic, Vec3::ORIGIN);
        let services = services(BreachSettings::default().with_spatial_scan(false)).with_spatial(world);

        let snapshot = NetworkTopologyScanner::new().scan(&target, &services);

        assert!(snapshot.turret);
        assert!(!snapshot.npc);
    }

    /// A networked camera whose hub is out of range still offers its own class.
    #[test]
    fn test_isolated_camera_target_counts_itself() {
        let world = Arc::new(TestWorld::default().with_placed(ResourceRef::hub("far-hub", at(200.0))));
        let target = camera("lobby-cam", 0.0);
        let services = services(BreachSettings::default()).with_spatial(world);

        let snapshot = NetworkTopologyScanner::new().scan(&target, &services);

        assert_eq!(snapshot.reachable(), vec![CapabilityClass::Camera]);
    }

    /// An agent target does not count toward the agent class by itself.
    #[test]
    fn test_agent_target_does_not_count_itself() {
        let world = Arc::new(TestWorld::default());
        let services = services(BreachSettings::default()).with_spatial(world);

        let snapshot = NetworkTopologyScanner::new().scan(&agent("npc-9", 0.0), &services);

        assert!(snapshot.reachable().is_empty());
    }

    /// Without a spatial provider a hub cannot rule out unlinked agents nearby.
    #[test]
    fn test_hub_without_spatial_provider_assumes_agents() {
        let world = Arc::new(TestWorld::default().with_children("hub-1", vec![camera("cam-1", 5.0)]));
        let services = with_graph(world, BreachSettings::default());

        let snapshot = NetworkTopologyScanner::new().scan(&hub(), &services);

        assert!(snapshot.basic);
        assert!(snapshot.camera);
        assert!(snapshot.npc);
        assert!(!snapshot.turret);
    }

    /// Spatial scanning disabled leaves a hub scan purely hierarchical.
    #[test]
    fn test_hub_without_spatial_stays_hierarchical() {
        let world = Arc::new(
            TestWorld::default()
                .with_children("hub-1", vec![camera("cam-1", 5.0)])
                .with_placed(turret("tur-1", 5.0)),
        );
        let services = with_both(world, BreachSettings::default().with_spatial_scan(false));

        let snapshot = NetworkTopologyScanner::new().scan(&hub(), &services);

        assert!(snapshot.camera);
        assert!(!snapshot.turret);
        assert!(!snapshot.npc, "no permissive fallback for a readable hub");
    }
}
