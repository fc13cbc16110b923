//! A scripted in-memory world for the reference scenarios.
//!
//! `MockWorld` stands in for the game host. It holds every placed resource,
//! the hub-to-child links, and the set of destroyed resources, and serves
//! both the graph and the spatial provider interfaces from that state.
//! Everything is fictional and built in code.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::{Mutex, MutexGuard},
};

use breach_contracts::resource::{DeviceClass, ResourceId, ResourceRef, Vec3};
use breach_core::traits::{ResourceGraphProvider, SpatialQueryProvider};

#[derive(Debug, Default)]
struct WorldState {
    resources: BTreeMap<ResourceId, ResourceRef>,
    links: HashMap<ResourceId, Vec<ResourceId>>,
    destroyed: HashSet<ResourceId>,
}

/// An in-memory host world.
#[derive(Debug, Default)]
pub struct MockWorld {
    state: Mutex<WorldState>,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, WorldState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Place `resource` in the world. Replaces any resource with the same id.
    pub fn place(&self, resource: ResourceRef) {
        self.state().resources.insert(resource.id.clone(), resource);
    }

    /// Place `child` and link it into the network of `parent`.
    pub fn attach(&self, parent: &ResourceId, child: ResourceRef) {
        let mut state = self.state();
        state.links.entry(parent.clone()).or_default().push(child.id.clone());
        state.resources.insert(child.id.clone(), child.networked());
    }

    /// Destroy `id`. It stays linked but no longer counts as alive.
    pub fn destroy(&self, id: &ResourceId) {
        self.state().destroyed.insert(id.clone());
    }

    pub fn get(&self, id: &ResourceId) -> Option<ResourceRef> {
        self.state().resources.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state().resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceGraphProvider for MockWorld {
    fn children_of(&self, hub: &ResourceId) -> Vec<ResourceRef> {
        let state = self.state();
        state
            .links
            .get(hub)
            .map(|children| {
                children
                    .iter()
                    .filter_map(|id| state.resources.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_alive(&self, id: &ResourceId) -> bool {
        let state = self.state();
        state.resources.contains_key(id) && !state.destroyed.contains(id)
    }
}

impl SpatialQueryProvider for MockWorld {
    fn nearby(&self, origin: &Vec3, radius: f64, class_filter: Option<DeviceClass>) -> Vec<ResourceRef> {
        let state = self.state();
        state
            .resources
            .values()
            .filter(|r| !state.destroyed.contains(&r.id))
            .filter(|r| class_filter.map_or(true, |class| r.class == class))
            .filter(|r| origin.within(&r.position, radius))
            .cloned()
            .collect()
    }
}

// ── Presets ───────────────────────────────────────────────────────────────────

/// A hub at the origin with a single networked camera.
pub fn camera_office() -> (MockWorld, ResourceRef) {
    let world = MockWorld::new();
    let hub = ResourceRef::hub("office-hub", Vec3::ORIGIN);
    world.place(hub.clone());
    world.attach(&hub.id, ResourceRef::leaf("office-cam", DeviceClass::Camera, Vec3::new(8.0, 2.0, 0.0)));
    (world, hub)
}

/// A hub with no children, alone in the world.
pub fn lone_hub() -> (MockWorld, ResourceRef) {
    let world = MockWorld::new();
    let hub = ResourceRef::hub("relay-hub", Vec3::ORIGIN);
    world.place(hub.clone());
    (world, hub)
}

/// A standalone turret on a rooftop with nothing else in range.
pub fn rooftop_turret() -> (MockWorld, ResourceRef) {
    let world = MockWorld::new();
    let turret = ResourceRef::leaf("roof-turret", DeviceClass::Turret, Vec3::new(0.0, 0.0, 30.0));
    world.place(turret.clone());
    (world, turret)
}

/// A street with a breachable door at the origin and cameras spaced along
/// the x axis at the given distances.
pub fn street(camera_distances: &[f64]) -> (MockWorld, ResourceRef) {
    let world = MockWorld::new();
    let door = ResourceRef::leaf("street-door", DeviceClass::Basic, Vec3::ORIGIN);
    world.place(door.clone());
    for (i, distance) in camera_distances.iter().enumerate() {
        world.place(ResourceRef::leaf(
            format!("street-cam-{}", i + 1),
            DeviceClass::Camera,
            Vec3::new(*distance, 0.0, 0.0),
        ));
    }
    (world, door)
}
