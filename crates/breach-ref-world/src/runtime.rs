//! Wiring of a complete engine over a `MockWorld`.

use std::sync::Arc;

use breach_catalog::FilterPipeline;
use breach_contracts::error::BreachResult;
use breach_core::{traits::Clock, BreachEngine, BreachSettings, HostServices, ManualClock};
use breach_store::InMemoryStore;
use breach_topology::NetworkTopologyScanner;

use crate::world::MockWorld;

/// Embedded settings shared by the reference scenarios.
pub const REFERENCE_SETTINGS: &str = include_str!("../settings/reference.toml");

/// Embedded candidate catalog shared by the reference scenarios.
pub const REFERENCE_CATALOG: &str = include_str!("../settings/catalog.toml");

/// Load the embedded reference settings.
pub fn reference_settings() -> BreachResult<BreachSettings> {
    BreachSettings::from_toml_str(REFERENCE_SETTINGS)
}

/// A fully wired engine plus inspectable handles on its collaborators.
pub struct RefRuntime {
    pub engine: BreachEngine,
    pub world: Arc<MockWorld>,
    pub clock: Arc<ManualClock>,
    pub store: Arc<InMemoryStore>,
}

impl RefRuntime {
    /// Wire the standard pipeline, scanner, and strategies over `world`,
    /// with the clock starting at `start` seconds.
    pub fn new(world: MockWorld, settings: BreachSettings, start: f64) -> BreachResult<Self> {
        let world = Arc::new(world);
        let clock = Arc::new(ManualClock::at(start));
        let store = Arc::new(InMemoryStore::new());

        let services = HostServices::new(clock.clone(), Arc::new(settings), store.clone())
            .with_graph(world.clone())
            .with_spatial(world.clone());

        let engine = BreachEngine::new(
            services,
            Box::new(FilterPipeline::from_toml_str(REFERENCE_CATALOG)?),
            Box::new(NetworkTopologyScanner::new()),
            breach_unlock::standard_dispatcher(),
        );

        Ok(Self {
            engine,
            world,
            clock,
            store,
        })
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Wire a runtime with the embedded reference settings.
    pub fn reference(world: MockWorld, start: f64) -> BreachResult<Self> {
        Self::new(world, reference_settings()?, start)
    }
}
