//! The bundle of host collaborators every component receives.

use std::sync::Arc;

use breach_contracts::{
    error::{BreachError, BreachResult},
    resource::{PlayerId, ResourceId},
};

use crate::{
    ledger::GrantLedger,
    traits::{Clock, PersistenceStore, ResourceGraphProvider, SettingsProvider, SpatialQueryProvider},
};

/// Host collaborators wired into the engine.
///
/// Clock, settings, and persistence are always present. The graph and
/// spatial providers are optional: a host without them still gets a working
/// engine that falls back to the documented permissive defaults.
#[derive(Clone)]
pub struct HostServices {
    clock: Arc<dyn Clock>,
    settings: Arc<dyn SettingsProvider>,
    store: Arc<dyn PersistenceStore>,
    graph: Option<Arc<dyn ResourceGraphProvider>>,
    spatial: Option<Arc<dyn SpatialQueryProvider>>,
    player: PlayerId,
}

impl HostServices {
    pub fn new(
        clock: Arc<dyn Clock>,
        settings: Arc<dyn SettingsProvider>,
        store: Arc<dyn PersistenceStore>,
    ) -> Self {
        Self {
            clock,
            settings,
            store,
            graph: None,
            spatial: None,
            player: PlayerId::default(),
        }
    }

    pub fn with_graph(mut self, graph: Arc<dyn ResourceGraphProvider>) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn with_spatial(mut self, spatial: Arc<dyn SpatialQueryProvider>) -> Self {
        self.spatial = Some(spatial);
        self
    }

    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = player;
        self
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn settings(&self) -> &dyn SettingsProvider {
        self.settings.as_ref()
    }

    pub fn store(&self) -> &dyn PersistenceStore {
        self.store.as_ref()
    }

    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    /// Error-absorbing view over the persistence store.
    pub fn ledger(&self) -> GrantLedger<'_> {
        GrantLedger::new(self.store.as_ref())
    }

    pub fn graph(&self) -> BreachResult<&dyn ResourceGraphProvider> {
        self.graph
            .as_deref()
            .ok_or_else(|| BreachError::MissingCollaborator {
                collaborator: "resource-graph".to_string(),
            })
    }

    /// The spatial provider. The `spatial_scan_enabled` setting does not
    /// gate this; the topology scanner applies it.
    pub fn spatial(&self) -> BreachResult<&dyn SpatialQueryProvider> {
        self.spatial
            .as_deref()
            .ok_or_else(|| BreachError::MissingCollaborator {
                collaborator: "spatial-query".to_string(),
            })
    }

    /// Liveness of `id`. Without a graph provider every resource is assumed alive.
    pub fn is_alive(&self, id: &ResourceId) -> bool {
        self.graph.as_ref().map_or(true, |graph| graph.is_alive(id))
    }
}
