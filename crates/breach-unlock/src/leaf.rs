//! Leaf strategy: a generic device, possibly network-connected.

use tracing::debug;

use breach_contracts::{error::BreachResult, resource::ResourceKind, unlock::UnlockReport};
use breach_core::{
    services::HostServices,
    traits::{UnlockRequest, UnlockStrategy},
};

use crate::cascade::{network_cascade, radial_cascade};

/// Cascades a leaf grant.
///
/// A leaf with network children of its own (nested controllers) cascades
/// like a hub. Any other leaf searches `unlock_radius` around itself for
/// networked resources of the granted device type.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafStrategy;

impl LeafStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl UnlockStrategy for LeafStrategy {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Leaf
    }

    fn cascade(
        &self,
        request: &UnlockRequest<'_>,
        services: &HostServices,
        report: &mut UnlockReport,
    ) -> BreachResult<()> {
        let target = request.target;
        let has_children = services
            .graph()
            .map(|graph| !graph.children_of(&target.id).is_empty())
            .unwrap_or(false);

        if has_children {
            debug!(resource = %target.id, "leaf owns a network, cascading to children");
            network_cascade(target, request, services, report)?;
            return Ok(());
        }

        let radius = services.settings().unlock_radius();
        radial_cascade(
            target,
            radius,
            Some(request.device),
            request,
            services,
            report,
            |hit| hit.networked && hit.class == request.device,
        )?;
        Ok(())
    }
}
