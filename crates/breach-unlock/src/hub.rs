//! Hub strategy: the resource owns a network.

use tracing::debug;

use breach_contracts::{
    capability::CapabilityClass,
    error::BreachResult,
    resource::{ResourceKind, ResourceRef},
    unlock::UnlockReport,
};
use breach_core::{
    services::HostServices,
    traits::{UnlockRequest, UnlockStrategy},
};

use crate::cascade::{network_cascade, radial_cascade};

/// Cascades a hub grant to its direct children.
///
/// A Basic grant additionally unlocks standalone leaves and mobile resources
/// within `unlock_radius` of the hub, when radial unlock is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct HubStrategy;

impl HubStrategy {
    pub fn new() -> Self {
        Self
    }

    fn is_standalone(resource: &ResourceRef) -> bool {
        match resource.kind {
            ResourceKind::Leaf => !resource.networked,
            ResourceKind::Mobile => true,
            ResourceKind::Hub => false,
        }
    }
}

impl UnlockStrategy for HubStrategy {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Hub
    }

    fn cascade(
        &self,
        request: &UnlockRequest<'_>,
        services: &HostServices,
        report: &mut UnlockReport,
    ) -> BreachResult<()> {
        let settings = services.settings();
        if request.capability == CapabilityClass::Basic && settings.radial_unlock_enabled() {
            let radius = settings.unlock_radius();
            if let Err(e) = radial_cascade(
                request.target,
                radius,
                None,
                request,
                services,
                report,
                Self::is_standalone,
            ) {
                debug!(resource = %request.target.id, reason = %e, "standalone radial unlock skipped");
            }
        }

        network_cascade(request.target, request, services, report)?;
        Ok(())
    }
}
