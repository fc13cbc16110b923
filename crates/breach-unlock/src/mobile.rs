//! Mobile strategy: a resource that moves on its own, such as a vehicle.

use breach_contracts::{
    capability::CapabilityClass,
    error::BreachResult,
    resource::ResourceKind,
    unlock::UnlockReport,
};
use breach_core::{
    services::HostServices,
    traits::{UnlockRequest, UnlockStrategy},
};

use crate::cascade::radial_cascade;

/// Mobile grants are local. A Basic grant also unlocks other mobile
/// resources within `unlock_radius`, when radial unlock is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobileStrategy;

impl MobileStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl UnlockStrategy for MobileStrategy {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Mobile
    }

    fn cascade(
        &self,
        request: &UnlockRequest<'_>,
        services: &HostServices,
        report: &mut UnlockReport,
    ) -> BreachResult<()> {
        let settings = services.settings();
        if request.capability != CapabilityClass::Basic || !settings.radial_unlock_enabled() {
            return Ok(());
        }

        radial_cascade(
            request.target,
            settings.unlock_radius(),
            None,
            request,
            services,
            report,
            |hit| hit.kind == ResourceKind::Mobile,
        )?;
        Ok(())
    }
}
