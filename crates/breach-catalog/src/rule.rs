//! The filter rules of the catalog pipeline.
//!
//! Each rule narrows the working entry list in place. Rules run in the order
//! of `FilterRule::ORDER`, and later rules read state earlier rules wrote:
//! the grant removal rule resets expired grants before the topology rule
//! looks at the same entries.

use serde::{Deserialize, Serialize};
use tracing::debug;

use breach_contracts::{
    breach::{BreachContext, BreachPointKind},
    capability::{CapabilityClass, CatalogEntry},
    grant::{is_expired, GrantSet},
};
use breach_core::HostServices;

/// One step of the catalog pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterRule {
    /// Keep entries the breach point may inject at all.
    Injection,
    /// Drop entries already granted; reset and keep expired ones.
    GrantedRemoval,
    /// Drop hub-only entries unless breaching a hub or breaching remotely.
    BreachPointRestriction,
    /// Narrow remote breaches of unprivileged unconscious agents.
    AgentRestriction,
    /// Drop entries whose class is not reachable from the target.
    TopologyAvailability,
    /// Drop reward entries when rewards are granted automatically.
    AutoRewardSuppression,
}

impl FilterRule {
    /// The evaluation order. Grant removal must precede topology availability.
    pub const ORDER: [FilterRule; 6] = [
        FilterRule::Injection,
        FilterRule::GrantedRemoval,
        FilterRule::BreachPointRestriction,
        FilterRule::AgentRestriction,
        FilterRule::TopologyAvailability,
        FilterRule::AutoRewardSuppression,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FilterRule::Injection => "injection",
            FilterRule::GrantedRemoval => "granted-removal",
            FilterRule::BreachPointRestriction => "breach-point-restriction",
            FilterRule::AgentRestriction => "agent-restriction",
            FilterRule::TopologyAvailability => "topology-availability",
            FilterRule::AutoRewardSuppression => "auto-reward-suppression",
        }
    }

    /// Apply this rule to the working state.
    pub fn apply(self, state: &mut PipelineState<'_>, services: &HostServices) {
        let before = state.entries.len();
        match self {
            FilterRule::Injection => inject(state),
            FilterRule::GrantedRemoval => remove_granted(state, services),
            FilterRule::BreachPointRestriction => restrict_breach_point(state),
            FilterRule::AgentRestriction => restrict_agent(state),
            FilterRule::TopologyAvailability => require_topology(state),
            FilterRule::AutoRewardSuppression => suppress_rewards(state, services),
        }
        debug!(
            rule = self.id(),
            resource = %state.ctx.target.id,
            before,
            after = state.entries.len(),
            "filter rule applied"
        );
    }
}

/// Mutable state threaded through the rules of one pipeline run.
#[derive(Debug)]
pub struct PipelineState<'a> {
    pub ctx: &'a BreachContext,
    pub entries: Vec<CatalogEntry>,
    /// Working copy of the target's grants, updated as expired grants reset.
    pub grants: GrantSet,
}

impl<'a> PipelineState<'a> {
    pub fn new(ctx: &'a BreachContext, candidates: Vec<CatalogEntry>) -> Self {
        Self {
            ctx,
            entries: candidates,
            grants: ctx.grants,
        }
    }
}

fn inject(state: &mut PipelineState<'_>) {
    let point = state.ctx.point;
    state.entries.retain(|entry| point.may_inject(entry.capability));
}

fn remove_granted(state: &mut PipelineState<'_>, services: &HostServices) {
    let ttl_hours = services.settings().ttl_hours();
    let now = services.now();
    let ctx = state.ctx;
    let target = &ctx.target.id;
    let ledger = services.ledger();

    let grants = &mut state.grants;
    state.entries.retain(|entry| {
        let timestamp = grants.get(entry.capability);
        if timestamp <= 0.0 {
            return true;
        }
        if ttl_hours <= 0.0 {
            return false;
        }
        if is_expired(timestamp, now, ttl_hours) {
            debug!(
                resource = %target,
                capability = %entry.capability,
                granted_at = timestamp,
                "grant expired, offering again"
            );
            ledger.reset(target, entry.capability);
            grants.reset(entry.capability);
            return true;
        }
        false
    });
}

fn restrict_breach_point(state: &mut PipelineState<'_>) {
    let point = state.ctx.point;
    if point.is_hub() || point.is_remote() {
        return;
    }
    state.entries.retain(|entry| !entry.is_hub_only());
}

fn restrict_agent(state: &mut PipelineState<'_>) {
    let ctx = state.ctx;
    let unprivileged_agent = matches!(ctx.point, BreachPointKind::RemoteLeaf(_))
        && ctx.target.is_agent()
        && ctx.target.traits.unconscious
        && !ctx.target.traits.privileged;
    if !unprivileged_agent {
        return;
    }
    state.entries.retain(|entry| {
        !entry.is_hub_only()
            && !matches!(entry.capability, CapabilityClass::Camera | CapabilityClass::Turret)
    });
}

fn require_topology(state: &mut PipelineState<'_>) {
    // Remote leaves already define their offers per device kind.
    if state.ctx.point.is_remote() {
        return;
    }
    let topology = state.ctx.topology;
    state.entries.retain(|entry| topology.has(entry.capability));
}

fn suppress_rewards(state: &mut PipelineState<'_>, services: &HostServices) {
    if services.settings().auto_reward_granting() {
        state.entries.retain(|entry| !entry.is_reward());
    }
}
