//! Outcome of applying a grant.
//!
//! `UnlockReport` is what the dispatch layer returns to the host after a
//! success callback. The statistics and presentation layers read it; the
//! engine itself never does.

use serde::{Deserialize, Serialize};

use crate::{
    capability::CapabilityClass,
    resource::{ResourceId, ResourceKind},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockReport {
    pub kind: ResourceKind,
    pub target: ResourceId,
    /// Capabilities applied, in application order.
    pub capabilities: Vec<CapabilityClass>,
    /// The grant timestamp written.
    pub timestamp: f64,
    /// False when the target was gone and only the cascade ran.
    pub target_written: bool,
    /// Other resources that received the grant timestamp.
    pub cascaded: Vec<ResourceId>,
    /// Resources whose capabilities were exposed to the player.
    pub exposed: Vec<ResourceId>,
    /// Resources skipped because they no longer exist.
    pub skipped: Vec<ResourceId>,
}

impl UnlockReport {
    pub fn new(kind: ResourceKind, target: ResourceId, timestamp: f64) -> Self {
        Self {
            kind,
            target,
            capabilities: Vec::new(),
            timestamp,
            target_written: false,
            cascaded: Vec::new(),
            exposed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Record a cascaded write, once per resource.
    pub fn cascade(&mut self, id: &ResourceId) {
        if !self.cascaded.contains(id) {
            self.cascaded.push(id.clone());
        }
    }

    pub fn expose(&mut self, id: &ResourceId) {
        if !self.exposed.contains(id) {
            self.exposed.push(id.clone());
        }
    }

    pub fn skip(&mut self, id: &ResourceId) {
        if !self.skipped.contains(id) {
            self.skipped.push(id.clone());
        }
    }

    /// Fold a later application on the same target into this report.
    pub fn merge(&mut self, other: UnlockReport) {
        for capability in other.capabilities {
            if !self.capabilities.contains(&capability) {
                self.capabilities.push(capability);
            }
        }
        self.timestamp = self.timestamp.max(other.timestamp);
        self.target_written |= other.target_written;
        for id in &other.cascaded {
            self.cascade(id);
        }
        for id in &other.exposed {
            self.expose(id);
        }
        for id in &other.skipped {
            self.skip(id);
        }
    }

    /// True when nothing at all was written.
    pub fn is_empty(&self) -> bool {
        !self.target_written && self.cascaded.is_empty()
    }
}
