//! Reference breach scenarios.
//!
//! Each scenario is a self-contained module that wires the real components
//! (catalog pipeline, topology scanner, unlock strategies, in-memory store)
//! over a scripted `MockWorld` and walks through one behavior of the engine.

pub mod failure_lockout;
pub mod hub_camera;
pub mod remote_turret;
pub mod session_flow;
pub mod ttl_expiry;

use breach_contracts::capability::{CapabilityClass, CatalogEntry};

/// The capability classes of an offer, in offer order.
pub fn classes(entries: &[CatalogEntry]) -> Vec<CapabilityClass> {
    entries.iter().map(|e| e.capability).collect()
}

/// Render an offer for the scenario printouts.
pub fn describe(offer: &[CapabilityClass]) -> String {
    if offer.is_empty() {
        return "(nothing)".to_string();
    }
    offer
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
