//! # breach-unlock
//!
//! Per-kind unlock strategies plugged into
//! [`UnlockDispatcher`](breach_core::UnlockDispatcher).
//!
//! The dispatcher writes the grant on the target, marks it in its kind's
//! registry and records the breach position. The strategies here only
//! supply the cascade step:
//!
//! - [`HubStrategy`]: direct children, plus standalone resources in radius for Basic
//! - [`LeafStrategy`]: nested children, or networked devices of the granted type in radius
//! - [`MobileStrategy`]: other mobile resources in radius for Basic
//!
//! ```rust,ignore
//! let dispatcher = breach_unlock::standard_dispatcher();
//! ```

pub mod cascade;
pub mod hub;
pub mod leaf;
pub mod mobile;

pub use hub::HubStrategy;
pub use leaf::LeafStrategy;
pub use mobile::MobileStrategy;

use breach_core::UnlockDispatcher;

/// A dispatcher with the hub, leaf, and mobile strategies registered.
pub fn standard_dispatcher() -> UnlockDispatcher {
    UnlockDispatcher::new()
        .with(Box::new(HubStrategy::new()))
        .with(Box::new(LeafStrategy::new()))
        .with(Box::new(MobileStrategy::new()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
