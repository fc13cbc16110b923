//! # breach-ref-world
//!
//! Reference host for the progressive breach engine.
//!
//! Runs the engine end to end over a scripted in-memory world:
//!
//! 1. **Hub with one camera**: offer, grant Basic, re-offer.
//! 2. **Grant expiry**: a one-hour grant suppressed, then re-offered and reset.
//! 3. **Remote turret**: a remote breach offers the turret's fixed set
//!    regardless of topology.
//! 4. **Failure lockout**: a failed breach locks out the area by radius and time.
//! 5. **Session handoff and save**: tokens across a delayed callback, a
//!    resource destroyed mid-breach, and a JSON save round trip.
//!
//! All resources are fictional and built in code.

pub mod runtime;
pub mod scenarios;
pub mod world;

pub use runtime::RefRuntime;
pub use world::MockWorld;

// ── Tests ─────────────────────────────────────────────────────────────────────
