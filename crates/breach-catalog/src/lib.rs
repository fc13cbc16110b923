//! # breach-catalog
//!
//! The catalog filter pipeline: decides which capability entries a breach
//! offers.
//!
//! ## Overview
//!
//! [`FilterPipeline`] implements the
//! [`CatalogFilter`](breach_core::traits::CatalogFilter) trait. It starts from
//! a candidate catalog (built in, or declared in TOML) and narrows it with
//! six ordered rules:
//!
//! 1. injection by breach point
//! 2. already-granted removal, with TTL reset
//! 3. breach-point restriction of hub-only entries
//! 4. unprivileged-agent restriction
//! 5. topology availability
//! 6. auto-reward suppression
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use breach_catalog::FilterPipeline;
//!
//! let pipeline = FilterPipeline::standard();
//! // Pass `pipeline` to `breach_core::BreachEngine::new(...)`.
//! ```

pub mod catalog;
pub mod pipeline;
pub mod rule;

pub use catalog::CatalogConfig;
pub use pipeline::FilterPipeline;
pub use rule::FilterRule;

// ── Tests ─────────────────────────────────────────────────────────────────────
