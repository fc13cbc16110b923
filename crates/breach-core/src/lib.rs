//! # breach-core
//!
//! The progressive network access-control engine.
//!
//! This crate provides:
//! - The host collaborator traits (`ResourceGraphProvider`,
//!   `SpatialQueryProvider`, `Clock`, `SettingsProvider`, `PersistenceStore`)
//! - The engine seams (`CatalogFilter`, `TopologyScanner`, `UnlockStrategy`)
//! - `BreachSettings`, the TOML-loadable settings provider
//! - The `UnlockDispatcher` template, the `SessionBridge`, and the
//!   `BreachEngine` facade that wires everything in breach order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use breach_core::{BreachEngine, HostServices, UnlockDispatcher};
//!
//! let engine = BreachEngine::new(services, Box::new(pipeline), Box::new(scanner), dispatcher);
//! let offered = engine.offer(BreachPointKind::Hub, &hub);
//! let token = engine.begin_session(ResourceKind::Hub, &hub);
//! // ... minigame runs, host calls back ...
//! engine.complete_success(&token, &[CapabilityClass::Basic]);
//! ```

pub mod clock;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod ledger;
pub mod services;
pub mod session;
pub mod traits;

pub use clock::{ManualClock, WallClock};
pub use config::BreachSettings;
pub use dispatch::UnlockDispatcher;
pub use engine::BreachEngine;
pub use services::HostServices;

// ── Tests ─────────────────────────────────────────────────────────────────────
