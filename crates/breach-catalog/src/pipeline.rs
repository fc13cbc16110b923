//! The catalog filter pipeline.
//!
//! `FilterPipeline` holds a candidate catalog and implements the
//! `CatalogFilter` trait from breach-core.
//!
//! Evaluation algorithm:
//!
//! 1. Start from the full candidate catalog, in declaration order.
//! 2. Apply each rule of `FilterRule::ORDER` to the working list.
//! 3. Return what survives. The result is always a subsequence of the
//!    candidate catalog, so two runs over unchanged state agree exactly.

use std::path::Path;

use tracing::debug;

use breach_contracts::{breach::BreachContext, capability::CatalogEntry, error::BreachResult};
use breach_core::{traits::CatalogFilter, HostServices};

use crate::{
    catalog::CatalogConfig,
    rule::{FilterRule, PipelineState},
};

/// A `CatalogFilter` running the ordered filter rules over a candidate catalog.
///
/// ```rust,ignore
/// use breach_catalog::FilterPipeline;
///
/// let pipeline = FilterPipeline::from_file(Path::new("catalog.toml"))?;
/// ```
#[derive(Debug, Clone)]
pub struct FilterPipeline {
    config: CatalogConfig,
}

impl FilterPipeline {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    /// A pipeline over the built-in four-entry catalog.
    pub fn standard() -> Self {
        Self::new(CatalogConfig::standard())
    }

    pub fn from_toml_str(s: &str) -> BreachResult<Self> {
        Ok(Self::new(CatalogConfig::from_toml_str(s)?))
    }

    pub fn from_file(path: &Path) -> BreachResult<Self> {
        Ok(Self::new(CatalogConfig::from_file(path)?))
    }

    pub fn candidates(&self) -> &[CatalogEntry] {
        &self.config.entries
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl CatalogFilter for FilterPipeline {
    fn evaluate(&self, ctx: &BreachContext, services: &HostServices) -> Vec<CatalogEntry> {
        debug!(
            resource = %ctx.target.id,
            point = ?ctx.point,
            candidates = self.config.entries.len(),
            "evaluating catalog"
        );

        let mut state = PipelineState::new(ctx, self.config.entries.clone());
        for rule in FilterRule::ORDER {
            rule.apply(&mut state, services);
            if state.entries.is_empty() {
                debug!(resource = %ctx.target.id, rule = rule.id(), "catalog exhausted");
                break;
            }
        }
        state.entries
    }
}
