//! Error types for the breach engine.
//!
//! Internal operations return `BreachResult<T>`. The public engine surface
//! never hands these to the host: it logs them and degrades to the
//! conservative default instead.

use thiserror::Error;

/// The unified error type for the breach engine.
#[derive(Debug, Error)]
pub enum BreachError {
    /// A host collaborator the operation needs is not wired in.
    #[error("collaborator '{collaborator}' is not available")]
    MissingCollaborator { collaborator: String },

    /// A resource disappeared between offer and grant application.
    #[error("resource '{resource}' is no longer available")]
    ResourceUnavailable { resource: String },

    /// The persistence store rejected a read or write.
    #[error("persistence error: {reason}")]
    Persistence { reason: String },

    /// A configuration value is missing or malformed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A callback arrived for a session that was never opened or already consumed.
    #[error("unknown breach session '{token}'")]
    UnknownSession { token: String },

    /// No unlock strategy is registered for a resource kind.
    #[error("no unlock strategy registered for resource kind '{kind}'")]
    StrategyMissing { kind: String },
}

/// Convenience alias used throughout the breach crates.
pub type BreachResult<T> = Result<T, BreachError>;
