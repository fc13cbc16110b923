//! Session bridge: recovers the breach target inside the minigame callback.
//!
//! The success and failure callbacks fire after the call that presented the
//! minigame has long returned. The bridge keeps a keyed table from
//! `SessionToken` to the resource under breach, with at most one live entry
//! per resource kind. Opening a new session for a kind evicts that kind's
//! previous entry; consuming a token clears it.

use std::collections::HashMap;

use breach_contracts::{
    error::{BreachError, BreachResult},
    resource::{ResourceKind, ResourceRef},
    session::SessionToken,
};
use tracing::debug;

/// The resource recorded when a breach minigame was presented.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEntry {
    pub kind: ResourceKind,
    pub resource: ResourceRef,
    pub opened_at: f64,
}

#[derive(Debug, Default)]
pub struct SessionBridge {
    entries: HashMap<SessionToken, SessionEntry>,
    active: HashMap<ResourceKind, SessionToken>,
}

impl SessionBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for `resource`, replacing any live session of the same kind.
    pub fn begin(&mut self, kind: ResourceKind, resource: ResourceRef, now: f64) -> SessionToken {
        let token = SessionToken::new();
        if let Some(previous) = self.active.insert(kind, token) {
            if let Some(stale) = self.entries.remove(&previous) {
                debug!(
                    kind = %kind,
                    token = %previous,
                    resource = %stale.resource.id,
                    "replacing unfinished breach session"
                );
            }
        }
        self.entries.insert(
            token,
            SessionEntry {
                kind,
                resource,
                opened_at: now,
            },
        );
        token
    }

    /// Look at a session without consuming it.
    pub fn peek(&self, token: &SessionToken) -> Option<&SessionEntry> {
        self.entries.get(token)
    }

    /// The live session for `kind`, if any.
    pub fn active(&self, kind: ResourceKind) -> Option<&SessionEntry> {
        self.active.get(&kind).and_then(|token| self.entries.get(token))
    }

    /// Remove and return the session for `token`.
    pub fn consume(&mut self, token: &SessionToken) -> BreachResult<SessionEntry> {
        let entry = self
            .entries
            .remove(token)
            .ok_or_else(|| BreachError::UnknownSession {
                token: token.to_string(),
            })?;
        if self.active.get(&entry.kind) == Some(token) {
            self.active.remove(&entry.kind);
        }
        Ok(entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use breach_contracts::resource::{DeviceClass, ResourceRef, Vec3};

    use super::*;

    fn hub(id: &str) -> ResourceRef {
        ResourceRef::hub(id, Vec3::ORIGIN)
    }

    #[test]
    fn begin_then_consume_returns_resource() {
        let mut bridge = SessionBridge::new();
        let token = bridge.begin(ResourceKind::Hub, hub("hub-1"), 5.0);

        let entry = bridge.consume(&token).unwrap();
        assert_eq!(entry.resource.id.0, "hub-1");
        assert_eq!(entry.opened_at, 5.0);
        assert!(bridge.is_empty());
        assert!(bridge.active(ResourceKind::Hub).is_none());
    }

    #[test]
    fn second_session_of_same_kind_evicts_first() {
        let mut bridge = SessionBridge::new();
        let first = bridge.begin(ResourceKind::Hub, hub("hub-1"), 1.0);
        let second = bridge.begin(ResourceKind::Hub, hub("hub-2"), 2.0);

        assert_eq!(bridge.len(), 1);
        assert!(matches!(
            bridge.consume(&first),
            Err(BreachError::UnknownSession { .. })
        ));
        assert_eq!(bridge.consume(&second).unwrap().resource.id.0, "hub-2");
    }

    #[test]
    fn sessions_of_different_kinds_coexist() {
        let mut bridge = SessionBridge::new();
        bridge.begin(ResourceKind::Hub, hub("hub-1"), 1.0);
        bridge.begin(
            ResourceKind::Leaf,
            ResourceRef::leaf("door-1", DeviceClass::Basic, Vec3::ORIGIN),
            1.0,
        );

        assert_eq!(bridge.len(), 2);
        assert_eq!(bridge.active(ResourceKind::Leaf).unwrap().resource.id.0, "door-1");
    }

    #[test]
    fn peek_does_not_consume() {
        let mut bridge = SessionBridge::new();
        let token = bridge.begin(ResourceKind::Mobile, ResourceRef::mobile("car-1", Vec3::ORIGIN), 1.0);

        assert!(bridge.peek(&token).is_some());
        assert!(bridge.peek(&token).is_some());
        assert!(bridge.consume(&token).is_ok());
        assert!(bridge.peek(&token).is_none());
    }
}
