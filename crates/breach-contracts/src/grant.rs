//! Grant timestamps, TTL semantics, and bounded position histories.
//!
//! A grant is a single `f64` timestamp per capability class; `0.0` means
//! ungranted. Expiry is a pure function of `(timestamp, now, ttl_hours)` so
//! every consumer agrees on it without sharing state.

use serde::{Deserialize, Serialize};

use crate::{
    capability::CapabilityClass,
    resource::{ResourceId, Vec3},
};

pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Maximum entries kept in each per-player history. Oldest are evicted first.
pub const HISTORY_CAPACITY: usize = 50;

/// Timestamp value meaning "never granted" (or reset after expiry).
pub const UNGRANTED: f64 = 0.0;

/// The timestamp to record for a grant made at `now`.
///
/// `0.0` is reserved for "ungranted", so a grant made at the very start of
/// in-world time is stamped just after it.
pub fn stamp(now: f64) -> f64 {
    if now > UNGRANTED {
        now
    } else {
        f64::EPSILON
    }
}

/// True when a grant made at `timestamp` has outlived `ttl_hours` at `now`.
///
/// `ttl_hours == 0` is permanent mode: nothing ever expires. An ungranted
/// timestamp is never reported as expired.
pub fn is_expired(timestamp: f64, now: f64, ttl_hours: f64) -> bool {
    if timestamp <= UNGRANTED || ttl_hours <= 0.0 {
        return false;
    }
    now - timestamp > ttl_hours * SECONDS_PER_HOUR
}

/// True when a grant exists and is still valid at `now`.
pub fn is_active(timestamp: f64, now: f64, ttl_hours: f64) -> bool {
    timestamp > UNGRANTED && !is_expired(timestamp, now, ttl_hours)
}

/// A timestamped access grant on one resource for one capability class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    pub resource: ResourceId,
    pub capability: CapabilityClass,
    pub timestamp: f64,
}

impl Grant {
    pub fn new(resource: ResourceId, capability: CapabilityClass, timestamp: f64) -> Self {
        Self {
            resource,
            capability,
            timestamp,
        }
    }

    pub fn is_granted(&self) -> bool {
        self.timestamp > UNGRANTED
    }

    pub fn is_expired(&self, now: f64, ttl_hours: f64) -> bool {
        is_expired(self.timestamp, now, ttl_hours)
    }

    /// Granted and not yet expired at `now`.
    pub fn is_active(&self, now: f64, ttl_hours: f64) -> bool {
        is_active(self.timestamp, now, ttl_hours)
    }
}

/// The four grant timestamps of one resource, indexed by capability class.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GrantSet {
    timestamps: [f64; 4],
}

impl GrantSet {
    pub fn get(&self, capability: CapabilityClass) -> f64 {
        self.timestamps[capability.index()]
    }

    pub fn set(&mut self, capability: CapabilityClass, timestamp: f64) {
        self.timestamps[capability.index()] = timestamp;
    }

    pub fn reset(&mut self, capability: CapabilityClass) {
        self.set(capability, UNGRANTED);
    }

    pub fn is_granted(&self, capability: CapabilityClass) -> bool {
        self.get(capability) > UNGRANTED
    }

    pub fn with(mut self, capability: CapabilityClass, timestamp: f64) -> Self {
        self.set(capability, timestamp);
        self
    }

    /// The grant record for one class of `resource`.
    pub fn grant(&self, resource: &ResourceId, capability: CapabilityClass) -> Grant {
        Grant::new(resource.clone(), capability, self.get(capability))
    }
}

/// A failed remote-breach attempt, used for spatial lockouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FailureLockout {
    pub position: Vec3,
    pub timestamp: f64,
}

impl FailureLockout {
    /// True when this failure still locks out `position` at `now`.
    ///
    /// The lockout window is half-open in time (`elapsed < window`) and
    /// closed in space (`distance <= radius`).
    pub fn covers(&self, position: &Vec3, now: f64, window_secs: f64, radius: f64) -> bool {
        now - self.timestamp < window_secs && self.position.within(position, radius)
    }
}

/// A position/timestamp pair history capped at `HISTORY_CAPACITY`.
///
/// Stored as two parallel arrays so the persisted layout matches what the
/// host save format expects. Both arrays always have the same length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundedHistory {
    positions: Vec<Vec3>,
    timestamps: Vec<f64>,
}

impl BoundedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted parallel arrays. Extra elements in the longer
    /// array are dropped, then the oldest entries beyond capacity.
    pub fn from_parts(mut positions: Vec<Vec3>, mut timestamps: Vec<f64>) -> Self {
        let len = positions.len().min(timestamps.len());
        positions.truncate(len);
        timestamps.truncate(len);
        let excess = len.saturating_sub(HISTORY_CAPACITY);
        positions.drain(..excess);
        timestamps.drain(..excess);
        Self { positions, timestamps }
    }

    /// Append an entry, evicting the oldest when full.
    pub fn push(&mut self, position: Vec3, timestamp: f64) {
        if self.positions.len() >= HISTORY_CAPACITY {
            self.positions.remove(0);
            self.timestamps.remove(0);
        }
        self.positions.push(position);
        self.timestamps.push(timestamp);
    }

    /// Drop every entry for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&Vec3, f64) -> bool) {
        let mut idx = 0;
        while idx < self.positions.len() {
            if keep(&self.positions[idx], self.timestamps[idx]) {
                idx += 1;
            } else {
                self.positions.remove(idx);
                self.timestamps.remove(idx);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Entries oldest first, as lockout records.
    pub fn entries(&self) -> impl Iterator<Item = FailureLockout> + '_ {
        self.positions
            .iter()
            .zip(self.timestamps.iter())
            .map(|(position, timestamp)| FailureLockout {
                position: *position,
                timestamp: *timestamp,
            })
    }
}
