//! Time sources.

use std::sync::Mutex;

use chrono::Utc;

use crate::traits::Clock;

/// A `Clock` backed by UTC wall time, in seconds since the Unix epoch.
///
/// For hosts without an in-world clock. Game hosts should implement `Clock`
/// over their own simulation time so TTLs follow in-game hours.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> f64 {
        Utc::now().timestamp_millis() as f64 / 1000.0
    }
}

/// A settable clock for scripted worlds and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<f64>,
}

impl ManualClock {
    pub fn at(now: f64) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: f64) {
        *self.now.lock().unwrap_or_else(|p| p.into_inner()) = now;
    }

    pub fn advance(&self, secs: f64) {
        *self.now.lock().unwrap_or_else(|p| p.into_inner()) += secs;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}
