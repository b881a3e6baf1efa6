//! Statistics tracking for the DNS sinkhole.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters for query verdicts.
///
/// `queries` counts packets that produced a response; malformed packets are
/// counted separately since they are dropped without an answer.
pub struct Stats {
    pub queries: AtomicU64,
    pub blocked: AtomicU64,
    pub allowed: AtomicU64,
    pub malformed: AtomicU64,
}

impl Stats {
    pub fn new() -> Self {
        Self {
            queries: AtomicU64::new(0),
            blocked: AtomicU64::new(0),
            allowed: AtomicU64::new(0),
            malformed: AtomicU64::new(0),
        }
    }

    pub fn record_blocked(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.blocked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_allowed(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.allowed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_malformed(&self) {
        self.malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot_and_reset(&self, uptime_secs: u64) -> StatsSnapshot {
        StatsSnapshot {
            uptime_secs,
            queries: self.queries.swap(0, Ordering::Relaxed),
            blocked: self.blocked.swap(0, Ordering::Relaxed),
            allowed: self.allowed.swap(0, Ordering::Relaxed),
            malformed: self.malformed.swap(0, Ordering::Relaxed),
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

pub struct StatsSnapshot {
    pub uptime_secs: u64,
    pub queries: u64,
    pub blocked: u64,
    pub allowed: u64,
    pub malformed: u64,
}
