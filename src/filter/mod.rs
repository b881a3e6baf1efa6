//! DNS query filtering module.
//!
//! Provides ad-blocking by matching queried domains against a blocklist of
//! exact and wildcard patterns. The lookup path works on immutable
//! [`Blocklist`] snapshots; the control path publishes updated snapshots
//! through [`BlocklistHandle`].

mod blocklist;

pub use blocklist::{Blocklist, is_valid_domain};

use std::sync::Arc;

use arc_swap::ArcSwap;

/// Shared handle to the current blocklist snapshot.
///
/// Lookups load the current snapshot without locking; updates build a new
/// `Blocklist` and swap it in atomically, so a reader always sees either the
/// pre- or post-update set, never a partial one.
pub struct BlocklistHandle {
    current: ArcSwap<Blocklist>,
}

impl BlocklistHandle {
    pub fn new(blocklist: Blocklist) -> Self {
        Self {
            current: ArcSwap::from_pointee(blocklist),
        }
    }

    /// The current snapshot. Cheap; the hot path calls this per query.
    pub fn snapshot(&self) -> Arc<Blocklist> {
        self.current.load_full()
    }

    /// Replace the entire blocklist with a new snapshot.
    pub fn replace(&self, blocklist: Blocklist) {
        self.current.store(Arc::new(blocklist));
    }

    /// Add a pattern, publishing a new snapshot. Returns `false` when the
    /// pattern fails validation, leaving the current snapshot untouched.
    ///
    /// Uses `rcu` so concurrent mutations retry instead of overwriting each
    /// other's snapshots.
    pub fn add(&self, pattern: &str) -> bool {
        let suffix = pattern.strip_prefix("*.").unwrap_or(pattern);
        if !is_valid_domain(suffix) {
            return false;
        }
        self.current.rcu(|current| {
            let mut next = (**current).clone();
            next.insert(pattern);
            next
        });
        true
    }

    /// Remove a pattern, publishing a new snapshot. Returns `true` if the
    /// pattern was present.
    pub fn remove(&self, pattern: &str) -> bool {
        let mut removed = false;
        self.current.rcu(|current| {
            let mut next = (**current).clone();
            removed = next.remove(pattern);
            next
        });
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_publishes_a_new_snapshot() {
        let handle = BlocklistHandle::new(Blocklist::new());
        let before = handle.snapshot();

        assert!(handle.add("ads.example.com"));

        assert!(!before.is_blocked("ads.example.com"));
        assert!(handle.snapshot().is_blocked("ads.example.com"));
    }

    #[test]
    fn add_invalid_pattern_keeps_current_snapshot() {
        let handle = BlocklistHandle::new(Blocklist::new());

        assert!(!handle.add("a..b"));
        assert!(handle.snapshot().is_empty());
    }

    #[test]
    fn concurrent_adds_are_all_kept() {
        let handle = Arc::new(BlocklistHandle::new(Blocklist::new()));

        let threads: Vec<_> = (0..8)
            .map(|i| {
                let handle = Arc::clone(&handle);
                std::thread::spawn(move || {
                    assert!(handle.add(&format!("host{i}.example.com")));
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        assert_eq!(handle.snapshot().len(), 8);
    }

    #[test]
    fn remove_publishes_a_new_snapshot() {
        let mut list = Blocklist::new();
        list.insert("ads.example.com");
        let handle = BlocklistHandle::new(list);

        assert!(handle.remove("ads.example.com"));
        assert!(!handle.remove("ads.example.com"));
        assert!(!handle.snapshot().is_blocked("ads.example.com"));
    }
}
