//! Per-packet decision pipeline.
//!
//! Decode the query, match the domain against the blocklist snapshot, encode
//! the response. Transports handle the actual I/O; the resolver only decides.

use std::time::Instant;

use crate::dns::{self, DnsQuery};
use crate::filter::{Blocklist, BlocklistHandle};
use crate::stats::{Stats, StatsSnapshot};

/// Outcome of processing one inbound packet.
pub enum QueryAction {
    /// Send this response back to the sender.
    Respond {
        response: Vec<u8>,
        domain: String,
        blocked: bool,
    },
    /// The packet could not be decoded (or the response could not be
    /// encoded); drop it silently.
    Drop,
}

/// Resolver owns the blocklist handle and stats shared by transports.
///
/// Processing is synchronous and pure per call: nothing is retained between
/// packets except the atomically swapped blocklist snapshot.
pub struct Resolver {
    blocklist: BlocklistHandle,
    stats: Stats,
    started: Instant,
}

impl Resolver {
    /// Create a new resolver with the given blocklist.
    pub fn new(blocklist: Blocklist) -> Self {
        Self {
            blocklist: BlocklistHandle::new(blocklist),
            stats: Stats::new(),
            started: Instant::now(),
        }
    }

    /// Process one raw DNS packet and decide what to do with it.
    ///
    /// Malformed packets (too short, responses, zero questions, undecodable
    /// names) are dropped. Everything else gets an answer: a sinkhole
    /// address when the domain is blocked, an empty NOERROR otherwise.
    pub fn process_query(&self, packet: &[u8]) -> QueryAction {
        let Some(query) = DnsQuery::parse(packet) else {
            self.stats.record_malformed();
            return QueryAction::Drop;
        };

        let blocked = self.blocklist.snapshot().is_blocked(&query.domain);

        let Some(response) = dns::build_response(packet, &query.domain, blocked) else {
            self.stats.record_malformed();
            return QueryAction::Drop;
        };

        if blocked {
            self.stats.record_blocked();
        } else {
            self.stats.record_allowed();
        }

        QueryAction::Respond {
            response,
            domain: query.domain,
            blocked,
        }
    }

    /// Add a pattern to the blocklist. Returns `false` for invalid patterns.
    pub fn add_pattern(&self, pattern: &str) -> bool {
        self.blocklist.add(pattern)
    }

    /// Remove a pattern from the blocklist.
    pub fn remove_pattern(&self, pattern: &str) -> bool {
        self.blocklist.remove(pattern)
    }

    /// Replace the blocklist wholesale, e.g. after a list refresh.
    pub fn install_blocklist(&self, blocklist: Blocklist) {
        self.blocklist.replace(blocklist);
    }

    /// Returns the number of patterns in the current blocklist.
    pub fn pattern_count(&self) -> usize {
        self.blocklist.snapshot().len()
    }

    /// Stats counters since the last snapshot, plus total uptime.
    pub fn stats_snapshot_and_reset(&self) -> StatsSnapshot {
        self.stats
            .snapshot_and_reset(self.started.elapsed().as_secs())
    }
}
