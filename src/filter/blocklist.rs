//! Blocklist of ad/tracking domain patterns.
//!
//! A pattern is either an exact lowercase domain or a `*.suffix` wildcard
//! matching any domain with at least one label prepended to the suffix.
//! A `Blocklist` value is immutable once built; the mutation path constructs
//! a new list and swaps it in (see [`crate::filter::BlocklistHandle`]).

use rustc_hash::FxHashSet;

/// Embedded default blocklist, loaded at compile time.
const DOMAINS_LIST: &str = include_str!("domains.txt");

const MAX_DOMAIN_LEN: usize = 255;

/// An immutable set of blocked domain patterns.
///
/// Exact entries and wildcard suffixes are kept in separate sets so the hot
/// lookup path never allocates a candidate pattern string.
#[derive(Debug, Clone, Default)]
pub struct Blocklist {
    exact: FxHashSet<String>,
    wildcard: FxHashSet<String>,
}

impl Blocklist {
    /// Create an empty blocklist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a blocklist from the embedded default domains list.
    pub fn from_defaults() -> Self {
        let mut list = Self::new();
        list.extend_from_text(DOMAINS_LIST);
        list
    }

    /// Parse blocklist text in the remote-list format: one pattern per line,
    /// blank lines and `#` comments skipped, every surviving line lowercased,
    /// trimmed, and validated before inclusion. Invalid lines are dropped
    /// silently, never partially inserted.
    pub fn extend_from_text(&mut self, text: &str) {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.insert(line);
        }
    }

    /// Add a single pattern, returning `false` (and inserting nothing) when
    /// it fails the domain-validity check. Wildcard patterns are validated
    /// against their suffix, so `*.example.com` is accepted. Re-inserting a
    /// pattern that is already present is a valid no-op.
    pub fn insert(&mut self, pattern: &str) -> bool {
        let pattern = pattern.to_lowercase();
        match pattern.strip_prefix("*.") {
            Some(suffix) => {
                if !is_valid_domain(suffix) {
                    return false;
                }
                self.wildcard.insert(suffix.to_string());
            }
            None => {
                if !is_valid_domain(&pattern) {
                    return false;
                }
                self.exact.insert(pattern);
            }
        }
        true
    }

    /// Remove a pattern. Returns `true` if it was present.
    pub fn remove(&mut self, pattern: &str) -> bool {
        let pattern = pattern.to_lowercase();
        match pattern.strip_prefix("*.") {
            Some(suffix) => self.wildcard.remove(suffix),
            None => self.exact.remove(&pattern),
        }
    }

    /// Check if a domain should be blocked.
    ///
    /// Exact match first, then wildcard: every suffix reached by stripping
    /// one or more leading labels is tested against the wildcard set, so
    /// `*.example.com` blocks `sub.ads.example.com` but never `example.com`
    /// itself. Case-insensitive; never a substring match.
    pub fn is_blocked(&self, domain: &str) -> bool {
        let domain = domain.to_lowercase();

        if self.exact.contains(domain.as_str()) {
            return true;
        }

        let mut rest = domain.as_str();
        while let Some(pos) = rest.find('.') {
            rest = &rest[pos + 1..];
            if self.wildcard.contains(rest) {
                return true;
            }
        }

        false
    }

    /// Returns the number of patterns in the blocklist.
    pub fn len(&self) -> usize {
        self.exact.len() + self.wildcard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.wildcard.is_empty()
    }
}

/// Check a domain against the hostname grammar: dot-separated labels, each
/// starting and ending alphanumeric with alphanumeric or hyphen interiors,
/// 255 bytes total at most. Case-insensitive.
pub fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }

    domain.split('.').all(|label| {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        let bytes = label.as_bytes();
        if bytes[0] == b'-' || bytes[bytes.len() - 1] == b'-' {
            return false;
        }
        bytes
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'-')
    })
}
