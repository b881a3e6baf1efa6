//! Adtrap - a local DNS sinkhole for ad and tracker domains.
//!
//! This library exposes the codec, filter, and transport for benchmarking and testing.

pub mod dns;
pub mod filter;
pub mod resolver;
pub mod server;
pub mod stats;
pub mod transport;
