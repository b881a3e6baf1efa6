//! Transport layer for the DNS sinkhole.
//!
//! The UDP transport receives intercepted datagrams and feeds them through a
//! bounded channel to a worker task that runs the resolver pipeline and sends
//! each response back to its sender.

pub mod udp;

use std::net::SocketAddr;

/// Maximum size of a DNS packet we accept (with some headroom).
pub const MAX_DNS_PACKET_SIZE: usize = 4096;

/// Capacity of the receive-loop to worker channel. When the worker falls
/// behind, further packets are dropped at the socket rather than queued
/// without bound.
pub const PACKET_QUEUE_SIZE: usize = 1024;

/// One raw datagram plus the sender it came from, for reply routing.
pub struct InboundPacket {
    pub data: Vec<u8>,
    pub peer: SocketAddr,
}
