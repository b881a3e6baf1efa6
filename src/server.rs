//! Server assembly.
//!
//! Builds the blocklist, binds the UDP transport, and runs until stopped.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::filter::Blocklist;
use crate::resolver::Resolver;
use crate::transport::udp::UdpTransport;

/// Configuration for the DNS sinkhole server.
pub struct ServerConfig {
    /// Local address to bind (e.g., 127.0.0.1:5353)
    pub bind_addr: SocketAddr,
    /// Extra blocklist file contents to merge over the embedded defaults.
    pub extra_lists: Vec<String>,
    /// Extra patterns to merge (from the command line).
    pub extra_patterns: Vec<String>,
    /// Enable per-query logging (domain, verdict, timing)
    pub verbose: bool,
}

/// Run the DNS sinkhole with the given configuration.
///
/// Binds the UDP transport on the bind address and answers every query
/// locally. Runs indefinitely.
pub async fn run(config: ServerConfig) -> io::Result<()> {
    let mut blocklist = Blocklist::from_defaults();
    for text in &config.extra_lists {
        blocklist.extend_from_text(text);
    }
    for pattern in &config.extra_patterns {
        if !blocklist.insert(pattern) {
            eprintln!("ignoring invalid pattern: {}", pattern);
        }
    }

    let resolver = Arc::new(Resolver::new(blocklist));

    let udp = UdpTransport::bind(config.bind_addr).await?;
    println!(
        "DNS sinkhole listening on {} ({} patterns loaded)",
        udp.local_addr()?,
        resolver.pattern_count()
    );
    udp.start(resolver.clone(), config.verbose);

    // Print stats every minute
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        interval.tick().await; // Skip first immediate tick
        loop {
            interval.tick().await;
            let stats = resolver.stats_snapshot_and_reset();
            println!(
                "[stats] uptime={}s queries={} blocked={} allowed={} malformed={}",
                stats.uptime_secs, stats.queries, stats.blocked, stats.allowed, stats.malformed
            );
        }
    });

    // Keep running forever
    std::future::pending::<()>().await;

    Ok(())
}
