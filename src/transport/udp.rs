//! UDP transport for intercepted DNS queries.
//!
//! Two tasks: a receive loop that reads datagrams off the socket and pushes
//! them into a bounded channel, and a worker that drains the channel, asks
//! the resolver for a verdict, and sends the response back to the sender.
//! Splitting them keeps the socket drained even while responses are being
//! built, and bounds memory when a burst outpaces the worker.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use tokio::net::UdpSocket;
use tokio::sync::mpsc;

use crate::resolver::{QueryAction, Resolver};

use super::{InboundPacket, MAX_DNS_PACKET_SIZE, PACKET_QUEUE_SIZE};

/// UDP transport for the DNS sinkhole.
pub struct UdpTransport {
    socket: Arc<UdpSocket>,
}

impl UdpTransport {
    /// Bind the listening socket.
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        let socket = Arc::new(UdpSocket::bind(addr).await?);
        Ok(Self { socket })
    }

    /// The address the socket actually bound to (useful with port 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Start the transport: one receive loop, one worker.
    pub fn start(self, resolver: Arc<Resolver>, verbose: bool) {
        let (tx, rx) = mpsc::channel::<InboundPacket>(PACKET_QUEUE_SIZE);

        tokio::spawn(run_recv_loop(self.socket.clone(), tx));
        tokio::spawn(run_worker(self.socket, rx, resolver, verbose));
    }
}

/// Receive loop: reads datagrams and queues them for the worker.
///
/// Uses `try_send` so a full queue drops the packet instead of stalling the
/// socket; the client will retry, which is normal DNS behavior.
async fn run_recv_loop(socket: Arc<UdpSocket>, tx: mpsc::Sender<InboundPacket>) {
    let mut buf = [0u8; MAX_DNS_PACKET_SIZE];

    loop {
        let (len, peer) = match socket.recv_from(&mut buf).await {
            Ok(r) => r,
            Err(e) => {
                eprintln!("UDP recv error: {}", e);
                continue;
            }
        };

        let packet = InboundPacket {
            data: buf[..len].to_vec(),
            peer,
        };

        if tx.try_send(packet).is_err() {
            eprintln!("packet queue full, dropping datagram from {}", peer);
        }
    }
}

/// Worker: drains the queue, runs decode -> match -> encode per packet, and
/// sends each response back to its sender. Exits when the receive loop ends.
async fn run_worker(
    socket: Arc<UdpSocket>,
    mut rx: mpsc::Receiver<InboundPacket>,
    resolver: Arc<Resolver>,
    verbose: bool,
) {
    while let Some(packet) = rx.recv().await {
        let start_time = Instant::now();

        match resolver.process_query(&packet.data) {
            QueryAction::Respond {
                response,
                domain,
                blocked,
            } => {
                if let Err(e) = socket.send_to(&response, packet.peer).await {
                    eprintln!("UDP send error: {}", e);
                }
                if verbose {
                    let elapsed = start_time.elapsed();
                    println!(
                        "[UDP] {} {} total={:.3}ms",
                        domain,
                        if blocked { "BLOCKED" } else { "OK" },
                        elapsed.as_secs_f64() * 1000.0
                    );
                }
            }
            QueryAction::Drop => {
                if verbose {
                    println!("[UDP] malformed packet from {} dropped", packet.peer);
                }
            }
        }
    }
}
