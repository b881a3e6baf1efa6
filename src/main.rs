use clap::Parser;
use std::io;
use std::net::SocketAddr;

use adtrap::server::{self, ServerConfig};

#[derive(Parser)]
#[command(name = "adtrap")]
#[command(about = "DNS sinkhole that answers ad/tracker queries locally", long_about = None)]
struct Args {
    /// Local port to listen on
    #[arg(short, long, default_value = "5353")]
    port: u16,

    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Additional blocklist files (one pattern per line, # comments)
    #[arg(short = 'f', long = "blocklist")]
    blocklists: Vec<String>,

    /// Additional patterns to block (exact domain or *.suffix)
    #[arg(long = "block")]
    patterns: Vec<String>,

    /// Log every query with its verdict and timing
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let bind_addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .expect("invalid bind address");

    let mut extra_lists = Vec::new();
    for path in &args.blocklists {
        match std::fs::read_to_string(path) {
            Ok(text) => extra_lists.push(text),
            Err(e) => {
                eprintln!("failed to read blocklist {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    let config = ServerConfig {
        bind_addr,
        extra_lists,
        extra_patterns: args.patterns,
        verbose: args.verbose,
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(server::run(config))
}
