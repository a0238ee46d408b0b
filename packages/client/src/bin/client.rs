//! Turnboard terminal client.
//!
//! Connects to a Turnboard server, claims a username and prints the game as it
//! happens. Slash commands draw on the shared canvas while it is your turn;
//! anything else is sent as chat.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin turnboard-client -- --username alice
//! cargo run --bin turnboard-client -- -u bob -H 192.168.0.10 -p 5000
//! ```

use clap::Parser;

use turnboard_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "turnboard-client")]
#[command(about = "Terminal client for the Turnboard shared canvas", long_about = None)]
struct Args {
    /// Username to claim (must be unique, case-insensitively)
    #[arg(short = 'u', long)]
    username: String,

    /// Server host
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server game port
    #[arg(short = 'p', long, default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);

    if let Err(e) = turnboard_client::run_client(addr, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
