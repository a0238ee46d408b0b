//! Turnboard server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin turnboard-server
//! cargo run --bin turnboard-server -- --host 0.0.0.0 --port 5000 --max-clients 6
//! ```

use clap::Parser;
use turnboard_server::{ServerConfig, ServerError, build_server};
use turnboard_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "turnboard-server")]
#[command(about = "Turn-based shared canvas server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// TCP port for the drawing protocol
    #[arg(short = 'p', long, default_value = "5000")]
    port: u16,

    /// Port for the admin HTTP API (0 disables it)
    #[arg(long, default_value = "8080")]
    admin_port: u16,

    /// Maximum number of concurrent sessions
    #[arg(short = 'm', long, default_value = "4")]
    max_clients: usize,

    /// Canvas width in pixels
    #[arg(long, default_value = "1920")]
    canvas_width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value = "1080")]
    canvas_height: u32,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            admin_port: (args.admin_port != 0).then_some(args.admin_port),
            max_clients: args.max_clients,
            canvas_width: args.canvas_width,
            canvas_height: args.canvas_height,
        }
    }
}

async fn run(args: Args) -> Result<(), ServerError> {
    let config = ServerConfig::from(args).validate()?;
    let server = build_server(&config)?;
    server.run(&config).await
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    if let Err(e) = run(args).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
