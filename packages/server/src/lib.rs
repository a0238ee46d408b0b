//! Turnboard server library.
//!
//! A turn-coordination server for a shared drawing canvas. Clients speak a
//! line-based protocol over TCP; exactly one ready participant at a time may
//! mutate the canvas, and every accepted mutation is relayed to the others.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod bootstrap;
pub mod config;
pub mod error;

pub use bootstrap::build_server;
pub use config::{ConfigError, ServerConfig};
pub use error::ServerError;
pub use ui::Server;
