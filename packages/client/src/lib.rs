//! Turnboard terminal client.
//!
//! Speaks the line protocol over TCP, prints server traffic in human form and
//! turns slash commands typed at the prompt into protocol commands.

mod domain;
mod error;
mod formatter;
mod input;
mod runner;
mod session;
mod ui;

pub use error::ClientError;
pub use runner::run_client;
