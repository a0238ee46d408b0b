//! Connection and HTTP handlers.

pub mod connection;
pub mod http;

pub use connection::handle_connection;
pub use http::{get_lobby, health_check};
