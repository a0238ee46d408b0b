//! UI 層: TCP の接続受付・行プロトコルの入出力・管理 API

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use signal::shutdown_signal;
