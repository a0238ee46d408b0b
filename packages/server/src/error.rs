//! サーバー起動・実行時のエラー

use thiserror::Error;

use crate::{config::ConfigError, domain::CanvasError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create canvas: {0}")]
    Canvas(#[from] CanvasError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
