//! サーバー設定

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_ADMIN_PORT: u16 = 8080;
pub const DEFAULT_MAX_CLIENTS: usize = 4;
pub const DEFAULT_CANVAS_WIDTH: u32 = 1920;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 1080;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max clients must be at least 1")]
    NoCapacity,

    #[error("canvas dimensions must be positive (got {width}x{height})")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("host must not be empty")]
    EmptyHost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    /// ゲーム用 TCP ポート
    pub port: u16,
    /// 管理 API のポート（`None` で無効）
    pub admin_port: Option<u16>,
    pub max_clients: usize,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            admin_port: Some(DEFAULT_ADMIN_PORT),
            max_clients: DEFAULT_MAX_CLIENTS,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl ServerConfig {
    /// 値を検証して返す
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.max_clients == 0 {
            return Err(ConfigError::NoCapacity);
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::InvalidCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        Ok(self)
    }

    pub fn game_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn admin_addr(&self) -> Option<String> {
        self.admin_port.map(|port| format!("{}:{}", self.host, port))
    }
}
