//! UseCase 層のエラー定義

use thiserror::Error;
use turnboard_shared::DrawCommandError;

use crate::domain::{CodecError, LobbyError, RegistryError};

/// 接続受付のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("server is full ({capacity} sessions)")]
    ServerFull { capacity: usize },
}

/// JOIN のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// 空・使用中・不正な文字を含む名前（NAMEINUSE を返した）
    #[error("username '{name}' rejected: {reason}")]
    NameRejected { name: String, reason: String },

    /// 表示名待ちの段階ではないため無視した
    #[error("JOIN ignored: {0}")]
    Ignored(LobbyError),
}

/// READY のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadyError {
    #[error("READY ignored: {0}")]
    Ignored(LobbyError),

    #[error("failed to encode canvas snapshot: {0}")]
    Snapshot(#[from] CodecError),
}

/// 手番が必要な操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    /// 手番保持者ではない（"Not your turn!" を返した）
    #[error("session does not hold the turn")]
    NotTurnHolder,

    /// Active ではないため無視した
    #[error("command ignored before the handshake completed")]
    NotActive,

    #[error("session is no longer registered")]
    SessionGone,
}

impl From<LobbyError> for TurnError {
    fn from(e: LobbyError) -> Self {
        match e {
            LobbyError::NotTurnHolder(_) => TurnError::NotTurnHolder,
            LobbyError::Registry(RegistryError::SessionNotFound(_)) => TurnError::SessionGone,
            _ => TurnError::NotActive,
        }
    }
}

/// DRAW のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("malformed draw payload: {0}")]
    MalformedPayload(#[from] DrawCommandError),
}

/// CLEAR のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClearError {
    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("failed to encode canvas snapshot: {0}")]
    Snapshot(#[from] CodecError),
}

/// LOADIMG のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadImageError {
    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("malformed snapshot blob: {0}")]
    MalformedImage(#[from] CodecError),
}

/// CHAT のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("chat ignored before the handshake completed")]
    NotActive,

    #[error("empty chat message")]
    EmptyMessage,
}
