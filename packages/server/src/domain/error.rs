//! ドメイン層のエラー定義

use thiserror::Error;

use super::{entity::SessionPhase, value_object::SessionId};

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("username must not be empty")]
    UsernameEmpty,

    #[error("username '{0}' contains a reserved character")]
    UsernameInvalidCharacter(String),
}

/// SessionRegistry の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("server is full ({capacity} sessions)")]
    Full { capacity: usize },

    #[error("session {0} is not registered")]
    SessionNotFound(SessionId),

    #[error("username '{0}' is already claimed")]
    UsernameTaken(String),

    #[error("session {0} already has a username")]
    AlreadyNamed(SessionId),
}

/// Lobby（レジストリ・手番・キャンバスの集約）の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    InvalidUsername(#[from] ValueObjectError),

    #[error("session {session_id} is {actual:?}, expected {expected:?}")]
    UnexpectedPhase {
        session_id: SessionId,
        expected: SessionPhase,
        actual: SessionPhase,
    },

    #[error("session {0} does not hold the turn")]
    NotTurnHolder(SessionId),

    #[error("session {0} is active without a username")]
    MissingUsername(SessionId),
}

/// キャンバスの生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// スナップショットのエンコード・デコードエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("snapshot blob is not valid base64: {0}")]
    InvalidEncoding(String),

    #[error("snapshot image could not be processed: {0}")]
    InvalidImage(String),

    #[error("snapshot image is empty")]
    EmptyImage,
}

/// メッセージ送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("session {0} is not registered to the message pusher")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
