//! ドメイン層
//!
//! - `value_object` / `entity`: セッションの識別子・表示名・ハンドシェイク段階
//! - `registry` / `turn` / `canvas`: Lobby を構成する状態
//! - `lobby`: 上記を 1 つのロックでまとめた集約
//! - `message_pusher` / `snapshot_codec`: Infrastructure 層が実装するインターフェース

pub mod canvas;
pub mod entity;
pub mod error;
pub mod lobby;
pub mod message_pusher;
pub mod registry;
pub mod snapshot_codec;
pub mod turn;
pub mod value_object;

pub use canvas::{Canvas, CanvasOperation};
pub use entity::{Session, SessionPhase};
pub use error::{
    CanvasError, CodecError, LobbyError, MessagePushError, RegistryError, ValueObjectError,
};
pub use lobby::{Departure, Lobby, LobbyState, SessionSummary, SharedLobby};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::SessionRegistry;
pub use snapshot_codec::SnapshotCodec;
pub use turn::TurnCoordinator;
pub use value_object::{SessionId, Timestamp, Username};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
