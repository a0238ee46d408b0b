//! UseCase: READY
//!
//! 1. セッションを Active にする
//! 2. 現在のキャンバス全体を本人に LOADIMG で送る
//! 3. 手番保持者がいなければ本人に手番を渡して通知、いれば USERLIST だけ送る
//!
//! すべて 1 つのロック区間で行うため、スナップショットより前の DRAW が本人に届くことはありません。

use std::sync::Arc;

use turnboard_shared::ServerMessage;

use super::{
    announce::{announce_turn_or_roster, push_line},
    error::ReadyError,
};
use crate::domain::{MessagePusher, SessionId, SharedLobby, SnapshotCodec};

pub struct ReadySessionUseCase {
    lobby: SharedLobby,
    message_pusher: Arc<dyn MessagePusher>,
    codec: Arc<dyn SnapshotCodec>,
}

impl ReadySessionUseCase {
    pub fn new(
        lobby: SharedLobby,
        message_pusher: Arc<dyn MessagePusher>,
        codec: Arc<dyn SnapshotCodec>,
    ) -> Self {
        Self {
            lobby,
            message_pusher,
            codec,
        }
    }

    /// # Returns
    ///
    /// * `Ok(Some(id))` - このセッションが手番を受け取った
    /// * `Ok(None)` - 既に手番保持者がいる
    pub async fn execute(&self, session_id: &SessionId) -> Result<Option<SessionId>, ReadyError> {
        let mut lobby = self.lobby.lock().await;
        let new_holder = lobby.ready(session_id).map_err(ReadyError::Ignored)?;
        tracing::info!("Session {} is ready", session_id);

        let snapshot = self.codec.encode(lobby.canvas().raster());
        match &snapshot {
            Ok(blob) => {
                push_line(
                    self.message_pusher.as_ref(),
                    session_id,
                    &ServerMessage::LoadImage(blob.clone()),
                )
                .await;
            }
            Err(e) => tracing::error!("Failed to encode snapshot for {}: {}", session_id, e),
        }

        announce_turn_or_roster(&lobby, self.message_pusher.as_ref(), new_holder).await;
        snapshot?;
        Ok(new_holder)
    }
}
