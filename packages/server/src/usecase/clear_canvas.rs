//! UseCase: 消去（CLEAR）
//!
//! キャンバスを白紙に戻し、送信者を含む全員へ新しいスナップショットを送ります。

use std::sync::Arc;

use turnboard_shared::ServerMessage;

use super::{
    announce::{broadcast_all, reject_turn_command},
    error::ClearError,
};
use crate::domain::{MessagePusher, SessionId, SharedLobby, SnapshotCodec};

pub struct ClearCanvasUseCase {
    lobby: SharedLobby,
    message_pusher: Arc<dyn MessagePusher>,
    codec: Arc<dyn SnapshotCodec>,
}

impl ClearCanvasUseCase {
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

    pub async fn execute(&self, session_id: &SessionId) -> Result<(), ClearError> {
        let mut lobby = self.lobby.lock().await;
        if let Err(e) = lobby.expect_holder(session_id) {
            return Err(reject_turn_command(self.message_pusher.as_ref(), session_id, e)
                .await
                .into());
        }

        // 送るスナップショットを作れてから消去を確定する
        let blob = self.codec.encode(&lobby.canvas().blank())?;
        if let Err(e) = lobby.clear(session_id) {
            return Err(reject_turn_command(self.message_pusher.as_ref(), session_id, e)
                .await
                .into());
        }
        tracing::info!("Session {} cleared the canvas", session_id);

        broadcast_all(
            &lobby,
            self.message_pusher.as_ref(),
            &ServerMessage::LoadImage(blob),
        )
        .await;
        Ok(())
    }
}
