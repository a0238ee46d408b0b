//! UseCase: 画像の読み込み（LOADIMG）
//!
//! 手番保持者が送ったスナップショットをデコードしてキャンバスに合成し、元の行のまま全員へ中継します。
//! デコードできないものはキャンバスに触れずに破棄します。

use std::sync::Arc;

use turnboard_shared::ServerMessage;

use super::{
    announce::{broadcast_all, reject_turn_command},
    error::LoadImageError,
};
use crate::domain::{MessagePusher, SessionId, SharedLobby, SnapshotCodec};

pub struct LoadImageUseCase {
    lobby: SharedLobby,
    message_pusher: Arc<dyn MessagePusher>,
    codec: Arc<dyn SnapshotCodec>,
}

impl LoadImageUseCase {
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

    pub async fn execute(&self, session_id: &SessionId, blob: &str) -> Result<(), LoadImageError> {
        let mut lobby = self.lobby.lock().await;
        if let Err(e) = lobby.expect_holder(session_id) {
            return Err(reject_turn_command(self.message_pusher.as_ref(), session_id, e)
                .await
                .into());
        }

        let image = self.codec.decode(blob)?;
        tracing::info!(
            "Session {} loaded a {}x{} image",
            session_id,
            image.width(),
            image.height()
        );
        if let Err(e) = lobby.load_image(session_id, &image) {
            return Err(reject_turn_command(self.message_pusher.as_ref(), session_id, e)
                .await
                .into());
        }

        broadcast_all(
            &lobby,
            self.message_pusher.as_ref(),
            &ServerMessage::LoadImage(blob.to_string()),
        )
        .await;
        Ok(())
    }
}
