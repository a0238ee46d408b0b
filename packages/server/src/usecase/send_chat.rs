//! UseCase: チャット（CHAT）
//!
//! 手番に関係なく、Active なセッションの発言を表示名付きで全員へ送ります。

use std::sync::Arc;

use turnboard_shared::ServerMessage;

use super::{announce::broadcast_all, error::ChatError};
use crate::domain::{MessagePusher, SessionId, SharedLobby};

pub struct SendChatUseCase {
    lobby: SharedLobby,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendChatUseCase {
    pub fn new(lobby: SharedLobby, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            lobby,
            message_pusher,
        }
    }

    pub async fn execute(&self, session_id: &SessionId, text: &str) -> Result<(), ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let lobby = self.lobby.lock().await;
        let from = lobby
            .ensure_active(session_id)
            .map_err(|_| ChatError::NotActive)?
            .as_str()
            .to_string();
        tracing::info!("Chat from '{}': {}", from, text);

        broadcast_all(
            &lobby,
            self.message_pusher.as_ref(),
            &ServerMessage::Chat {
                from,
                text: text.to_string(),
            },
        )
        .await;
        Ok(())
    }
}
