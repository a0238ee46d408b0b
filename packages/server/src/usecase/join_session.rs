//! UseCase: 表示名の確保（JOIN）
//!
//! 確保できれば本人に JOINED を返して USERLIST を全員に送ります。
//! 空・使用中の名前には NAMEINUSE を返し、段階はそのまま（再試行可能）です。

use std::sync::Arc;

use turnboard_shared::ServerMessage;

use super::{
    announce::{broadcast_roster, push_line},
    error::JoinError,
};
use crate::domain::{LobbyError, MessagePusher, RegistryError, SessionId, SharedLobby, Username};

pub struct JoinSessionUseCase {
    lobby: SharedLobby,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinSessionUseCase {
    pub fn new(lobby: SharedLobby, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            lobby,
            message_pusher,
        }
    }

    pub async fn execute(&self, session_id: &SessionId, name: &str) -> Result<Username, JoinError> {
        let mut lobby = self.lobby.lock().await;
        match lobby.join(session_id, name) {
            Ok(username) => {
                tracing::info!("Session {} joined as '{}'", session_id, username);
                push_line(
                    self.message_pusher.as_ref(),
                    session_id,
                    &ServerMessage::Joined(username.as_str().to_string()),
                )
                .await;
                broadcast_roster(&lobby, self.message_pusher.as_ref()).await;
                Ok(username)
            }
            Err(
                e @ (LobbyError::InvalidUsername(_)
                | LobbyError::Registry(RegistryError::UsernameTaken(_))),
            ) => {
                tracing::info!("Session {} rejected username '{}': {}", session_id, name, e);
                push_line(
                    self.message_pusher.as_ref(),
                    session_id,
                    &ServerMessage::NameInUse,
                )
                .await;
                Err(JoinError::NameRejected {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(JoinError::Ignored(e)),
        }
    }
}
