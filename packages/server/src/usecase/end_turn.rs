//! UseCase: 手番終了（ENDTURN）

use std::sync::Arc;

use super::{
    announce::{announce_turn_or_roster, reject_turn_command},
    error::TurnError,
};
use crate::domain::{MessagePusher, SessionId, SharedLobby};

pub struct EndTurnUseCase {
    lobby: SharedLobby,
    message_pusher: Arc<dyn MessagePusher>,
}

impl EndTurnUseCase {
    pub fn new(lobby: SharedLobby, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            lobby,
            message_pusher,
        }
    }

    /// 手番を次の READY 済みセッションへ渡し、新しい保持者を返す
    pub async fn execute(&self, session_id: &SessionId) -> Result<Option<SessionId>, TurnError> {
        let mut lobby = self.lobby.lock().await;
        match lobby.end_turn(session_id) {
            Ok(new_holder) => {
                tracing::info!("Session {} ended its turn", session_id);
                announce_turn_or_roster(&lobby, self.message_pusher.as_ref(), new_holder).await;
                Ok(new_holder)
            }
            Err(e) => Err(reject_turn_command(self.message_pusher.as_ref(), session_id, e).await),
        }
    }
}
