//! UseCase: 接続受付
//!
//! 定員に空きがあればセッションを登録し、送信チャンネルを MessagePusher に登録します。
//! 定員を超えた接続はセッションを作らずに拒否します（呼び出し側が FULL を返して切断する）。

use std::sync::Arc;

use turnboard_shared::time::Clock;

use super::error::ConnectError;
use crate::domain::{MessagePusher, PusherChannel, Session, SessionId, SharedLobby, Timestamp};

pub struct ConnectSessionUseCase {
    lobby: SharedLobby,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectSessionUseCase {
    pub fn new(
        lobby: SharedLobby,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            lobby,
            message_pusher,
            clock,
        }
    }

    /// 接続を受け付ける
    ///
    /// # Returns
    ///
    /// * `Ok(SessionId)` - 登録したセッションの ID
    /// * `Err(ConnectError::ServerFull)` - 定員に達している
    pub async fn execute(&self, sender: PusherChannel) -> Result<SessionId, ConnectError> {
        let mut lobby = self.lobby.lock().await;
        if lobby.is_full() {
            return Err(ConnectError::ServerFull {
                capacity: lobby.registry().capacity(),
            });
        }

        let session = Session::new(SessionId::generate(), Timestamp::new(self.clock.now_millis()));
        let session_id = session.id;
        lobby
            .admit(session)
            .map_err(|_| ConnectError::ServerFull {
                capacity: lobby.registry().capacity(),
            })?;
        self.message_pusher.register_client(session_id, sender).await;

        tracing::info!(
            "Session {} admitted ({}/{})",
            session_id,
            lobby.registry().len(),
            lobby.registry().capacity()
        );
        Ok(session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{CONNECTED_AT, Harness};
    use tokio::sync::mpsc;
    use turnboard_shared::time::FixedClock;

    #[tokio::test]
    async fn test_connect_registers_pending_session() {
        // テスト項目: 接続すると表示名待ちのセッションが登録される
        // given (前提条件):
        let harness = Harness::new(2);

        // when (操作):
        let (session_id, _rx) = harness.connect().await;

        // then (期待する結果):
        let lobby = harness.lobby.lock().await;
        let session = lobby.registry().get(&session_id).unwrap();
        assert!(session.username().is_none());
        assert_eq!(session.connected_at, Timestamp::new(CONNECTED_AT));
        assert_eq!(
            lobby.registry().snapshot_ordered_usernames(),
            vec!["joining..."]
        );
    }

    #[tokio::test]
    async fn test_connect_rejected_when_full() {
        // テスト項目: 定員に達していると ServerFull になり、セッションは作られない
        // given (前提条件):
        let harness = Harness::new(1);
        harness.connect().await;
        let usecase = ConnectSessionUseCase::new(
            harness.lobby.clone(),
            harness.pusher.clone(),
            Arc::new(FixedClock::new(CONNECTED_AT)),
        );
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(tx).await;

        // then (期待する結果):
        assert_eq!(result, Err(ConnectError::ServerFull { capacity: 1 }));
        assert_eq!(harness.lobby.lock().await.registry().len(), 1);
    }
}
