//! UseCase: 切断
//!
//! ハンドシェイクのどの段階でも、セッションを削除して表示名を解放します。
//! 手番保持者だった場合は参加順で後続のセッションへ手番を渡し、USERLIST を全員に送ります。

use std::sync::Arc;

use super::announce::{announce_turn_or_roster, broadcast_roster};
use crate::domain::{Departure, MessagePusher, SessionId, SharedLobby};

pub struct DisconnectSessionUseCase {
    lobby: SharedLobby,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSessionUseCase {
    pub fn new(lobby: SharedLobby, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            lobby,
            message_pusher,
        }
    }

    /// 既に削除済みなら `None`
    pub async fn execute(&self, session_id: &SessionId) -> Option<Departure> {
        let mut lobby = self.lobby.lock().await;
        self.message_pusher.unregister_client(session_id).await;
        let departure = lobby.remove(session_id)?;

        let name = departure
            .session
            .username()
            .map_or_else(|| "(unnamed)".to_string(), |u| u.to_string());
        tracing::info!(
            "Session {} ('{}') removed, {} remaining",
            session_id,
            name,
            lobby.registry().len()
        );

        if departure.held_turn {
            announce_turn_or_roster(&lobby, self.message_pusher.as_ref(), departure.new_holder)
                .await;
        } else {
            broadcast_roster(&lobby, self.message_pusher.as_ref()).await;
        }
        Some(departure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{Harness, drain};

    #[tokio::test]
    async fn test_holder_disconnect_passes_turn() {
        // テスト項目: 手番保持者が切断すると後続が手番を受け取り、USERLIST が更新される
        // given (前提条件):
        let harness = Harness::new(4);
        let (alice, _alice_rx) = harness.connect_ready("alice").await;
        let (bob, mut bob_rx) = harness.connect_ready("bob").await;
        let (_carol, mut carol_rx) = harness.connect_ready("carol").await;
        drain(&mut bob_rx);
        let usecase = DisconnectSessionUseCase::new(harness.lobby.clone(), harness.pusher.clone());

        // when (操作):
        let departure = usecase.execute(&alice).await.unwrap();

        // then (期待する結果):
        assert!(departure.held_turn);
        assert_eq!(departure.new_holder, Some(bob));
        assert_eq!(
            drain(&mut bob_rx),
            vec!["TURN", "LOG It's bob's turn!", "USERLIST bob,carol|0|1"]
        );
        assert_eq!(
            drain(&mut carol_rx),
            vec!["LOG It's bob's turn!", "USERLIST bob,carol|0|1"]
        );
    }

    #[tokio::test]
    async fn test_non_holder_disconnect_keeps_holder() {
        // テスト項目: 保持者より前のセッションが切断しても保持者は変わらず、位置だけ更新される
        // given (前提条件):
        let harness = Harness::new(4);
        let (alice, _alice_rx) = harness.connect_ready("alice").await;
        let (bob, _bob_rx) = harness.connect_ready("bob").await;
        let (_carol, mut carol_rx) = harness.connect_ready("carol").await;
        crate::usecase::EndTurnUseCase::new(harness.lobby.clone(), harness.pusher.clone())
            .execute(&alice)
            .await
            .unwrap();
        drain(&mut carol_rx);
        let usecase = DisconnectSessionUseCase::new(harness.lobby.clone(), harness.pusher.clone());

        // when (操作):
        let departure = usecase.execute(&alice).await.unwrap();

        // then (期待する結果):
        assert!(!departure.held_turn);
        assert_eq!(harness.lobby.lock().await.holder(), Some(bob));
        assert_eq!(drain(&mut carol_rx), vec!["USERLIST bob,carol|0|1"]);
    }

    #[tokio::test]
    async fn test_pending_session_disconnect_releases_slot() {
        // テスト項目: 表示名確定前に切断したセッションも削除され、定員が空く
        // given (前提条件):
        let harness = Harness::new(1);
        let (pending, _rx) = harness.connect().await;
        let usecase = DisconnectSessionUseCase::new(harness.lobby.clone(), harness.pusher.clone());

        // when (操作):
        let departure = usecase.execute(&pending).await;

        // then (期待する結果):
        assert!(departure.is_some());
        assert!(!harness.lobby.lock().await.is_full());
    }

    #[tokio::test]
    async fn test_disconnect_twice_is_noop() {
        // テスト項目: 同じセッションの 2 回目の切断処理は何もしない
        // given (前提条件):
        let harness = Harness::new(4);
        let (alice, _rx) = harness.connect_ready("alice").await;
        let usecase = DisconnectSessionUseCase::new(harness.lobby.clone(), harness.pusher.clone());
        usecase.execute(&alice).await;

        // when (操作):
        let second = usecase.execute(&alice).await;

        // then (期待する結果):
        assert!(second.is_none());
    }
}
