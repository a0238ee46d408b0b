//! UseCase: 描画（DRAW）
//!
//! 手番保持者の Draw Command をキャンバスに適用し、元の行のまま他の Active なセッションへ中継します。
//! 送信者には返しません（送信者は自分の画面に描画済み）。

use std::sync::Arc;

use turnboard_shared::{DrawCommand, ServerMessage};

use super::{
    announce::{broadcast_to, reject_turn_command},
    error::DrawError,
};
use crate::domain::{MessagePusher, SessionId, SharedLobby};

pub struct SubmitDrawUseCase {
    lobby: SharedLobby,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SubmitDrawUseCase {
    pub fn new(lobby: SharedLobby, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            lobby,
            message_pusher,
        }
    }

    /// # Arguments
    ///
    /// * `payload` - `DRAW` に続く JSON（中継はこの文字列をそのまま使う）
    pub async fn execute(&self, session_id: &SessionId, payload: &str) -> Result<(), DrawError> {
        let mut lobby = self.lobby.lock().await;
        if let Err(e) = lobby.expect_holder(session_id) {
            return Err(reject_turn_command(self.message_pusher.as_ref(), session_id, e)
                .await
                .into());
        }

        let command = DrawCommand::from_json(payload)?;
        tracing::debug!(
            "Session {} draws {} ({},{})-({},{})",
            session_id,
            command.shape,
            command.x1,
            command.y1,
            command.x2,
            command.y2
        );
        if let Err(e) = lobby.draw(session_id, command) {
            return Err(reject_turn_command(self.message_pusher.as_ref(), session_id, e)
                .await
                .into());
        }

        let targets = lobby.active_session_ids_except(session_id);
        broadcast_to(
            self.message_pusher.as_ref(),
            targets,
            &ServerMessage::Draw(payload.to_string()),
        )
        .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::CanvasOperation,
        usecase::{
            error::TurnError,
            test_support::{Harness, drain},
        },
    };

    const PAYLOAD: &str = r##"{"x1":1,"y1":2,"x2":30,"y2":40,"thickness":3,"colourHex":"#ff0000","shape":"line","filled":false}"##;

    #[tokio::test]
    async fn test_holder_draw_is_applied_and_relayed_to_others() {
        // テスト項目: 保持者の描画はキャンバスに適用され、送信者以外の Active なセッションへ中継される
        // given (前提条件):
        let harness = Harness::new(4);
        let (alice, mut alice_rx) = harness.connect_ready("alice").await;
        let (_bob, mut bob_rx) = harness.connect_ready("bob").await;
        let (_pending, mut pending_rx) = harness.connect().await;
        drain(&mut alice_rx);
        let usecase = SubmitDrawUseCase::new(harness.lobby.clone(), harness.pusher.clone());

        // when (操作):
        let result = usecase.execute(&alice, PAYLOAD).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(drain(&mut bob_rx), vec![format!("DRAW {}", PAYLOAD)]);
        assert!(drain(&mut alice_rx).is_empty());
        assert!(drain(&mut pending_rx).is_empty());
        let lobby = harness.lobby.lock().await;
        assert!(matches!(
            lobby.canvas().history(),
            [CanvasOperation::Draw(command)] if command.x2 == 30
        ));
    }

    #[tokio::test]
    async fn test_non_holder_draw_is_rejected_with_notice() {
        // テスト項目: 保持者以外の描画は案内を返して破棄され、履歴は増えない
        // given (前提条件):
        let harness = Harness::new(4);
        let (_alice, mut alice_rx) = harness.connect_ready("alice").await;
        let (_bob, _bob_rx) = harness.connect_ready("bob").await;
        let (carol, mut carol_rx) = harness.connect_ready("carol").await;
        drain(&mut alice_rx);
        let usecase = SubmitDrawUseCase::new(harness.lobby.clone(), harness.pusher.clone());

        // when (操作):
        let result = usecase.execute(&carol, PAYLOAD).await;

        // then (期待する結果):
        assert_eq!(result, Err(DrawError::Turn(TurnError::NotTurnHolder)));
        assert_eq!(drain(&mut carol_rx), vec!["LOG Not your turn!"]);
        assert!(drain(&mut alice_rx).is_empty());
        assert!(harness.lobby.lock().await.canvas().history().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_dropped() {
        // テスト項目: 解釈できないペイロードは破棄され、中継もされない
        // given (前提条件):
        let harness = Harness::new(4);
        let (alice, _alice_rx) = harness.connect_ready("alice").await;
        let (_bob, mut bob_rx) = harness.connect_ready("bob").await;
        let usecase = SubmitDrawUseCase::new(harness.lobby.clone(), harness.pusher.clone());

        // when (操作):
        let not_json = usecase.execute(&alice, "{not json").await;
        let bad_shape = usecase
            .execute(&alice, &PAYLOAD.replace("\"line\"", "\"hexagon\""))
            .await;

        // then (期待する結果):
        assert!(matches!(not_json, Err(DrawError::MalformedPayload(_))));
        assert!(matches!(bad_shape, Err(DrawError::MalformedPayload(_))));
        assert!(drain(&mut bob_rx).is_empty());
        assert!(harness.lobby.lock().await.canvas().history().is_empty());
    }
}
