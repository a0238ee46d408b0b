//! mpsc チャンネルを使った MessagePusher 実装
//!
//! TCP ストリームへの書き込みは UI 層の書き込みタスクが行います。
//! この実装は各セッションの `UnboundedSender` を保持し、行を投入するだけです。
//! 投入はブロックしないため、遅いクライアントが他のセッションへの配信を止めることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, SessionId};

#[derive(Default)]
pub struct ChannelMessagePusher {
    /// 接続中のセッションの送信チャンネル
    sessions: Mutex<HashMap<SessionId, PusherChannel>>,
}

impl ChannelMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for ChannelMessagePusher {
    async fn register_client(&self, session_id: SessionId, sender: PusherChannel) {
        self.sessions.lock().await.insert(session_id, sender);
        tracing::debug!("Session {} registered to MessagePusher", session_id);
    }

    async fn unregister_client(&self, session_id: &SessionId) {
        self.sessions.lock().await.remove(session_id);
        tracing::debug!("Session {} unregistered from MessagePusher", session_id);
    }

    async fn push_to(&self, session_id: &SessionId, line: &str) -> Result<(), MessagePushError> {
        let sessions = self.sessions.lock().await;
        let sender = sessions
            .get(session_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(session_id.to_string()))?;
        sender
            .send(line.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }

    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        line: &str,
    ) -> Result<(), MessagePushError> {
        let sessions = self.sessions.lock().await;

        for target in targets {
            match sessions.get(&target) {
                // 書き込みタスクが終了済みのセッションは自身の切断処理に任せる
                Some(sender) => {
                    if let Err(e) = sender.send(line.to_string()) {
                        tracing::warn!("Failed to push line to session {}: {}", target, e);
                    }
                }
                None => {
                    tracing::debug!("Session {} not found during broadcast, skipping", target);
                }
            }
        }

        Ok(())
    }
}
