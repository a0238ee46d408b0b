//! ユースケースのテスト用ヘルパー

use std::sync::Arc;

use tokio::sync::mpsc;
use turnboard_shared::time::FixedClock;

use super::{ConnectSessionUseCase, JoinSessionUseCase, ReadySessionUseCase};
use crate::{
    domain::{Canvas, Lobby, SessionId, SharedLobby},
    infrastructure::{codec::PngBase64Codec, message_pusher::ChannelMessagePusher},
};

pub(crate) const CONNECTED_AT: i64 = 1_700_000_000_000;

/// 実際のチャンネルとコーデックで組み立てた Lobby
pub(crate) struct Harness {
    pub lobby: SharedLobby,
    pub pusher: Arc<ChannelMessagePusher>,
    pub codec: Arc<PngBase64Codec>,
}

impl Harness {
    pub fn new(capacity: usize) -> Self {
        let canvas = Canvas::new(64, 48).unwrap();
        Self {
            lobby: Lobby::new(capacity, canvas).into_shared(),
            pusher: Arc::new(ChannelMessagePusher::new()),
            codec: Arc::new(PngBase64Codec::new()),
        }
    }

    pub async fn connect(&self) -> (SessionId, mpsc::UnboundedReceiver<String>) {
        let usecase = ConnectSessionUseCase::new(
            self.lobby.clone(),
            self.pusher.clone(),
            Arc::new(FixedClock::new(CONNECTED_AT)),
        );
        let (tx, rx) = mpsc::unbounded_channel();
        let session_id = usecase.execute(tx).await.unwrap();
        (session_id, rx)
    }

    pub async fn join(&self, session_id: &SessionId, name: &str) {
        JoinSessionUseCase::new(self.lobby.clone(), self.pusher.clone())
            .execute(session_id, name)
            .await
            .unwrap();
    }

    pub async fn ready(&self, session_id: &SessionId) {
        ReadySessionUseCase::new(self.lobby.clone(), self.pusher.clone(), self.codec.clone())
            .execute(session_id)
            .await
            .unwrap();
    }

    /// 接続・JOIN・READY まで済ませ、それまでに届いた行は捨てる
    pub async fn connect_ready(&self, name: &str) -> (SessionId, mpsc::UnboundedReceiver<String>) {
        let (session_id, mut rx) = self.connect().await;
        self.join(&session_id, name).await;
        self.ready(&session_id).await;
        drain(&mut rx);
        (session_id, rx)
    }
}

/// 受信済みの行をすべて取り出す
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Ok(line) = rx.try_recv() {
        lines.push(line);
    }
    lines
}
