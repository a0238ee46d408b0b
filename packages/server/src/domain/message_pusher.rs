//! MessagePusher trait 定義
//!
//! セッションへの行送信（Broadcast Bus）のインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::SessionId};

/// セッションの書き込みタスクへ 1 行ずつ渡すチャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// UseCase 層はこの trait に依存し、送信手段の実装には依存しない。
/// 送信はチャンネルへの投入のみで、ネットワーク書き込みの完了は待たない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// セッションの送信チャンネルを登録
    async fn register_client(&self, session_id: SessionId, sender: PusherChannel);

    /// セッションの送信チャンネルを登録解除
    async fn unregister_client(&self, session_id: &SessionId);

    /// 特定のセッションに 1 行送信
    async fn push_to(&self, session_id: &SessionId, line: &str) -> Result<(), MessagePushError>;

    /// 複数のセッションに同じ行を送信
    ///
    /// 一部の送信先が見つからない・切断済みの場合も他の送信先への送信は続ける。
    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        line: &str,
    ) -> Result<(), MessagePushError>;
}
