//! Entity 定義

use super::value_object::{SessionId, Timestamp, Username};

/// セッションのハンドシェイク段階
///
/// ```text
/// AwaitingUsername --JOIN--> AwaitingReady --READY--> Active
/// ```
///
/// 切断（CLOSED）は状態として保持せず、レジストリからの削除で表現します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingUsername,
    AwaitingReady,
    Active,
}

/// 接続中の参加者ひとりぶんのサーバー側状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    /// 一度だけ割り当てられ、以後変更されない
    username: Option<Username>,
    phase: SessionPhase,
    pub connected_at: Timestamp,
}

impl Session {
    /// 新しい Session を作成（接続直後は AwaitingUsername）
    pub fn new(id: SessionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            username: None,
            phase: SessionPhase::AwaitingUsername,
            connected_at,
        }
    }

    pub fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// READY を受け取り、手番の対象になっているか
    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// 表示名を割り当てて AwaitingReady に進める
    ///
    /// 呼び出し側（SessionRegistry）が段階と一意性を検証済みであること。
    pub(super) fn assign_username(&mut self, username: Username) {
        self.username = Some(username);
        self.phase = SessionPhase::AwaitingReady;
    }

    /// Active に進める
    pub(super) fn mark_ready(&mut self) {
        self.phase = SessionPhase::Active;
    }
}
