//! 複数のユースケースで共通の通知処理
//!
//! どの関数も Lobby のロックを保持したまま呼び出す。
//! 送信はチャンネルへの投入だけなので、ロック区間の順序がそのまま各セッションへの到着順になる。

use turnboard_shared::ServerMessage;

use super::error::TurnError;
use crate::domain::{Lobby, LobbyError, MessagePusher, SessionId};

/// 手番保持者以外からの操作に返す案内
pub const NOT_YOUR_TURN: &str = "Not your turn!";

/// 1 セッションへ送信（失敗はそのセッションの切断処理に任せてログのみ）
pub(crate) async fn push_line(
    pusher: &dyn MessagePusher,
    session_id: &SessionId,
    message: &ServerMessage,
) {
    if let Err(e) = pusher.push_to(session_id, &message.to_string()).await {
        tracing::warn!("Failed to push to session {}: {}", session_id, e);
    }
}

/// 登録中の全セッションへ送信
pub(crate) async fn broadcast_all(
    lobby: &Lobby,
    pusher: &dyn MessagePusher,
    message: &ServerMessage,
) {
    broadcast_to(pusher, lobby.session_ids(), message).await;
}

pub(crate) async fn broadcast_to(
    pusher: &dyn MessagePusher,
    targets: Vec<SessionId>,
    message: &ServerMessage,
) {
    if let Err(e) = pusher.broadcast(targets, &message.to_string()).await {
        tracing::warn!("Failed to broadcast: {}", e);
    }
}

/// USERLIST を全セッションへ送信
pub(crate) async fn broadcast_roster(lobby: &Lobby, pusher: &dyn MessagePusher) {
    let roster = lobby.roster();
    tracing::debug!("Roster: {}", roster);
    broadcast_all(lobby, pusher, &ServerMessage::UserList(roster)).await;
}

/// 手番の割り当てを通知
///
/// 保持者に TURN、全員に案内と USERLIST を送る。
pub(crate) async fn announce_turn(
    lobby: &Lobby,
    pusher: &dyn MessagePusher,
    holder: &SessionId,
) {
    let name = lobby
        .username_of(holder)
        .map(|u| u.as_str().to_string())
        .unwrap_or_default();
    tracing::info!("Turn passed to '{}'", name);

    push_line(pusher, holder, &ServerMessage::Turn).await;
    broadcast_all(lobby, pusher, &ServerMessage::log(format!("It's {}'s turn!", name))).await;
    broadcast_roster(lobby, pusher).await;
}

/// 手番が変わった場合は通知し、変わらなかった場合は USERLIST だけ送る
pub(crate) async fn announce_turn_or_roster(
    lobby: &Lobby,
    pusher: &dyn MessagePusher,
    new_holder: Option<SessionId>,
) {
    match new_holder {
        Some(holder) => announce_turn(lobby, pusher, &holder).await,
        None => broadcast_roster(lobby, pusher).await,
    }
}

/// 手番が必要な操作の拒否
///
/// 手番保持者でない場合だけ本人に案内を返す。ハンドシェイク中のコマンドは黙って捨てる。
pub(crate) async fn reject_turn_command(
    pusher: &dyn MessagePusher,
    session_id: &SessionId,
    error: LobbyError,
) -> TurnError {
    let error = TurnError::from(error);
    if error == TurnError::NotTurnHolder {
        push_line(pusher, session_id, &ServerMessage::log(NOT_YOUR_TURN)).await;
    }
    error
}
