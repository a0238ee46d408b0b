//! 管理 API のレスポンス DTO

use serde::{Deserialize, Serialize};
use turnboard_shared::time::timestamp_to_rfc3339;

use crate::domain::{LobbyState, SessionSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

impl HealthDto {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDto {
    pub position: usize,
    pub username: Option<String>,
    pub ready: bool,
    /// RFC 3339（UTC）
    pub connected_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasDto {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyDto {
    pub sessions: Vec<SessionDto>,
    pub current_turn: Option<usize>,
    pub next_turn: Option<usize>,
    pub capacity: usize,
    pub history_len: usize,
    pub canvas: CanvasDto,
}

impl From<SessionSummary> for SessionDto {
    fn from(summary: SessionSummary) -> Self {
        Self {
            position: summary.position,
            username: summary.username,
            ready: summary.ready,
            connected_at: timestamp_to_rfc3339(summary.connected_at.value()),
        }
    }
}

impl From<LobbyState> for LobbyDto {
    fn from(state: LobbyState) -> Self {
        Self {
            sessions: state.sessions.into_iter().map(SessionDto::from).collect(),
            current_turn: state.current_turn,
            next_turn: state.next_turn,
            capacity: state.capacity,
            history_len: state.history_len,
            canvas: CanvasDto {
                width: state.canvas_width,
                height: state.canvas_height,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    #[test]
    fn test_lobby_dto_serializes_absent_turn_as_null() {
        // テスト項目: 手番がない場合は null、接続時刻は RFC 3339 でシリアライズされる
        // given (前提条件):
        let state = LobbyState {
            sessions: vec![SessionSummary {
                position: 0,
                username: None,
                ready: false,
                connected_at: Timestamp::new(0),
            }],
            current_turn: None,
            next_turn: None,
            capacity: 4,
            history_len: 0,
            canvas_width: 1920,
            canvas_height: 1080,
        };

        // when (操作):
        let json = serde_json::to_value(LobbyDto::from(state)).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({
                "sessions": [{
                    "position": 0,
                    "username": null,
                    "ready": false,
                    "connected_at": "1970-01-01T00:00:00+00:00"
                }],
                "current_turn": null,
                "next_turn": null,
                "capacity": 4,
                "history_len": 0,
                "canvas": {"width": 1920, "height": 1080}
            })
        );
    }
}
