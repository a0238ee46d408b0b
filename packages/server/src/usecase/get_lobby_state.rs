//! UseCase: Lobby の状態取得（管理 API 用）

use crate::domain::{LobbyState, SharedLobby};

pub struct GetLobbyStateUseCase {
    lobby: SharedLobby,
}

impl GetLobbyStateUseCase {
    pub fn new(lobby: SharedLobby) -> Self {
        Self { lobby }
    }

    pub async fn execute(&self) -> LobbyState {
        self.lobby.lock().await.state()
    }
}
