//! 依存関係の組み立て
//!
//! 1. Lobby（レジストリ・手番・キャンバス）
//! 2. MessagePusher / SnapshotCodec / Clock
//! 3. UseCases
//! 4. AppState と Server

use std::sync::Arc;

use turnboard_shared::time::SystemClock;

use crate::{
    config::ServerConfig,
    domain::{Canvas, Lobby},
    error::ServerError,
    infrastructure::{codec::PngBase64Codec, message_pusher::ChannelMessagePusher},
    ui::{Server, state::AppState},
    usecase::{
        ClearCanvasUseCase, ConnectSessionUseCase, DisconnectSessionUseCase, EndTurnUseCase,
        GetLobbyStateUseCase, JoinSessionUseCase, LoadImageUseCase, ReadySessionUseCase,
        SendChatUseCase, SubmitDrawUseCase,
    },
};

/// 設定から Server を組み立てる
pub fn build_server(config: &ServerConfig) -> Result<Server, ServerError> {
    // 1. Lobby
    let canvas = Canvas::new(config.canvas_width, config.canvas_height)?;
    let lobby = Lobby::new(config.max_clients, canvas).into_shared();
    tracing::info!(
        "Lobby created: {} seats, {}x{} canvas",
        config.max_clients,
        config.canvas_width,
        config.canvas_height
    );

    // 2. Infrastructure
    let message_pusher = Arc::new(ChannelMessagePusher::new());
    let codec = Arc::new(PngBase64Codec::new());
    let clock = Arc::new(SystemClock);

    // 3. UseCases / 4. AppState
    let state = AppState {
        connect_session_usecase: Arc::new(ConnectSessionUseCase::new(
            lobby.clone(),
            message_pusher.clone(),
            clock,
        )),
        join_session_usecase: Arc::new(JoinSessionUseCase::new(
            lobby.clone(),
            message_pusher.clone(),
        )),
        ready_session_usecase: Arc::new(ReadySessionUseCase::new(
            lobby.clone(),
            message_pusher.clone(),
            codec.clone(),
        )),
        end_turn_usecase: Arc::new(EndTurnUseCase::new(lobby.clone(), message_pusher.clone())),
        submit_draw_usecase: Arc::new(SubmitDrawUseCase::new(
            lobby.clone(),
            message_pusher.clone(),
        )),
        clear_canvas_usecase: Arc::new(ClearCanvasUseCase::new(
            lobby.clone(),
            message_pusher.clone(),
            codec.clone(),
        )),
        load_image_usecase: Arc::new(LoadImageUseCase::new(
            lobby.clone(),
            message_pusher.clone(),
            codec,
        )),
        send_chat_usecase: Arc::new(SendChatUseCase::new(lobby.clone(), message_pusher.clone())),
        disconnect_session_usecase: Arc::new(DisconnectSessionUseCase::new(
            lobby.clone(),
            message_pusher,
        )),
        get_lobby_state_usecase: Arc::new(GetLobbyStateUseCase::new(lobby)),
    };

    Ok(Server::new(state))
}
