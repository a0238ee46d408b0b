//! 接続ハンドラーと管理 API が共有する状態

use std::sync::Arc;

use crate::usecase::{
    ClearCanvasUseCase, ConnectSessionUseCase, DisconnectSessionUseCase, EndTurnUseCase,
    GetLobbyStateUseCase, JoinSessionUseCase, LoadImageUseCase, ReadySessionUseCase,
    SendChatUseCase, SubmitDrawUseCase,
};

/// Shared application state
pub struct AppState {
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    pub join_session_usecase: Arc<JoinSessionUseCase>,
    pub ready_session_usecase: Arc<ReadySessionUseCase>,
    pub end_turn_usecase: Arc<EndTurnUseCase>,
    pub submit_draw_usecase: Arc<SubmitDrawUseCase>,
    pub clear_canvas_usecase: Arc<ClearCanvasUseCase>,
    pub load_image_usecase: Arc<LoadImageUseCase>,
    pub send_chat_usecase: Arc<SendChatUseCase>,
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    pub get_lobby_state_usecase: Arc<GetLobbyStateUseCase>,
}
