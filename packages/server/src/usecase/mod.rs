//! UseCase 層
//!
//! プロトコルの操作 1 つにつき 1 つのユースケースを置きます。
//! どのユースケースも Lobby のロックを取り、状態の変更と通知を同じロック区間で行います。

mod announce;
pub mod clear_canvas;
pub mod connect_session;
pub mod disconnect_session;
pub mod end_turn;
pub mod error;
pub mod get_lobby_state;
pub mod join_session;
pub mod load_image;
pub mod ready_session;
pub mod send_chat;
pub mod submit_draw;

#[cfg(test)]
mod test_support;

pub use announce::NOT_YOUR_TURN;
pub use clear_canvas::ClearCanvasUseCase;
pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use end_turn::EndTurnUseCase;
pub use error::{
    ChatError, ClearError, ConnectError, DrawError, JoinError, LoadImageError, ReadyError,
    TurnError,
};
pub use get_lobby_state::GetLobbyStateUseCase;
pub use join_session::JoinSessionUseCase;
pub use load_image::LoadImageUseCase;
pub use ready_session::ReadySessionUseCase;
pub use send_chat::SendChatUseCase;
pub use submit_draw::SubmitDrawUseCase;
