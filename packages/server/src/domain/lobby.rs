//! Lobby 集約
//!
//! セッションレジストリ・手番・キャンバスを 1 つにまとめ、1 つのロックの下で操作します。
//! 手番の検証と状態の変更は同じロック区間で行われるため、検証後に保持者が入れ替わることはありません。
//!
//! ## 段階ごとの受付
//!
//! | 操作 | 必要な段階 | 追加条件 |
//! |---|---|---|
//! | `join` | AwaitingUsername | 表示名が未使用 |
//! | `ready` | AwaitingReady | - |
//! | `end_turn` / `draw` / `clear` / `load_image` | Active | 手番保持者 |
//! | `ensure_active`（チャット） | Active | - |

use std::sync::Arc;

use tiny_skia::Pixmap;
use tokio::sync::Mutex;
use turnboard_shared::{draw_command::DrawCommand, protocol::Roster};

use super::{
    canvas::Canvas,
    entity::{Session, SessionPhase},
    error::{LobbyError, RegistryError},
    registry::SessionRegistry,
    turn::TurnCoordinator,
    value_object::{SessionId, Timestamp, Username},
};

/// サーバー全体で共有する Lobby
pub type SharedLobby = Arc<Mutex<Lobby>>;

/// セッション削除の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub session: Session,
    /// 削除前の参加順での位置
    pub position: usize,
    /// 削除したセッションが手番を持っていたか
    pub held_turn: bool,
    /// 手番を引き継いだセッション
    pub new_holder: Option<SessionId>,
}

/// 管理 API 向けの Lobby の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyState {
    pub sessions: Vec<SessionSummary>,
    pub current_turn: Option<usize>,
    pub next_turn: Option<usize>,
    pub capacity: usize,
    pub history_len: usize,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub position: usize,
    pub username: Option<String>,
    pub ready: bool,
    pub connected_at: Timestamp,
}

#[derive(Debug)]
pub struct Lobby {
    registry: SessionRegistry,
    turn: TurnCoordinator,
    canvas: Canvas,
}

impl Lobby {
    pub fn new(capacity: usize, canvas: Canvas) -> Self {
        Self {
            registry: SessionRegistry::new(capacity),
            turn: TurnCoordinator::new(),
            canvas,
        }
    }

    pub fn into_shared(self) -> SharedLobby {
        Arc::new(Mutex::new(self))
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn is_full(&self) -> bool {
        self.registry.is_full()
    }

    pub fn holder(&self) -> Option<SessionId> {
        self.turn.holder(&self.registry)
    }

    pub fn roster(&self) -> Roster {
        self.turn.roster(&self.registry)
    }

    pub fn username_of(&self, session_id: &SessionId) -> Option<&Username> {
        self.registry.get(session_id).and_then(Session::username)
    }

    /// 全セッション（ハンドシェイク中を含む）
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.registry.session_ids()
    }

    /// READY 済みのセッションのうち `exclude` 以外
    pub fn active_session_ids_except(&self, exclude: &SessionId) -> Vec<SessionId> {
        self.registry
            .sessions()
            .iter()
            .filter(|s| s.is_ready() && &s.id != exclude)
            .map(|s| s.id)
            .collect()
    }

    /// 新しい接続を登録
    pub fn admit(&mut self, session: Session) -> Result<(), LobbyError> {
        self.registry.admit(session)?;
        Ok(())
    }

    /// 表示名を確保する
    pub fn join(&mut self, session_id: &SessionId, name: &str) -> Result<Username, LobbyError> {
        self.expect_phase(session_id, SessionPhase::AwaitingUsername)?;
        let username = Username::new(name)?;
        self.registry.claim(session_id, username.clone())?;
        Ok(username)
    }

    /// READY を受け付ける
    ///
    /// 手番保持者がいなければこのセッションに手番を割り当て、そのセッション ID を返す。
    pub fn ready(&mut self, session_id: &SessionId) -> Result<Option<SessionId>, LobbyError> {
        self.expect_phase(session_id, SessionPhase::AwaitingReady)?;
        self.registry.mark_ready(session_id)?;
        if self.turn.holder(&self.registry).is_some() {
            return Ok(None);
        }
        Ok(self.turn.advance(&self.registry))
    }

    /// 手番を終えて次のセッションに渡す
    pub fn end_turn(&mut self, session_id: &SessionId) -> Result<Option<SessionId>, LobbyError> {
        self.expect_holder(session_id)?;
        Ok(self.turn.advance(&self.registry))
    }

    pub fn draw(&mut self, session_id: &SessionId, command: DrawCommand) -> Result<(), LobbyError> {
        self.expect_holder(session_id)?;
        self.canvas.apply_draw(command);
        Ok(())
    }

    pub fn clear(&mut self, session_id: &SessionId) -> Result<(), LobbyError> {
        self.expect_holder(session_id)?;
        self.canvas.clear();
        Ok(())
    }

    pub fn load_image(&mut self, session_id: &SessionId, image: &Pixmap) -> Result<(), LobbyError> {
        self.expect_holder(session_id)?;
        self.canvas.composite(image);
        Ok(())
    }

    /// 手番を問わず Active であることを確認し、表示名を返す
    pub fn ensure_active(&self, session_id: &SessionId) -> Result<&Username, LobbyError> {
        self.expect_phase(session_id, SessionPhase::Active)?;
        self.username_of(session_id)
            .ok_or(LobbyError::MissingUsername(*session_id))
    }

    /// 手番保持者を検証する（Active でなければ UnexpectedPhase）
    pub fn expect_holder(&self, session_id: &SessionId) -> Result<(), LobbyError> {
        self.expect_phase(session_id, SessionPhase::Active)?;
        if !self.turn.is_holder(&self.registry, session_id) {
            return Err(LobbyError::NotTurnHolder(*session_id));
        }
        Ok(())
    }

    /// セッションを削除し、手番を持っていた場合は後続に渡す
    pub fn remove(&mut self, session_id: &SessionId) -> Option<Departure> {
        let held_turn = self.turn.is_holder(&self.registry, session_id);
        let (position, session) = self.registry.remove(session_id)?;
        let new_holder = if held_turn {
            self.turn.advance_from(&self.registry, position)
        } else {
            None
        };
        Some(Departure {
            session,
            position,
            held_turn,
            new_holder,
        })
    }

    pub fn state(&self) -> LobbyState {
        let roster = self.roster();
        LobbyState {
            sessions: self
                .registry
                .sessions()
                .iter()
                .enumerate()
                .map(|(position, s)| SessionSummary {
                    position,
                    username: s.username().map(|u| u.as_str().to_string()),
                    ready: s.is_ready(),
                    connected_at: s.connected_at,
                })
                .collect(),
            current_turn: roster.current,
            next_turn: roster.next,
            capacity: self.registry.capacity(),
            history_len: self.canvas.history().len(),
            canvas_width: self.canvas.width(),
            canvas_height: self.canvas.height(),
        }
    }

    fn expect_phase(
        &self,
        session_id: &SessionId,
        expected: SessionPhase,
    ) -> Result<(), LobbyError> {
        let actual = self
            .registry
            .phase_of(session_id)
            .ok_or(RegistryError::SessionNotFound(*session_id))?;
        if actual != expected {
            return Err(LobbyError::UnexpectedPhase {
                session_id: *session_id,
                expected,
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnboard_shared::draw_command::{Colour, Shape};

    fn new_lobby() -> Lobby {
        Lobby::new(4, Canvas::new(100, 100).unwrap())
    }

    fn connect(lobby: &mut Lobby) -> SessionId {
        let session = Session::new(SessionId::generate(), Timestamp::new(1000));
        let id = session.id;
        lobby.admit(session).unwrap();
        id
    }

    fn connect_ready(lobby: &mut Lobby, name: &str) -> SessionId {
        let id = connect(lobby);
        lobby.join(&id, name).unwrap();
        lobby.ready(&id).unwrap();
        id
    }

    fn line() -> DrawCommand {
        DrawCommand::new(Shape::Line, (10, 10), (90, 90), Colour::BLACK, 3, false)
    }

    #[test]
    fn test_first_ready_session_receives_turn() {
        // テスト項目: 最初に READY したセッションに手番が割り当てられ、後続には割り当てられない
        // given (前提条件):
        let mut lobby = new_lobby();
        let alice = connect(&mut lobby);
        let bob = connect(&mut lobby);
        lobby.join(&alice, "alice").unwrap();
        lobby.join(&bob, "bob").unwrap();

        // when (操作):
        let first = lobby.ready(&alice).unwrap();
        let second = lobby.ready(&bob).unwrap();

        // then (期待する結果):
        assert_eq!(first, Some(alice));
        assert_eq!(second, None);
        assert_eq!(lobby.holder(), Some(alice));
    }

    #[test]
    fn test_join_rejects_taken_and_empty_names() {
        // テスト項目: 使用中または空の表示名では参加できず、段階は変わらない
        // given (前提条件):
        let mut lobby = new_lobby();
        connect_ready(&mut lobby, "alice");
        let bob = connect(&mut lobby);

        // when (操作):
        let taken = lobby.join(&bob, "ALICE");
        let empty = lobby.join(&bob, "   ");

        // then (期待する結果):
        assert_eq!(
            taken,
            Err(LobbyError::Registry(RegistryError::UsernameTaken(
                "ALICE".to_string()
            )))
        );
        assert!(matches!(empty, Err(LobbyError::InvalidUsername(_))));
        assert_eq!(
            lobby.registry().phase_of(&bob),
            Some(SessionPhase::AwaitingUsername)
        );
    }

    #[test]
    fn test_ensure_active_reports_missing_username() {
        // テスト項目: 表示名のないまま Active になったセッションは MissingUsername になる
        // given (前提条件):
        let mut lobby = new_lobby();
        let unnamed = connect(&mut lobby);
        lobby.registry.mark_ready(&unnamed).unwrap();
        let alice = connect_ready(&mut lobby, "alice");

        // when (操作):
        let unnamed_result = lobby.ensure_active(&unnamed);
        let alice_result = lobby.ensure_active(&alice).map(Username::as_str);

        // then (期待する結果):
        assert_eq!(unnamed_result, Err(LobbyError::MissingUsername(unnamed)));
        assert_eq!(alice_result, Ok("alice"));
    }

    #[test]
    fn test_commands_out_of_phase_are_rejected() {
        // テスト項目: 期待する段階でないコマンドは UnexpectedPhase になる
        // given (前提条件):
        let mut lobby = new_lobby();
        let alice = connect_ready(&mut lobby, "alice");
        let pending = connect(&mut lobby);

        // when (操作):
        let rejoin = lobby.join(&alice, "alicia");
        let early_ready = lobby.ready(&pending);
        let early_draw = lobby.draw(&pending, line());

        // then (期待する結果):
        assert!(matches!(rejoin, Err(LobbyError::UnexpectedPhase { .. })));
        assert!(matches!(early_ready, Err(LobbyError::UnexpectedPhase { .. })));
        assert!(matches!(early_draw, Err(LobbyError::UnexpectedPhase { .. })));
        assert!(lobby.canvas().history().is_empty());
    }

    #[test]
    fn test_non_holder_cannot_mutate_canvas() {
        // テスト項目: 手番保持者以外の描画・消去・手番終了は拒否され、キャンバスは変わらない
        // given (前提条件):
        let mut lobby = new_lobby();
        let alice = connect_ready(&mut lobby, "alice");
        let bob = connect_ready(&mut lobby, "bob");
        lobby.draw(&alice, line()).unwrap();

        // when (操作):
        let draw = lobby.draw(&bob, line());
        let clear = lobby.clear(&bob);
        let end_turn = lobby.end_turn(&bob);

        // then (期待する結果):
        assert_eq!(draw, Err(LobbyError::NotTurnHolder(bob)));
        assert_eq!(clear, Err(LobbyError::NotTurnHolder(bob)));
        assert_eq!(end_turn, Err(LobbyError::NotTurnHolder(bob)));
        assert_eq!(lobby.canvas().history().len(), 1);
        assert_eq!(lobby.holder(), Some(alice));
    }

    #[test]
    fn test_end_turn_passes_turn_in_join_order() {
        // テスト項目: 手番終了で参加順の次のセッションに手番が移る
        // given (前提条件):
        let mut lobby = new_lobby();
        let alice = connect_ready(&mut lobby, "alice");
        let bob = connect_ready(&mut lobby, "bob");

        // when (操作):
        let next = lobby.end_turn(&alice).unwrap();

        // then (期待する結果):
        assert_eq!(next, Some(bob));
        let roster = lobby.roster();
        assert_eq!(roster.current, Some(1));
        assert_eq!(roster.next, Some(0));
    }

    #[test]
    fn test_removing_holder_hands_turn_to_successor() {
        // テスト項目: 手番保持者を削除すると後続に手番が移り、表示名が解放される
        // given (前提条件):
        let mut lobby = new_lobby();
        let alice = connect_ready(&mut lobby, "alice");
        let bob = connect_ready(&mut lobby, "bob");
        connect_ready(&mut lobby, "carol");

        // when (操作):
        let departure = lobby.remove(&alice).unwrap();

        // then (期待する結果):
        assert!(departure.held_turn);
        assert_eq!(departure.position, 0);
        assert_eq!(departure.new_holder, Some(bob));
        assert_eq!(lobby.holder(), Some(bob));
        assert!(!lobby.registry().is_username_taken("alice"));
    }

    #[test]
    fn test_removing_last_ready_session_leaves_no_holder() {
        // テスト項目: 最後の READY 済みセッションが抜けると保持者はいなくなる
        // given (前提条件):
        let mut lobby = new_lobby();
        let alice = connect_ready(&mut lobby, "alice");
        let pending = connect(&mut lobby);

        // when (操作):
        let departure = lobby.remove(&alice).unwrap();

        // then (期待する結果):
        assert!(departure.held_turn);
        assert_eq!(departure.new_holder, None);
        assert_eq!(lobby.holder(), None);
        assert_eq!(lobby.session_ids(), vec![pending]);
    }

    #[test]
    fn test_removing_pending_session() {
        // テスト項目: ハンドシェイク途中のセッションも削除でき、手番には影響しない
        // given (前提条件):
        let mut lobby = new_lobby();
        let alice = connect_ready(&mut lobby, "alice");
        let pending = connect(&mut lobby);

        // when (操作):
        let departure = lobby.remove(&pending).unwrap();

        // then (期待する結果):
        assert!(!departure.held_turn);
        assert_eq!(lobby.holder(), Some(alice));
        assert_eq!(lobby.registry().len(), 1);
    }

    #[test]
    fn test_active_session_ids_except_skips_sender_and_pending() {
        // テスト項目: 描画の中継先は送信者とハンドシェイク中のセッションを含まない
        // given (前提条件):
        let mut lobby = new_lobby();
        let alice = connect_ready(&mut lobby, "alice");
        let bob = connect_ready(&mut lobby, "bob");
        connect(&mut lobby);

        // when (操作):
        let targets = lobby.active_session_ids_except(&alice);

        // then (期待する結果):
        assert_eq!(targets, vec![bob]);
    }

    #[test]
    fn test_state_reports_sessions_and_turn() {
        // テスト項目: 管理用の状態に参加順・手番・キャンバス情報が含まれる
        // given (前提条件):
        let mut lobby = new_lobby();
        let alice = connect_ready(&mut lobby, "alice");
        connect(&mut lobby);
        lobby.draw(&alice, line()).unwrap();

        // when (操作):
        let state = lobby.state();

        // then (期待する結果):
        assert_eq!(state.sessions.len(), 2);
        assert_eq!(state.sessions[0].username.as_deref(), Some("alice"));
        assert!(state.sessions[0].ready);
        assert_eq!(state.sessions[1].username, None);
        assert_eq!(state.current_turn, Some(0));
        assert_eq!(state.next_turn, Some(0));
        assert_eq!(state.capacity, 4);
        assert_eq!(state.history_len, 1);
        assert_eq!((state.canvas_width, state.canvas_height), (100, 100));
    }
}
