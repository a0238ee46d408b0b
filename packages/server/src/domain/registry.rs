//! Session Registry
//!
//! 接続中のセッションを参加順に保持し、定員と表示名の一意性を保証します。
//!
//! ## 不変条件
//!
//! - 同じ表示名（大文字小文字を区別しない）を持つセッションは 2 つ存在しない
//! - `claimed` のキーと名前付きセッションは 1 対 1 に対応する
//! - セッション数は `capacity` を超えない

use std::collections::HashMap;

use turnboard_shared::protocol::PENDING_USERNAME;

use super::{
    entity::{Session, SessionPhase},
    error::RegistryError,
    value_object::{SessionId, Username},
};

#[derive(Debug)]
pub struct SessionRegistry {
    /// 参加順に並んだセッション
    sessions: Vec<Session>,
    /// 小文字化した表示名 → セッション ID
    claimed: HashMap<String, SessionId>,
    capacity: usize,
}

impl SessionRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: Vec::with_capacity(capacity),
            claimed: HashMap::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.sessions.len() >= self.capacity
    }

    /// セッションを末尾に登録
    pub fn admit(&mut self, session: Session) -> Result<(), RegistryError> {
        if self.is_full() {
            return Err(RegistryError::Full {
                capacity: self.capacity,
            });
        }
        self.sessions.push(session);
        Ok(())
    }

    /// セッションを削除し、表示名を解放する
    ///
    /// 削除されたセッションと、削除前の位置を返します。
    pub fn remove(&mut self, session_id: &SessionId) -> Option<(usize, Session)> {
        let position = self.position(session_id)?;
        let session = self.sessions.remove(position);
        if let Some(username) = session.username() {
            self.release(username);
        }
        Some((position, session))
    }

    pub fn is_username_taken(&self, name: &str) -> bool {
        self.claimed.contains_key(&name.to_lowercase())
    }

    /// 表示名を確保し、セッションを AwaitingReady に進める
    pub fn claim(
        &mut self,
        session_id: &SessionId,
        username: Username,
    ) -> Result<(), RegistryError> {
        let position = self
            .position(session_id)
            .ok_or(RegistryError::SessionNotFound(*session_id))?;
        if self.sessions[position].username().is_some() {
            return Err(RegistryError::AlreadyNamed(*session_id));
        }
        let key = username.key();
        if self.claimed.contains_key(&key) {
            return Err(RegistryError::UsernameTaken(username.into_string()));
        }
        self.claimed.insert(key, *session_id);
        self.sessions[position].assign_username(username);
        Ok(())
    }

    pub(crate) fn release(&mut self, username: &Username) {
        self.claimed.remove(&username.key());
    }

    /// セッションを Active（READY 済み）にする
    pub fn mark_ready(&mut self, session_id: &SessionId) -> Result<(), RegistryError> {
        let session = self
            .get_mut(session_id)
            .ok_or(RegistryError::SessionNotFound(*session_id))?;
        session.mark_ready();
        Ok(())
    }

    pub fn get(&self, session_id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| &s.id == session_id)
    }

    fn get_mut(&mut self, session_id: &SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| &s.id == session_id)
    }

    pub fn get_at(&self, position: usize) -> Option<&Session> {
        self.sessions.get(position)
    }

    pub fn phase_of(&self, session_id: &SessionId) -> Option<SessionPhase> {
        self.get(session_id).map(Session::phase)
    }

    /// 参加順での位置
    pub fn position(&self, session_id: &SessionId) -> Option<usize> {
        self.sessions.iter().position(|s| &s.id == session_id)
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// ブロードキャスト用に、現時点の全セッション ID を取得
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|s| s.id).collect()
    }

    /// 参加順の表示名一覧（未確定のセッションは `joining...`）
    pub fn snapshot_ordered_usernames(&self) -> Vec<String> {
        self.sessions
            .iter()
            .map(|s| {
                s.username()
                    .map_or_else(|| PENDING_USERNAME.to_string(), |u| u.as_str().to_string())
            })
            .collect()
    }
}
