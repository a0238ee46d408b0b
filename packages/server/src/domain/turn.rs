//! Turn Coordinator
//!
//! 手番の保持者を位置ではなく `SessionId` で保持します。
//! 保持者の妥当性（登録済みかつ READY 済み）は参照のたびにレジストリと照合するため、
//! セッションの削除で位置がずれても別のセッションを指すことはありません。

use turnboard_shared::protocol::Roster;

use super::{registry::SessionRegistry, value_object::SessionId};

#[derive(Debug, Default)]
pub struct TurnCoordinator {
    holder: Option<SessionId>,
}

impl TurnCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在の手番保持者
    ///
    /// 記録されているセッションが削除済み、または READY でなければ `None`。
    pub fn holder(&self, registry: &SessionRegistry) -> Option<SessionId> {
        self.holder
            .filter(|id| registry.get(id).is_some_and(|s| s.is_ready()))
    }

    pub fn is_holder(&self, registry: &SessionRegistry, session_id: &SessionId) -> bool {
        self.holder(registry).as_ref() == Some(session_id)
    }

    /// 手番保持者の参加順での位置
    pub fn current_position(&self, registry: &SessionRegistry) -> Option<usize> {
        self.holder(registry)
            .and_then(|id| registry.position(&id))
    }

    /// 次に手番を受け取るセッションの位置
    ///
    /// 現在の保持者の 1 つ後ろから走査するため、READY 済みが保持者だけなら保持者自身になる。
    pub fn next_position(&self, registry: &SessionRegistry) -> Option<usize> {
        let start = self.current_position(registry).map_or(0, |p| p + 1);
        Self::first_ready_from(registry, start)
    }

    /// 手番を次の READY 済みセッションに進める
    pub fn advance(&mut self, registry: &SessionRegistry) -> Option<SessionId> {
        let start = self.current_position(registry).map_or(0, |p| p + 1);
        self.advance_from(registry, start)
    }

    /// `start` の位置から走査して手番を割り当てる
    ///
    /// 保持者が削除された直後は、削除前の位置を渡すと論理的な後続に手番が移る。
    pub fn advance_from(&mut self, registry: &SessionRegistry, start: usize) -> Option<SessionId> {
        self.holder = Self::first_ready_from(registry, start)
            .and_then(|position| registry.get_at(position))
            .map(|s| s.id);
        self.holder
    }

    pub fn clear(&mut self) {
        self.holder = None;
    }

    /// 参加順の表示名と手番インジケーター
    pub fn roster(&self, registry: &SessionRegistry) -> Roster {
        Roster {
            names: registry.snapshot_ordered_usernames(),
            current: self.current_position(registry),
            next: self.next_position(registry),
        }
    }

    fn first_ready_from(registry: &SessionRegistry, start: usize) -> Option<usize> {
        let len = registry.len();
        (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&position| registry.get_at(position).is_some_and(|s| s.is_ready()))
    }
}
