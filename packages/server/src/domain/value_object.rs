//! Value Object 定義
//!
//! 不変で、値によって同一性が決まるドメインの型を定義します。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// 接続中のセッションを識別する ID
///
/// レジストリ内の位置（インデックス）とは独立した安定な識別子です。
/// 他のセッションが切断されて位置がずれても、同じセッションを指し続けます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(Uuid);

impl SessionId {
    /// 新しい SessionId を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 先頭 8 文字でログには十分
        let full = self.0.simple().to_string();
        f.write_str(&full[..8])
    }
}

/// 表示名
///
/// ## 制約
///
/// - 前後の空白を除いて空でないこと
/// - `,` と `|` を含まないこと（USERLIST の区切り文字と衝突するため）
/// - 制御文字を含まないこと
///
/// 一意性は大文字小文字を区別せずに判定します（[`Username::key`]）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// 新しい Username を作成
    pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        if value
            .chars()
            .any(|c| c == ',' || c == '|' || c.is_control())
        {
            return Err(ValueObjectError::UsernameInvalidCharacter(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// 一意性判定に使うキー（小文字化した名前）
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_is_trimmed() {
        // テスト項目: 表示名の前後の空白は取り除かれる
        // given (前提条件):
        let raw = "  alice ";

        // when (操作):
        let username = Username::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(username.as_str(), "alice");
    }

    #[test]
    fn test_username_rejects_empty() {
        // テスト項目: 空の表示名は拒否される
        // given (前提条件) / when (操作):
        let empty = Username::new("");
        let blank = Username::new("   ");

        // then (期待する結果):
        assert_eq!(empty, Err(ValueObjectError::UsernameEmpty));
        assert_eq!(blank, Err(ValueObjectError::UsernameEmpty));
    }

    #[test]
    fn test_username_rejects_roster_separators() {
        // テスト項目: USERLIST の区切り文字を含む表示名は拒否される
        // given (前提条件):
        let inputs = ["a,b", "a|b", "tab\there"];

        // when (操作) / then (期待する結果):
        for input in inputs {
            assert!(matches!(
                Username::new(input),
                Err(ValueObjectError::UsernameInvalidCharacter(_))
            ));
        }
    }

    #[test]
    fn test_username_key_is_case_insensitive() {
        // テスト項目: 大文字小文字だけが異なる表示名は同じキーを持つ
        // given (前提条件):
        let lower = Username::new("bob").unwrap();
        let upper = Username::new("Bob").unwrap();

        // when (操作) / then (期待する結果):
        assert_ne!(lower, upper);
        assert_eq!(lower.key(), upper.key());
    }

    #[test]
    fn test_session_ids_are_unique() {
        // テスト項目: 生成した SessionId は互いに異なる
        // given (前提条件) / when (操作):
        let a = SessionId::generate();
        let b = SessionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 8);
    }
}
