//! Domain logic for client-side operations.
//!
//! Pure functions deciding what to do after a session ends, kept free of I/O
//! so they can be tested directly.

use crate::error::ClientError;

/// Check if the client should exit immediately based on the error type.
///
/// Rejections by the server (`NAMEINUSE`, `FULL`) will not change by
/// reconnecting, so they end the client right away.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::NameInUse(_) | ClientError::ServerFull)
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_exit_immediately_with_name_in_use() {
        // テスト項目: NameInUse エラーの場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = ClientError::NameInUse("alice".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_exit_immediately_with_server_full() {
        // テスト項目: ServerFull エラーの場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = ClientError::ServerFull;

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_exit_immediately_with_connection_error() {
        // テスト項目: ConnectionError の場合、即座に終了すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_with_server_full() {
        // テスト項目: ServerFull エラーの場合、回数に余裕があっても再接続しない
        // given (前提条件):
        let error = ClientError::ServerFull;

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 4, 5);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, 5);

        // then (期待する結果):
        assert!(!result);
    }
}
