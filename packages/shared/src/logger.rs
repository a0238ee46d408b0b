//! Logging setup shared by the Turnboard binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Log output from the `turnboard_*` crates (including the binary) and the
/// HTTP trace layer is enabled at `default_log_level`. The filter can be overridden with the
/// `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "turnboard-server")
/// * `default_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use turnboard_shared::logger::setup_logger;
///
/// setup_logger("turnboard-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    [
        "turnboard_shared",
        "turnboard_server",
        "turnboard_client",
        "tower_http",
        &binary_name.replace('-', "_"),
    ]
    .iter()
    .map(|target| format!("{}={}", target, default_log_level))
    .collect::<Vec<_>>()
    .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_all_crates_and_binary() {
        // テスト項目: デフォルトのフィルタが全クレートとバイナリを対象にする
        // given (前提条件):
        let binary_name = "turnboard-server";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert_eq!(
            filter,
            "turnboard_shared=debug,turnboard_server=debug,turnboard_client=debug,tower_http=debug,turnboard_server=debug"
        );
    }
}
