//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use super::{
    handler::{get_lobby, handle_connection, health_check},
    signal::shutdown_signal,
    state::AppState,
};
use crate::{config::ServerConfig, error::ServerError};

/// Turnboard server
///
/// ゲーム用の TCP リスナー（Acceptor）と、任意で管理 API の HTTP リスナーを動かします。
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::default().validate()?;
/// let server = build_server(&config)?;
/// server.run(&config).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// 設定されたアドレスで待ち受け、Ctrl+C まで動かす
    ///
    /// # Errors
    ///
    /// リスナーを bind できない場合はエラーを返します（起動時の致命的なエラー）。
    pub async fn run(self, config: &ServerConfig) -> Result<(), ServerError> {
        let listener = bind(&config.game_addr()).await?;
        let admin_listener = match config.admin_addr() {
            Some(addr) => Some(bind(&addr).await?),
            None => None,
        };

        let shutdown = CancellationToken::new();
        let signal_token = shutdown.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            signal_token.cancel();
        });

        tracing::info!("Press Ctrl+C to shutdown gracefully");
        self.serve(listener, admin_listener, shutdown).await?;
        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// bind 済みのリスナーで `shutdown` がキャンセルされるまで動かす
    pub async fn serve(
        self,
        listener: TcpListener,
        admin_listener: Option<TcpListener>,
        shutdown: CancellationToken,
    ) -> Result<(), ServerError> {
        tracing::info!("Turnboard server listening on {}", listener.local_addr()?);

        let admin_task = match admin_listener {
            Some(admin_listener) => {
                tracing::info!("Admin API listening on http://{}", admin_listener.local_addr()?);
                let app = admin_router(self.state.clone());
                let token = shutdown.clone();
                Some(tokio::spawn(async move {
                    axum::serve(admin_listener, app)
                        .with_graceful_shutdown(async move { token.cancelled().await })
                        .await
                }))
            }
            None => None,
        };

        accept_loop(listener, self.state, shutdown).await;

        if let Some(admin_task) = admin_task {
            match admin_task.await {
                Ok(result) => result?,
                Err(e) => tracing::error!("Admin API task failed: {}", e),
            }
        }
        Ok(())
    }
}

/// Acceptor: 接続ごとにハンドラーを起動する
async fn accept_loop(listener: TcpListener, state: Arc<AppState>, shutdown: CancellationToken) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("Acceptor stopped");
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    tracing::debug!("Accepted connection from {}", peer);
                    if let Err(e) = stream.set_nodelay(true) {
                        tracing::debug!("Failed to set TCP_NODELAY for {}: {}", peer, e);
                    }
                    tokio::spawn(handle_connection(stream, peer, state.clone()));
                }
                Err(e) => {
                    tracing::warn!("Failed to accept connection: {}", e);
                }
            }
        }
    }
}

fn admin_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/lobby", get(get_lobby))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn bind(addr: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })
}
