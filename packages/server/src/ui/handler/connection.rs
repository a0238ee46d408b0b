//! TCP connection handler.
//!
//! 1 接続につき 2 つのタスクを動かします。
//!
//! - 受信タスク: 1 行ずつ読み取り、コマンドに応じたユースケースを呼ぶ
//! - 送信タスク（`pusher_loop`）: MessagePusher から届いた行を書き込む
//!
//! どちらかが終了したらもう一方を止め、切断のユースケースを実行します。

use std::{fmt, net::SocketAddr, sync::Arc};

use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, Framed};
use turnboard_shared::{ClientCommand, ServerMessage};

use crate::{
    domain::SessionId,
    ui::state::AppState,
    usecase::{ConnectError, DrawError, LoadImageError},
};

/// 1 行の最大長（フルサイズのキャンバスの LOADIMG が収まる大きさ）
pub const MAX_LINE_LENGTH: usize = 32 * 1024 * 1024;

/// ログに出すコマンドの最大長
const LOG_PREVIEW_LENGTH: usize = 80;

type LineSink = SplitSink<Framed<TcpStream, AnyDelimiterCodec>, String>;

/// 改行区切りのバイト列として読み書きするコーデック
///
/// UTF-8 の検証は 1 行ごとに行い、不正な行だけを捨てる。
fn line_codec() -> AnyDelimiterCodec {
    AnyDelimiterCodec::new_with_max_length(b"\n".to_vec(), b"\n".to_vec(), MAX_LINE_LENGTH)
}

pub async fn handle_connection(stream: TcpStream, peer: SocketAddr, state: Arc<AppState>) {
    let framed = Framed::new(stream, line_codec());
    let (mut sink, mut lines) = framed.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let session_id = match state.connect_session_usecase.execute(tx).await {
        Ok(session_id) => session_id,
        Err(ConnectError::ServerFull { capacity }) => {
            tracing::warn!("Rejecting {}: server is full ({} sessions)", peer, capacity);
            if let Err(e) = sink.send(ServerMessage::Full.to_string()).await {
                tracing::debug!("Failed to send FULL to {}: {}", peer, e);
            }
            return;
        }
    };
    tracing::info!("Session {} connected from {}", session_id, peer);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(chunk) = lines.next().await {
            match chunk {
                Ok(chunk) => match decode_line(&chunk) {
                    Ok(line) => dispatch(&state_clone, &session_id, line).await,
                    Err(e) => {
                        tracing::warn!(
                            "Session {} sent a line that is not valid UTF-8, dropping: {}",
                            session_id,
                            e
                        );
                    }
                },
                Err(AnyDelimiterCodecError::MaxChunkLengthExceeded) => {
                    // Framed はデコードエラーの後に再開しない
                    tracing::warn!(
                        "Session {} sent a line longer than {} bytes, closing",
                        session_id,
                        MAX_LINE_LENGTH
                    );
                    break;
                }
                Err(AnyDelimiterCodecError::Io(e)) => {
                    tracing::info!("Session {} read error: {}", session_id, e);
                    break;
                }
            }
        }
    });

    let mut send_task = pusher_loop(rx, sink);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_session_usecase
        .execute(&session_id)
        .await;
    tracing::info!("Session {} ({}) disconnected", session_id, peer);
}

/// MessagePusher から届いた行を接続へ書き込むタスク
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sink: LineSink,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if let Err(e) = sink.send(line).await {
                tracing::debug!("Write failed, closing writer: {}", e);
                break;
            }
        }
    })
}

/// 区切り文字を除いた 1 行を文字列にする（末尾の CR は落とす）
fn decode_line(chunk: &[u8]) -> Result<&str, std::str::Utf8Error> {
    let chunk = chunk.strip_suffix(b"\r").unwrap_or(chunk);
    std::str::from_utf8(chunk)
}

/// 1 行のコマンドを対応するユースケースへ振り分ける
async fn dispatch(state: &AppState, session_id: &SessionId, line: &str) {
    if line.trim().is_empty() {
        return;
    }
    let command = ClientCommand::parse(line);
    tracing::debug!("Session {} -> {}", session_id, Preview(line));

    match command {
        ClientCommand::Join(name) => log_rejection(
            session_id,
            "JOIN",
            state.join_session_usecase.execute(session_id, &name).await,
        ),
        ClientCommand::Ready => log_rejection(
            session_id,
            "READY",
            state.ready_session_usecase.execute(session_id).await,
        ),
        ClientCommand::EndTurn => log_rejection(
            session_id,
            "ENDTURN",
            state.end_turn_usecase.execute(session_id).await,
        ),
        ClientCommand::Draw(payload) => {
            match state.submit_draw_usecase.execute(session_id, &payload).await {
                Err(DrawError::MalformedPayload(e)) => {
                    tracing::warn!("Session {} sent a malformed DRAW: {}", session_id, e);
                }
                other => log_rejection(session_id, "DRAW", other),
            }
        }
        ClientCommand::Clear => log_rejection(
            session_id,
            "CLEAR",
            state.clear_canvas_usecase.execute(session_id).await,
        ),
        ClientCommand::LoadImage(blob) => {
            match state.load_image_usecase.execute(session_id, &blob).await {
                Err(LoadImageError::MalformedImage(e)) => {
                    tracing::warn!("Session {} sent a malformed LOADIMG: {}", session_id, e);
                }
                other => log_rejection(session_id, "LOADIMG", other),
            }
        }
        ClientCommand::Chat(text) => log_rejection(
            session_id,
            "CHAT",
            state.send_chat_usecase.execute(session_id, &text).await,
        ),
        ClientCommand::Unknown(raw) => {
            tracing::warn!("Session {} sent an unknown command: {}", session_id, Preview(&raw));
        }
    }
}

fn log_rejection<T, E: fmt::Display>(session_id: &SessionId, verb: &str, result: Result<T, E>) {
    if let Err(e) = result {
        tracing::debug!("{} from session {} not applied: {}", verb, session_id, e);
    }
}

/// 長い行（LOADIMG など）をログ用に切り詰める
struct Preview<'a>(&'a str);

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.char_indices().nth(LOG_PREVIEW_LENGTH) {
            Some((end, _)) => write!(f, "{}... ({} bytes)", &self.0[..end], self.0.len()),
            None => f.write_str(self.0),
        }
    }
}
