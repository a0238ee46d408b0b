//! TCP client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_util::codec::{Framed, LinesCodec};
use turnboard_shared::{ClientCommand, ServerMessage, time::current_timestamp_millis};

use super::{
    error::ClientError,
    formatter::MessageFormatter,
    input::{InputAction, Pen, parse_input},
    ui::redisplay_prompt,
};

/// Snapshot lines carry a whole canvas image.
const MAX_LINE_LENGTH: usize = 32 * 1024 * 1024;

type Lines = Framed<TcpStream, LinesCodec>;

/// Run one client session: handshake, then interactive play until exit or transport loss
pub async fn run_client_session(addr: &str, username: &str) -> Result<(), ClientError> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    let mut lines = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));

    handshake(&mut lines, username).await?;

    tracing::info!("Joined the game as '{}'", username);
    println!(
        "\nYou are '{}'. Draw with /line /rect /circle /pencil /text, end your turn with /end. Anything else is chat.\n",
        username
    );

    let (mut write, mut read) = lines.split();

    let username_for_read = username.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(line) = read.next().await {
            match line {
                Ok(line) => {
                    let formatted = match ServerMessage::parse(&line) {
                        Ok(message) => MessageFormatter::format_server_message(
                            &message,
                            &username_for_read,
                            current_timestamp_millis(),
                        ),
                        Err(_) => MessageFormatter::format_raw_line(&line),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&username_for_read);
                }
                Err(e) => {
                    tracing::warn!("Read error: {}", e);
                    return true;
                }
            }
        }
        tracing::info!("Server closed the connection");
        true
    });

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // rustyline blocks, so it lives on its own thread
    let prompt = format!("{}> ", username);
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if input_tx.send(line.to_string()).is_err() || line == "/quit" {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    let username_for_write = username.to_string();
    let mut write_task = tokio::spawn(async move {
        let mut pen = Pen::default();

        while let Some(line) = input_rx.recv().await {
            match parse_input(&line, &pen) {
                Ok(InputAction::Send(command)) => {
                    if let Err(e) = write.send(command.to_string()).await {
                        tracing::warn!("Failed to send {}: {}", command.verb(), e);
                        return true;
                    }
                }
                Ok(InputAction::SetPen(next)) => {
                    pen = next;
                    println!("pen: {} w{}", pen.colour, pen.thickness);
                }
                Ok(InputAction::Quit) => return false,
                Err(e) => println!("{}", e),
            }
            redisplay_prompt(&username_for_write);
        }

        false
    });

    let connection_lost = tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            read_result.unwrap_or(true)
        }
        write_result = &mut write_task => {
            read_task.abort();
            write_result.unwrap_or(true)
        }
    };

    if connection_lost {
        return Err(ClientError::ConnectionError("Connection lost".to_string()));
    }
    Ok(())
}

/// Claim `username` and signal readiness once the server accepts it
async fn handshake(lines: &mut Lines, username: &str) -> Result<(), ClientError> {
    send(lines, ClientCommand::Join(username.to_string())).await?;

    loop {
        let line = match lines.next().await {
            Some(Ok(line)) => line,
            Some(Err(e)) => return Err(ClientError::ConnectionError(e.to_string())),
            None => {
                return Err(ClientError::ConnectionError(
                    "Server closed the connection during handshake".to_string(),
                ));
            }
        };

        match ServerMessage::parse(&line) {
            Ok(ServerMessage::Joined(_)) => return send(lines, ClientCommand::Ready).await,
            Ok(ServerMessage::NameInUse) => {
                return Err(ClientError::NameInUse(username.to_string()));
            }
            Ok(ServerMessage::Full) => return Err(ClientError::ServerFull),
            Ok(message) => print!(
                "{}",
                MessageFormatter::format_server_message(
                    &message,
                    username,
                    current_timestamp_millis()
                )
            ),
            Err(e) => tracing::debug!("Ignoring line during handshake: {}", e),
        }
    }
}

async fn send(lines: &mut Lines, command: ClientCommand) -> Result<(), ClientError> {
    lines
        .send(command.to_string())
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}
