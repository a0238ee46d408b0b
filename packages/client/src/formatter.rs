//! Message formatting utilities for client display.

use turnboard_shared::{DrawCommand, Roster, ServerMessage, time::timestamp_to_clock_label};

const RAW_PREVIEW_CHARS: usize = 80;
const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format one server message received at `received_at` (Unix millis).
    ///
    /// Snapshot blobs are summarized by size, never printed.
    pub fn format_server_message(message: &ServerMessage, me: &str, received_at: i64) -> String {
        let at = timestamp_to_clock_label(received_at);
        match message {
            ServerMessage::Joined(name) => format!("\n[{}] joined as '{}'\n", at, name),
            ServerMessage::NameInUse => format!("\n[{}] username is already in use\n", at),
            ServerMessage::Full => format!("\n[{}] server is full\n", at),
            ServerMessage::Turn => format!("\n[{}] >>> your turn to draw (/end when done) <<<\n", at),
            ServerMessage::LoadImage(blob) => {
                format!("\n[{}] canvas image received ({} bytes)\n", at, blob.len())
            }
            ServerMessage::Draw(payload) => {
                format!("\n[{}] {}\n", at, Self::format_draw(payload))
            }
            ServerMessage::UserList(roster) => Self::format_roster(roster, me),
            ServerMessage::Log(text) => format!("\n[{}] {}\n", at, text),
            ServerMessage::Chat { from, text } => format!("\n[{}] @{}: {}\n", at, from, text),
        }
    }

    /// Summarize a relayed draw payload
    pub fn format_draw(payload: &str) -> String {
        match DrawCommand::from_json(payload) {
            Ok(command) => format!(
                "draw {} ({},{})-({},{}) {} w{}{}",
                command.shape,
                command.x1,
                command.y1,
                command.x2,
                command.y2,
                command.colour,
                command.thickness,
                if command.filled { " filled" } else { "" }
            ),
            Err(e) => format!("draw (unreadable: {})", e),
        }
    }

    /// Format the roster, marking the current holder with `*` and the next with `>`
    pub fn format_roster(roster: &Roster, me: &str) -> String {
        let mut output = String::new();
        output.push_str("\n\n");
        output.push_str(RULE);
        output.push_str("\nPlayers:\n");

        if roster.names.is_empty() {
            output.push_str("(No players)\n");
        } else {
            for (position, name) in roster.names.iter().enumerate() {
                let marker = if roster.current == Some(position) {
                    '*'
                } else if roster.next == Some(position) {
                    '>'
                } else {
                    ' '
                };
                let me_suffix = if name.eq_ignore_ascii_case(me) { " (me)" } else { "" };
                output.push_str(&format!("{} {}{}\n", marker, name, me_suffix));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format a line the client could not parse, truncated
    pub fn format_raw_line(line: &str) -> String {
        let preview: String = line.chars().take(RAW_PREVIEW_CHARS).collect();
        let ellipsis = if line.chars().count() > RAW_PREVIEW_CHARS { "..." } else { "" };
        format!("\n(unrecognized) {}{}\n", preview, ellipsis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-01T12:34:56Z
    const RECEIVED_AT: i64 = 1_704_112_496_000;

    #[test]
    fn test_format_roster_marks_current_next_and_me() {
        // テスト項目: 手番の人に *、次の人に >、自分に (me) が付く
        // given (前提条件):
        let roster = Roster {
            names: vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
            current: Some(0),
            next: Some(1),
        };

        // when (操作):
        let output = MessageFormatter::format_roster(&roster, "carol");

        // then (期待する結果):
        assert!(output.contains("* alice\n"));
        assert!(output.contains("> bob\n"));
        assert!(output.contains("  carol (me)\n"));
    }

    #[test]
    fn test_format_roster_without_players() {
        // テスト項目: 参加者がいない場合はその旨を表示する
        // given (前提条件):
        let roster = Roster::default();

        // when (操作):
        let output = MessageFormatter::format_roster(&roster, "alice");

        // then (期待する結果):
        assert!(output.contains("(No players)"));
    }

    #[test]
    fn test_format_snapshot_shows_size_only() {
        // テスト項目: スナップショットは中身ではなくサイズだけが表示される
        // given (前提条件):
        let blob = "iVBORw0KGgo".repeat(100);
        let message = ServerMessage::LoadImage(blob.clone());

        // when (操作):
        let output = MessageFormatter::format_server_message(&message, "alice", RECEIVED_AT);

        // then (期待する結果):
        assert_eq!(output, "\n[12:34:56] canvas image received (1100 bytes)\n");
        assert!(!output.contains(&blob));
    }

    #[test]
    fn test_format_chat_and_log() {
        // テスト項目: チャットと案内に受信時刻が付く
        // given (前提条件):
        let chat = ServerMessage::Chat {
            from: "bob".to_string(),
            text: "nice".to_string(),
        };
        let log = ServerMessage::log("It's bob's turn!");

        // when (操作):
        let chat_output = MessageFormatter::format_server_message(&chat, "alice", RECEIVED_AT);
        let log_output = MessageFormatter::format_server_message(&log, "alice", RECEIVED_AT);

        // then (期待する結果):
        assert_eq!(chat_output, "\n[12:34:56] @bob: nice\n");
        assert_eq!(log_output, "\n[12:34:56] It's bob's turn!\n");
    }

    #[test]
    fn test_format_draw_summary() {
        // テスト項目: DRAW は図形・座標・色・太さの要約として表示される
        // given (前提条件):
        let payload = r##"{"x1":1,"y1":2,"x2":30,"y2":40,"thickness":3,"colourHex":"#ff0000","shape":"rect","filled":true}"##;

        // when (操作):
        let output = MessageFormatter::format_draw(payload);

        // then (期待する結果):
        assert_eq!(output, "draw rect (1,2)-(30,40) #ff0000 w3 filled");
    }

    #[test]
    fn test_format_raw_line_is_truncated() {
        // テスト項目: 解釈できない長い行は切り詰めて表示される
        // given (前提条件):
        let line = "X".repeat(500);

        // when (操作):
        let output = MessageFormatter::format_raw_line(&line);

        // then (期待する結果):
        assert_eq!(output, format!("\n(unrecognized) {}...\n", "X".repeat(80)));
    }
}
