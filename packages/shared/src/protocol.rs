//! Line-based command protocol.
//!
//! One message per line, UTF-8 text. Every message starts with an upper-case
//! verb, optionally followed by a single space and a payload.
//!
//! | Direction | Line |
//! |---|---|
//! | C→S | `JOIN <name>`, `READY`, `ENDTURN`, `DRAW <json>`, `CLEAR`, `LOADIMG <blob>`, `CHAT <text>` |
//! | S→C | `NAMEINUSE`, `JOINED <name>`, `LOADIMG <blob>`, `TURN`, `DRAW <json>`, `USERLIST <names>\|<cur>\|<next>`, `FULL`, `LOG <text>`, `CHAT <name>: <text>` |

use std::fmt;

use thiserror::Error;

/// Errors produced while decoding server messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("empty line")]
    EmptyLine,

    #[error("unknown verb in line '{0}'")]
    UnknownVerb(String),

    #[error("malformed {verb} payload: '{payload}'")]
    MalformedPayload { verb: &'static str, payload: String },
}

/// Roster label for sessions that have not claimed a username yet.
pub const PENDING_USERNAME: &str = "joining...";

const JOIN: &str = "JOIN";
const READY: &str = "READY";
const ENDTURN: &str = "ENDTURN";
const DRAW: &str = "DRAW";
const CLEAR: &str = "CLEAR";
const LOADIMG: &str = "LOADIMG";
const CHAT: &str = "CHAT";
const NAMEINUSE: &str = "NAMEINUSE";
const JOINED: &str = "JOINED";
const TURN: &str = "TURN";
const USERLIST: &str = "USERLIST";
const FULL: &str = "FULL";
const LOG: &str = "LOG";

fn split_verb(line: &str) -> (&str, Option<&str>) {
    match line.split_once(' ') {
        Some((verb, payload)) => (verb, Some(payload)),
        None => (line, None),
    }
}

/// A command sent by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Claim a display name. The name is trimmed; an empty name is kept as-is
    /// so that the server can reject it.
    Join(String),
    Ready,
    EndTurn,
    /// Raw Draw Command payload, validated by the receiver
    Draw(String),
    Clear,
    /// Raw snapshot blob
    LoadImage(String),
    Chat(String),
    /// Anything that does not match a known verb
    Unknown(String),
}

impl ClientCommand {
    /// Parse one inbound line. Never fails: unrecognized input becomes
    /// [`ClientCommand::Unknown`] so that the caller can log and drop it.
    pub fn parse(line: &str) -> Self {
        match split_verb(line) {
            (JOIN, payload) => ClientCommand::Join(payload.unwrap_or_default().trim().to_string()),
            (READY, None) => ClientCommand::Ready,
            (ENDTURN, None) => ClientCommand::EndTurn,
            (CLEAR, None) => ClientCommand::Clear,
            (DRAW, Some(payload)) => ClientCommand::Draw(payload.to_string()),
            (LOADIMG, Some(payload)) => ClientCommand::LoadImage(payload.to_string()),
            (CHAT, Some(payload)) => ClientCommand::Chat(payload.to_string()),
            _ => ClientCommand::Unknown(line.to_string()),
        }
    }

    /// Protocol verb, for logging.
    pub fn verb(&self) -> &'static str {
        match self {
            ClientCommand::Join(_) => JOIN,
            ClientCommand::Ready => READY,
            ClientCommand::EndTurn => ENDTURN,
            ClientCommand::Draw(_) => DRAW,
            ClientCommand::Clear => CLEAR,
            ClientCommand::LoadImage(_) => LOADIMG,
            ClientCommand::Chat(_) => CHAT,
            ClientCommand::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ClientCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientCommand::Join(name) => write!(f, "{} {}", JOIN, name),
            ClientCommand::Ready => f.write_str(READY),
            ClientCommand::EndTurn => f.write_str(ENDTURN),
            ClientCommand::Draw(payload) => write!(f, "{} {}", DRAW, payload),
            ClientCommand::Clear => f.write_str(CLEAR),
            ClientCommand::LoadImage(blob) => write!(f, "{} {}", LOADIMG, blob),
            ClientCommand::Chat(text) => write!(f, "{} {}", CHAT, text),
            ClientCommand::Unknown(line) => f.write_str(line),
        }
    }
}

/// Roster broadcast: usernames in join order plus the current and next turn
/// holder positions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    pub names: Vec<String>,
    pub current: Option<usize>,
    pub next: Option<usize>,
}

impl Roster {
    fn parse(payload: &str) -> Result<Self, ProtocolError> {
        let malformed = || ProtocolError::MalformedPayload {
            verb: USERLIST,
            payload: payload.to_string(),
        };
        let mut parts = payload.rsplitn(3, '|');
        let next = parts.next().ok_or_else(malformed)?;
        let current = parts.next().ok_or_else(malformed)?;
        let names = parts.next().ok_or_else(malformed)?;

        let parse_index = |s: &str| -> Result<Option<usize>, ProtocolError> {
            let value: i64 = s.trim().parse().map_err(|_| malformed())?;
            Ok(usize::try_from(value).ok())
        };

        Ok(Self {
            names: if names.is_empty() {
                Vec::new()
            } else {
                names.split(',').map(str::to_string).collect()
            },
            current: parse_index(current)?,
            next: parse_index(next)?,
        })
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = |i: Option<usize>| i.map_or(-1, |i| i as i64);
        write!(
            f,
            "{}|{}|{}",
            self.names.join(","),
            index(self.current),
            index(self.next)
        )
    }
}

/// A message sent by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    NameInUse,
    Joined(String),
    /// Full-canvas sync or a relayed image load
    LoadImage(String),
    Turn,
    /// Relayed Draw Command payload
    Draw(String),
    UserList(Roster),
    Full,
    /// Informational notice
    Log(String),
    Chat { from: String, text: String },
}

impl ServerMessage {
    pub fn log(text: impl Into<String>) -> Self {
        ServerMessage::Log(text.into())
    }

    /// Parse one line received from the server.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        if line.is_empty() {
            return Err(ProtocolError::EmptyLine);
        }
        match split_verb(line) {
            (NAMEINUSE, None) => Ok(ServerMessage::NameInUse),
            (TURN, None) => Ok(ServerMessage::Turn),
            (FULL, None) => Ok(ServerMessage::Full),
            (JOINED, Some(name)) => Ok(ServerMessage::Joined(name.to_string())),
            (LOADIMG, Some(blob)) => Ok(ServerMessage::LoadImage(blob.to_string())),
            (DRAW, Some(payload)) => Ok(ServerMessage::Draw(payload.to_string())),
            (USERLIST, Some(payload)) => Roster::parse(payload).map(ServerMessage::UserList),
            (LOG, Some(text)) => Ok(ServerMessage::Log(text.to_string())),
            (CHAT, Some(payload)) => payload
                .split_once(": ")
                .map(|(from, text)| ServerMessage::Chat {
                    from: from.to_string(),
                    text: text.to_string(),
                })
                .ok_or_else(|| ProtocolError::MalformedPayload {
                    verb: CHAT,
                    payload: payload.to_string(),
                }),
            _ => Err(ProtocolError::UnknownVerb(line.to_string())),
        }
    }
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerMessage::NameInUse => f.write_str(NAMEINUSE),
            ServerMessage::Joined(name) => write!(f, "{} {}", JOINED, name),
            ServerMessage::LoadImage(blob) => write!(f, "{} {}", LOADIMG, blob),
            ServerMessage::Turn => f.write_str(TURN),
            ServerMessage::Draw(payload) => write!(f, "{} {}", DRAW, payload),
            ServerMessage::UserList(roster) => write!(f, "{} {}", USERLIST, roster),
            ServerMessage::Full => f.write_str(FULL),
            ServerMessage::Log(text) => write!(f, "{} {}", LOG, text),
            ServerMessage::Chat { from, text } => write!(f, "{} {}: {}", CHAT, from, text),
        }
    }
}
