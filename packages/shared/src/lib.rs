//! Code shared by the Turnboard server and client.
//!
//! - `protocol`: the line-based command protocol spoken over TCP
//! - `draw_command`: the drawing primitive carried by `DRAW` lines
//! - `logger` / `time`: ambient helpers used by both binaries

pub mod draw_command;
pub mod logger;
pub mod protocol;
pub mod time;

pub use draw_command::{DrawCommand, DrawCommandError, Shape};
pub use protocol::{ClientCommand, ProtocolError, Roster, ServerMessage};
