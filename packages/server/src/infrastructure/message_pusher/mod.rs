//! メッセージ送信（通知）の実装
//!
//! - `channel`: セッションごとの書き込みタスクへ mpsc チャンネルで渡す実装

pub mod channel;

pub use channel::ChannelMessagePusher;
