//! Infrastructure 層
//!
//! ドメイン層が定義するインターフェースの具体的な実装と、外部向けの DTO を提供します。

pub mod codec;
pub mod dto;
pub mod message_pusher;
