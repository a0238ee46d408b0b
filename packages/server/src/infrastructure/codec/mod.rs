//! スナップショットのコーデック実装
//!
//! - `png_base64`: PNG を標準 Base64 で 1 行に収める実装

pub mod png_base64;

pub use png_base64::PngBase64Codec;
