//! SnapshotCodec trait 定義
//!
//! キャンバス全体を `LOADIMG` の不透明なテキストとの間で相互変換するインターフェース。
//! 具体的な形式（PNG + Base64 など）は Infrastructure 層が提供します。

use tiny_skia::Pixmap;

use super::error::CodecError;

pub trait SnapshotCodec: Send + Sync {
    /// ラスターを 1 行に収まるテキストへ変換
    ///
    /// 同じラスターに対しては常に同じ結果を返すこと。
    fn encode(&self, raster: &Pixmap) -> Result<String, CodecError>;

    /// テキストをラスターへ復元
    fn decode(&self, blob: &str) -> Result<Pixmap, CodecError>;
}
