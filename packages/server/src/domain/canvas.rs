//! 権威キャンバス
//!
//! 手番保持者から受け付けた操作をラスターへ適用し、受け付けた順に履歴へ記録します。

use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke,
    Transform,
};
use turnboard_shared::draw_command::{DrawCommand, Shape};

use super::error::CanvasError;

/// 履歴に記録される変更操作
///
/// 履歴は直近の CLEAR（白紙のスナップショット）以降の操作だけを保持する。
/// `LoadImage` は合成した画像のサイズだけを記録し、画素はラスター側が正とする。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasOperation {
    Draw(DrawCommand),
    /// 合成した画像のサイズ
    LoadImage { width: u32, height: u32 },
    Clear,
}

pub struct Canvas {
    pixmap: Pixmap,
    history: Vec<CanvasOperation>,
}

impl Canvas {
    /// 白背景のキャンバスを作成
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::InvalidDimensions { width, height })?;
        pixmap.fill(Color::WHITE);
        Ok(Self {
            pixmap,
            history: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn raster(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn history(&self) -> &[CanvasOperation] {
        &self.history
    }

    /// Draw Command を適用して履歴に追加
    pub fn apply_draw(&mut self, command: DrawCommand) {
        rasterize(&mut self.pixmap, &command);
        self.history.push(CanvasOperation::Draw(command));
    }

    /// 画像を左上に合わせて合成する（キャンバスからはみ出した部分は切り捨て）
    pub fn composite(&mut self, image: &Pixmap) {
        self.pixmap.draw_pixmap(
            0,
            0,
            image.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        self.history.push(CanvasOperation::LoadImage {
            width: image.width(),
            height: image.height(),
        });
    }

    /// 同じサイズの白紙のラスター（キャンバス自体は変更しない）
    pub fn blank(&self) -> Pixmap {
        let mut pixmap = self.pixmap.clone();
        pixmap.fill(Color::WHITE);
        pixmap
    }

    /// 白紙に戻し、履歴を `Clear` から始め直す
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::WHITE);
        self.history.clear();
        self.history.push(CanvasOperation::Clear);
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("history_len", &self.history.len())
            .finish()
    }
}

/// Draw Command を 1 件ラスターに描き込む
///
/// `text:` はサーバー側のラスターには影響しない。
pub fn rasterize(pixmap: &mut Pixmap, command: &DrawCommand) {
    let mut paint = Paint::default();
    paint.set_color_rgba8(command.colour.r, command.colour.g, command.colour.b, 255);
    paint.anti_alias = true;

    let thickness = command.thickness as f32;
    let (x1, y1) = (command.x1 as f32, command.y1 as f32);
    let (x2, y2) = (command.x2 as f32, command.y2 as f32);

    match &command.shape {
        Shape::Pencil | Shape::Line => {
            if command.x1 == command.x2 && command.y1 == command.y2 {
                // 長さ 0 の線は点として描く
                if let Some(dot) = PathBuilder::from_circle(x1, y1, (thickness / 2.0).max(0.5)) {
                    pixmap.fill_path(
                        &dot,
                        &paint,
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
                return;
            }
            let mut pb = PathBuilder::new();
            pb.move_to(x1, y1);
            pb.line_to(x2, y2);
            if let Some(path) = pb.finish() {
                let stroke = Stroke {
                    width: thickness,
                    line_cap: LineCap::Round,
                    line_join: LineJoin::Round,
                    ..Default::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
        Shape::Rect | Shape::Circle => {
            let Some(bounds) = Rect::from_ltrb(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
            else {
                return;
            };
            if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
                return;
            }

            let mut pb = PathBuilder::new();
            if command.shape == Shape::Rect {
                pb.push_rect(bounds);
            } else {
                pb.push_oval(bounds);
            }
            let Some(path) = pb.finish() else {
                return;
            };

            if command.filled {
                pixmap.fill_path(
                    &path,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            } else {
                let stroke = Stroke {
                    width: thickness,
                    line_cap: LineCap::Butt,
                    line_join: LineJoin::Miter,
                    ..Default::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
        Shape::Text(_) => {}
    }
}
