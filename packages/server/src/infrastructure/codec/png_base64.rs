//! PNG + Base64 の SnapshotCodec 実装

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, RgbaImage};
use tiny_skia::{ColorU8, Pixmap};

use crate::domain::{CodecError, SnapshotCodec};

#[derive(Debug, Default, Clone, Copy)]
pub struct PngBase64Codec;

impl PngBase64Codec {
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotCodec for PngBase64Codec {
    fn encode(&self, raster: &Pixmap) -> Result<String, CodecError> {
        // tiny-skia は乗算済みアルファで保持しているので戻してから書き出す
        let mut rgba = Vec::with_capacity(raster.data().len());
        for pixel in raster.pixels() {
            let c = pixel.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        let image = RgbaImage::from_raw(raster.width(), raster.height(), rgba)
            .ok_or(CodecError::EmptyImage)?;

        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| CodecError::InvalidImage(e.to_string()))?;

        Ok(STANDARD.encode(png.into_inner()))
    }

    fn decode(&self, blob: &str) -> Result<Pixmap, CodecError> {
        let bytes = STANDARD
            .decode(blob.trim())
            .map_err(|e| CodecError::InvalidEncoding(e.to_string()))?;
        let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .map_err(|e| CodecError::InvalidImage(e.to_string()))?
            .to_rgba8();

        let mut pixmap =
            Pixmap::new(image.width(), image.height()).ok_or(CodecError::EmptyImage)?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Ok(pixmap)
    }
}
