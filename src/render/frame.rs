use std::path::Path;

use image::RgbaImage;

use crate::foundation::core::{Canvas, PaintPoint, Rgba8};
use crate::foundation::error::{PaintreelError, PaintreelResult};

/// A canvas-sized RGBA8 raster (straight alpha).
///
/// During an export this is the accumulator: it starts as a copy of the background, is written
/// in place by the sequencer and is what every snapshot captures.
///
/// `data` always holds exactly `width * height * 4` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaFrame {
    width: u32,
    height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    data: Vec<u8>,
}

impl RgbaFrame {
    /// A frame filled with one color.
    pub fn filled(canvas: Canvas, color: Rgba8) -> Self {
        let data = color.to_array().repeat(canvas.pixel_count());
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    /// Wrap raw bytes, checking the length against the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> PaintreelResult<Self> {
        let canvas = Canvas::new(width, height)?;
        if data.len() != canvas.pixel_count() * 4 {
            return Err(PaintreelError::validation(format!(
                "frame data is {} bytes, expected {} for {width}x{height}",
                data.len(),
                canvas.pixel_count() * 4
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_image(img: RgbaImage) -> PaintreelResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_raw(width, height, img.into_raw())
    }

    /// Decode any supported raster file into RGBA8.
    pub fn load(path: &Path) -> PaintreelResult<Self> {
        let img = image::open(path)
            .map_err(|e| PaintreelError::image(path, e))?
            .to_rgba8();
        Self::from_image(img)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let i = self.offset(x, y);
        Rgba8::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        )
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&color.to_array());
    }

    /// Opaque overwrite of one point. Returns `false` when the pixel already holds exactly
    /// `p.color` (all four channels), leaving the frame untouched.
    pub fn paint(&mut self, p: PaintPoint) -> bool {
        if self.pixel(p.x, p.y) == p.color {
            return false;
        }
        self.put_pixel(p.x, p.y, p.color);
        true
    }

    /// Encode as PNG at `path`.
    pub fn save_png(&self, path: &Path) -> PaintreelResult<()> {
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| PaintreelError::image(path, e))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
