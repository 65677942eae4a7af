use crate::foundation::error::{PaintreelError, PaintreelResult};

/// 1-based snapshot sequence number. The first emitted snapshot is `SnapshotIndex(1)`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SnapshotIndex(pub u64);

impl SnapshotIndex {
    /// First index of every run.
    pub const FIRST: SnapshotIndex = SnapshotIndex(1);

    /// The index that follows `self`.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// File name `<prefix><index zero-padded to 6 digits>.png`.
    pub fn file_name(self, prefix: &str) -> String {
        format!("{prefix}{:06}.png", self.0)
    }
}

/// Fixed raster dimensions for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> PaintreelResult<Self> {
        if width == 0 || height == 0 {
            return Err(PaintreelError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Map signed absolute coordinates into the canvas, or `None` when off-canvas.
    pub fn clip(self, x: i64, y: i64) -> Option<(u32, u32)> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some((x as u32, y as u32))
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color; every painted point uses this.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` (case-insensitive). Alpha is always 255.
    pub fn from_hex(s: &str) -> PaintreelResult<Self> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| PaintreelError::validation(format!("color '{s}' must start with '#'")))?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaintreelError::validation(format!(
                "color '{s}' must be #RRGGBB"
            )));
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::opaque(r, g, b)),
            _ => Err(PaintreelError::validation(format!(
                "color '{s}' must be #RRGGBB"
            ))),
        }
    }

    /// Upper-case `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Upper-case `#RRGGBBAA`.
    pub fn to_hex_alpha(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }
}

/// A canvas-absolute, zero-based paint operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PaintPoint {
    pub x: u32,
    pub y: u32,
    pub color: Rgba8,
}

/// Top-left placement of a layer on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Origin {
    pub x: i64,
    pub y: i64,
}

impl Origin {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
