use std::collections::BTreeMap;
use std::path::Path;

use image::RgbaImage;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PaintreelError, PaintreelResult};
use crate::source::points::{Cell, ColorGroup, PointSource};

/// Turn a raster into a point list: one group per RGB color, transparent pixels dropped.
///
/// Colors are ordered by hex string and cells by `(row, col)`, both 1-based. Partially
/// transparent pixels are kept and painted opaque.
pub fn extract_point_source(img: &RgbaImage) -> PointSource {
    let mut by_color: BTreeMap<String, (Rgba8, Vec<Cell>)> = BTreeMap::new();
    for (x, y, px) in img.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        if a == 0 {
            continue;
        }
        let color = Rgba8::opaque(r, g, b);
        by_color
            .entry(color.to_hex())
            .or_insert_with(|| (color, Vec::new()))
            .1
            .push(Cell::new(y + 1, x + 1));
    }

    let groups = by_color
        .into_values()
        .map(|(color, mut cells)| {
            cells.sort_unstable();
            ColorGroup { color, cells }
        })
        .collect();
    PointSource::from_groups(groups)
}

/// Decode an image file and extract its point list.
pub fn extract_point_source_from_path(path: &Path) -> PaintreelResult<PointSource> {
    let img = image::open(path)
        .map_err(|e| PaintreelError::image(path, e))?
        .to_rgba8();
    let src = extract_point_source(&img);
    tracing::info!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        kept = src.points.len(),
        colors = src.groups.len(),
        "extracted point source"
    );
    Ok(src)
}

/// Options for [`hex_grid`].
#[derive(Clone, Copy, Debug, Default)]
pub struct HexGridOpts {
    /// Emit `#RRGGBBAA` instead of `#RRGGBB`.
    pub keep_alpha: bool,
    /// Emit `None` for fully transparent pixels.
    pub transparent_as_null: bool,
}

/// Row-major grid of hex color strings, one entry per pixel.
pub fn hex_grid(img: &RgbaImage, opts: HexGridOpts) -> Vec<Vec<Option<String>>> {
    img.rows()
        .map(|row| {
            row.map(|px| {
                let c = Rgba8::from_array(px.0);
                if opts.transparent_as_null && c.a == 0 {
                    None
                } else if opts.keep_alpha {
                    Some(c.to_hex_alpha())
                } else {
                    Some(c.to_hex())
                }
            })
            .collect()
        })
        .collect()
}

/// Serialize [`hex_grid`] to JSON; `indent == 0` produces compact output.
pub fn hex_grid_json(img: &RgbaImage, opts: HexGridOpts, indent: usize) -> PaintreelResult<String> {
    let grid = hex_grid(img, opts);
    if indent == 0 {
        return serde_json::to_string(&grid).map_err(|e| PaintreelError::serde(e.to_string()));
    }

    let indent_str = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent_str.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(&grid, &mut ser).map_err(|e| PaintreelError::serde(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| PaintreelError::serde(e.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/source/extract.rs"]
mod tests;
