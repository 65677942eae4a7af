use std::fmt::Write as _;
use std::path::Path;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PaintreelError, PaintreelResult};

/// 1-based `(row, col)` cell as written in point files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// One point in file order, carrying its color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourcePoint {
    pub cell: Cell,
    pub color: Rgba8,
}

/// Cells sharing one color, in the order they appear under that color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorGroup {
    pub color: Rgba8,
    pub cells: Vec<Cell>,
}

/// Parsed point-list file.
///
/// `points` and `groups` describe the same cells: `points` in file order, `groups` keyed by
/// color in order of first appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointSource {
    /// The header count from the first line. Informational only.
    pub declared_count: Option<u64>,
    pub points: Vec<SourcePoint>,
    pub groups: Vec<ColorGroup>,
}

impl PointSource {
    /// Parse the `#RRGGBB <count> (row,col) ...` text format.
    ///
    /// Lines that do not match are skipped. The per-line `<count>` is ignored in favour of the
    /// coordinate pairs actually present.
    pub fn parse(text: &str) -> Self {
        let mut lines = text
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, l)| !l.is_empty());
        let Some((_, header)) = lines.next() else {
            return Self::default();
        };

        let mut out = Self {
            declared_count: header.parse().ok(),
            ..Self::default()
        };
        for (line_no, line) in lines {
            let Some((color, cells)) = parse_color_line(line) else {
                tracing::debug!(line = line_no + 1, "skipping malformed point line");
                continue;
            };
            out.push_cells(color, cells);
        }
        out
    }

    /// Read and parse a point file from disk.
    pub fn from_path(path: &Path) -> PaintreelResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PaintreelError::io(path, e))?;
        let src = Self::parse(&text);
        tracing::debug!(
            path = %path.display(),
            points = src.points.len(),
            colors = src.groups.len(),
            "loaded point source"
        );
        Ok(src)
    }

    /// Build a source from color groups, deriving `points` in group order.
    pub fn from_groups(groups: Vec<ColorGroup>) -> Self {
        let mut out = Self {
            declared_count: Some(groups.len() as u64),
            ..Self::default()
        };
        for g in groups {
            out.push_cells(g.color, g.cells);
        }
        out
    }

    /// Append cells of `color`, merging into the first group of that color.
    pub fn push_cells(&mut self, color: Rgba8, cells: Vec<Cell>) {
        self.points.extend(cells.iter().map(|&cell| SourcePoint { cell, color }));
        match self.groups.iter_mut().find(|g| g.color == color) {
            Some(group) => group.cells.extend(cells),
            None => self.groups.push(ColorGroup { color, cells }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Serialize back into the text format: group count, then one line per color.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.groups.len());
        for g in &self.groups {
            let _ = write!(out, "{} {}", g.color.to_hex(), g.cells.len());
            for c in &g.cells {
                let _ = write!(out, " ({},{})", c.row, c.col);
            }
            out.push('\n');
        }
        out
    }

    /// Write [`PointSource::to_text`] to `path`.
    pub fn write_to(&self, path: &Path) -> PaintreelResult<()> {
        std::fs::write(path, self.to_text()).map_err(|e| PaintreelError::io(path, e))
    }
}

fn parse_color_line(line: &str) -> Option<(Rgba8, Vec<Cell>)> {
    let hex = line.get(..7)?;
    let color = Rgba8::from_hex(hex).ok()?;

    let rest = &line[7..];
    let after_ws = rest.trim_start();
    if after_ws.len() == rest.len() {
        return None;
    }
    let count_len = after_ws.bytes().take_while(u8::is_ascii_digit).count();
    if count_len == 0 {
        return None;
    }
    let coords = &after_ws[count_len..];
    if !coords.is_empty() && !coords.starts_with(char::is_whitespace) {
        return None;
    }

    Some((color, scan_cells(coords)))
}

/// Find every `(row,col)` pair in `s`, tolerating whitespace inside the parentheses.
fn scan_cells(s: &str) -> Vec<Cell> {
    let bytes = s.as_bytes();
    let mut cells = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'(' {
            if let Some((cell, end)) = parse_pair(bytes, i + 1) {
                cells.push(cell);
                i = end;
                continue;
            }
        }
        i += 1;
    }
    cells
}

fn parse_pair(bytes: &[u8], mut i: usize) -> Option<(Cell, usize)> {
    fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    }
    fn number(bytes: &[u8], i: usize) -> Option<(u32, usize)> {
        let len = bytes[i..].iter().take_while(|b| b.is_ascii_digit()).count();
        if len == 0 {
            return None;
        }
        let s = std::str::from_utf8(&bytes[i..i + len]).ok()?;
        Some((s.parse().ok()?, i + len))
    }
    fn expect(bytes: &[u8], i: usize, ch: u8) -> Option<usize> {
        (bytes.get(i) == Some(&ch)).then_some(i + 1)
    }

    i = skip_ws(bytes, i);
    let (row, j) = number(bytes, i)?;
    i = expect(bytes, skip_ws(bytes, j), b',')?;
    i = skip_ws(bytes, i);
    let (col, j) = number(bytes, i)?;
    i = expect(bytes, skip_ws(bytes, j), b')')?;
    Some((Cell { row, col }, i))
}

#[cfg(test)]
#[path = "../../tests/unit/source/points.rs"]
mod tests;
