use std::path::PathBuf;

use crate::foundation::core::SnapshotIndex;
use crate::foundation::error::{PaintreelError, PaintreelResult};
use crate::render::frame::RgbaFrame;

/// Default snapshot file prefix.
pub const DEFAULT_SNAPSHOT_PREFIX: &str = "snapshot_";

/// Configuration provided to a [`SnapshotSink`] before the first snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Snapshot width in pixels.
    pub width: u32,
    /// Snapshot height in pixels.
    pub height: u32,
    /// Effective changes per full batch.
    pub batch_size: usize,
}

/// What a pushed snapshot contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotMeta {
    /// Sequence number, starting at 1 with no gaps.
    pub index: SnapshotIndex,
    /// Effective changes accumulated since the previous snapshot.
    pub applied: usize,
}

/// Sink contract for consuming snapshots in sequence order.
///
/// Ordering contract: `push_snapshot` is called with contiguous indices starting at
/// [`SnapshotIndex::FIRST`].
pub trait SnapshotSink {
    /// Called once before any snapshot is pushed.
    fn begin(&mut self, cfg: SinkConfig) -> PaintreelResult<()>;
    /// Push one snapshot of the accumulator.
    fn push_snapshot(&mut self, meta: SnapshotMeta, frame: &RgbaFrame) -> PaintreelResult<()>;
    /// Called once after the last snapshot is pushed.
    fn end(&mut self) -> PaintreelResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    ended: bool,
    snapshots: Vec<(SnapshotMeta, RgbaFrame)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured snapshots.
    pub fn snapshots(&self) -> &[(SnapshotMeta, RgbaFrame)] {
        &self.snapshots
    }

    /// Effective change counts per snapshot, in order.
    pub fn applied_counts(&self) -> Vec<usize> {
        self.snapshots.iter().map(|(m, _)| m.applied).collect()
    }

    /// Whether `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl SnapshotSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PaintreelResult<()> {
        self.cfg = Some(cfg);
        self.ended = false;
        self.snapshots.clear();
        Ok(())
    }

    fn push_snapshot(&mut self, meta: SnapshotMeta, frame: &RgbaFrame) -> PaintreelResult<()> {
        self.snapshots.push((meta, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> PaintreelResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes each snapshot as `<prefix><index:06>.png` into a directory.
///
/// Files already written are left in place if a later write fails.
#[derive(Debug, Clone)]
pub struct PngDirSink {
    out_dir: PathBuf,
    prefix: String,
    written: Vec<PathBuf>,
}

impl PngDirSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self::with_prefix(out_dir, DEFAULT_SNAPSHOT_PREFIX)
    }

    pub fn with_prefix(out_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            out_dir: out_dir.into(),
            prefix: prefix.into(),
            written: Vec::new(),
        }
    }

    pub fn out_dir(&self) -> &std::path::Path {
        &self.out_dir
    }

    /// Paths written so far, in sequence order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn path_for(&self, index: SnapshotIndex) -> PathBuf {
        self.out_dir.join(index.file_name(&self.prefix))
    }
}

impl SnapshotSink for PngDirSink {
    fn begin(&mut self, _cfg: SinkConfig) -> PaintreelResult<()> {
        std::fs::create_dir_all(&self.out_dir).map_err(|e| PaintreelError::io(&self.out_dir, e))?;
        self.written.clear();
        Ok(())
    }

    fn push_snapshot(&mut self, meta: SnapshotMeta, frame: &RgbaFrame) -> PaintreelResult<()> {
        let path = self.path_for(meta.index);
        frame.save_png(&path)?;
        tracing::debug!(path = %path.display(), applied = meta.applied, "wrote snapshot");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> PaintreelResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/sink.rs"]
mod tests;
