use crate::foundation::core::SnapshotIndex;
use crate::foundation::error::{PaintreelError, PaintreelResult};
use crate::layer::cursor::LayerCursor;
use crate::render::frame::RgbaFrame;
use crate::sequence::sink::{SinkConfig, SnapshotMeta, SnapshotSink};

/// Effective changes per snapshot unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Options controlling snapshot batching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequencerOpts {
    /// Effective pixel changes collected before a snapshot is emitted. Must be `>= 1`.
    pub batch_size: usize,
}

impl Default for SequencerOpts {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Export run statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Snapshots pushed to the sink.
    pub snapshots: u64,
    /// Pixel writes that changed the accumulator.
    pub pixels_changed: u64,
    /// Points handed out by cursors, effective or not.
    pub points_consumed: u64,
    /// Points discarded because the pixel already had that exact color.
    pub noops_skipped: u64,
}

/// Round-robins layer cursors into a shared accumulator and cuts a snapshot every
/// `batch_size` effective changes.
///
/// Layers keep their registration order for the whole run; exhausted cursors are skipped in
/// place.
#[derive(Debug)]
pub struct SnapshotSequencer {
    cursors: Vec<LayerCursor>,
    acc: RgbaFrame,
    opts: SequencerOpts,
    stats: ExportStats,
}

impl SnapshotSequencer {
    /// Take ownership of the accumulator (initially the background) and the layer cursors.
    ///
    /// Every cursor must have been projected against the accumulator's canvas.
    pub fn new(
        acc: RgbaFrame,
        cursors: Vec<LayerCursor>,
        opts: SequencerOpts,
    ) -> PaintreelResult<Self> {
        if opts.batch_size == 0 {
            return Err(PaintreelError::validation("batch_size must be >= 1"));
        }
        let canvas = acc.canvas();
        if let Some(c) = cursors.iter().find(|c| !c.fits(canvas)) {
            return Err(PaintreelError::validation(format!(
                "layer '{}' has points outside the {}x{} accumulator",
                c.name(),
                canvas.width,
                canvas.height
            )));
        }
        Ok(Self {
            cursors,
            acc,
            opts,
            stats: ExportStats::default(),
        })
    }

    pub fn any_active(&self) -> bool {
        self.cursors.iter().any(LayerCursor::is_active)
    }

    pub fn stats(&self) -> ExportStats {
        self.stats
    }

    /// Current accumulator contents.
    pub fn frame(&self) -> &RgbaFrame {
        &self.acc
    }

    pub fn into_frame(self) -> RgbaFrame {
        self.acc
    }

    /// Consume points until `batch_size` effective changes are applied or no cursor can
    /// produce anything more. Returns the number of effective changes applied.
    pub fn fill_batch(&mut self) -> usize {
        let quota = self.opts.batch_size;
        let mut applied = 0;

        while applied < quota && self.any_active() {
            let mut progressed = false;
            for cursor in &mut self.cursors {
                if applied >= quota {
                    break;
                }
                let Some(p) = cursor.next_point() else {
                    continue;
                };
                progressed = true;
                self.stats.points_consumed += 1;

                if self.acc.paint(p) {
                    applied += 1;
                    self.stats.pixels_changed += 1;
                } else {
                    self.stats.noops_skipped += 1;
                }
            }
            if !progressed {
                break;
            }
        }
        applied
    }

    /// Drive every cursor to exhaustion, pushing one snapshot per non-empty batch.
    ///
    /// The run stops without a trailing snapshot as soon as a batch applies nothing. A sink error
    /// aborts immediately; snapshots already pushed are not touched.
    #[tracing::instrument(skip(self, sink), fields(layers = self.cursors.len(), batch_size = self.opts.batch_size))]
    pub fn run(&mut self, sink: &mut dyn SnapshotSink) -> PaintreelResult<ExportStats> {
        sink.begin(SinkConfig {
            width: self.acc.width(),
            height: self.acc.height(),
            batch_size: self.opts.batch_size,
        })?;

        let mut index = SnapshotIndex::FIRST;
        while self.any_active() {
            let applied = self.fill_batch();
            if applied == 0 {
                break;
            }
            sink.push_snapshot(SnapshotMeta { index, applied }, &self.acc)?;
            self.stats.snapshots += 1;
            tracing::debug!(index = index.0, applied, "snapshot emitted");
            index = index.next();
        }

        sink.end()?;
        tracing::info!(
            snapshots = self.stats.snapshots,
            pixels_changed = self.stats.pixels_changed,
            noops_skipped = self.stats.noops_skipped,
            "export finished"
        );
        Ok(self.stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/sequencer.rs"]
mod tests;
