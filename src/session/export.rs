use std::path::{Path, PathBuf};

use crate::foundation::error::{PaintreelError, PaintreelResult};
use crate::layer::cursor::{LayerCursor, PointShuffler, SeededShuffler};
use crate::layer::projector::{Layer, ProjectedLayer, project_layer};
use crate::render::frame::RgbaFrame;
use crate::sequence::sequencer::{ExportStats, SequencerOpts, SnapshotSequencer};
use crate::sequence::sink::{PngDirSink, SnapshotSink};
use crate::session::job::JobConfig;

/// Outcome of a finished export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportReport {
    pub stats: ExportStats,
    /// Seed that shuffled the by-color groups. Feed it back to reproduce the run.
    pub seed: u64,
}

/// A background plus projected layers, ready to export or preview.
///
/// Projection happens once in [`ExportSession::new`]; layers that end up with no in-bounds
/// points are dropped from the round-robin set there.
#[derive(Clone, Debug)]
pub struct ExportSession {
    background: RgbaFrame,
    layers: Vec<ProjectedLayer>,
    opts: SequencerOpts,
}

impl ExportSession {
    /// Project `layers` onto the background's canvas.
    ///
    /// Fails with [`PaintreelError::EmptyInput`] when no layer has a single in-bounds point.
    pub fn new(background: RgbaFrame, layers: &[Layer], opts: SequencerOpts) -> PaintreelResult<Self> {
        if opts.batch_size == 0 {
            return Err(PaintreelError::validation("batch_size must be >= 1"));
        }
        let canvas = background.canvas();
        let mut projected = Vec::with_capacity(layers.len());
        for layer in layers {
            let p = project_layer(layer, canvas);
            if p.is_empty() {
                tracing::debug!(layer = %layer.name, "layer has no in-bounds points, skipping");
                continue;
            }
            projected.push(p);
        }
        if projected.is_empty() {
            return Err(PaintreelError::empty_input(format!(
                "none of {} layer(s) has points inside the {}x{} canvas",
                layers.len(),
                canvas.width,
                canvas.height
            )));
        }
        Ok(Self {
            background,
            layers: projected,
            opts,
        })
    }

    /// Layers taking part in the run, in registration order.
    pub fn layers(&self) -> &[ProjectedLayer] {
        &self.layers
    }

    pub fn background(&self) -> &RgbaFrame {
        &self.background
    }

    fn cursors(&self, shuffler: &mut dyn PointShuffler) -> Vec<LayerCursor> {
        self.layers
            .iter()
            .map(|l| LayerCursor::new(l.clone(), shuffler))
            .collect()
    }

    /// Run the export into `sink`, shuffling by-color groups with `shuffler`.
    pub fn run(
        &self,
        shuffler: &mut dyn PointShuffler,
        sink: &mut dyn SnapshotSink,
    ) -> PaintreelResult<ExportStats> {
        let cursors = self.cursors(shuffler);
        let mut seq = SnapshotSequencer::new(self.background.clone(), cursors, self.opts)?;
        seq.run(sink)
    }

    /// Composite every layer at once: layer by layer, each drained in its own order.
    ///
    /// Returns the composited frame and the number of points drawn.
    pub fn preview(&self, shuffler: &mut dyn PointShuffler) -> (RgbaFrame, u64) {
        let mut frame = self.background.clone();
        let mut drawn = 0u64;
        for mut cursor in self.cursors(shuffler) {
            while let Some(p) = cursor.next_point() {
                frame.put_pixel(p.x, p.y, p.color);
                drawn += 1;
            }
        }
        (frame, drawn)
    }
}

/// A job file resolved against its directory.
#[derive(Clone, Debug)]
pub struct ExportJob {
    pub config: JobConfig,
    /// Directory relative paths in `config` resolve against.
    pub root: PathBuf,
}

impl ExportJob {
    pub fn load(path: &Path) -> PaintreelResult<Self> {
        let config = JobConfig::from_path(path)?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self { config, root })
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.join(&self.config.out_dir)
    }

    /// Load the background and point files and project every layer.
    pub fn session(&self) -> PaintreelResult<ExportSession> {
        let background = RgbaFrame::load(&self.root.join(&self.config.background))?;
        let layers = self.config.resolve_layers(&self.root)?;
        ExportSession::new(
            background,
            &layers,
            SequencerOpts {
                batch_size: self.config.batch_size,
            },
        )
    }

    fn shuffler(&self) -> SeededShuffler {
        match self.config.seed {
            Some(seed) => SeededShuffler::new(seed),
            None => SeededShuffler::from_entropy(),
        }
    }

    /// Export PNG snapshots into the configured directory.
    #[tracing::instrument(skip(self), fields(out_dir = %self.out_dir().display()))]
    pub fn export(&self) -> PaintreelResult<ExportReport> {
        let session = self.session()?;
        let mut shuffler = self.shuffler();
        tracing::info!(
            layers = session.layers().len(),
            seed = shuffler.seed(),
            batch_size = self.config.batch_size,
            "starting export"
        );
        let mut sink = PngDirSink::with_prefix(self.out_dir(), self.config.snapshot_prefix.clone());
        let stats = session.run(&mut shuffler, &mut sink)?;
        Ok(ExportReport {
            stats,
            seed: shuffler.seed(),
        })
    }

    /// Composite every layer in one pass and write the result as PNG.
    pub fn preview_to(&self, out: &Path) -> PaintreelResult<u64> {
        let session = self.session()?;
        let mut shuffler = self.shuffler();
        let (frame, drawn) = session.preview(&mut shuffler);
        frame.save_png(out)?;
        tracing::info!(path = %out.display(), drawn, "wrote preview");
        Ok(drawn)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/export.rs"]
mod tests;
