//! paintreel composites ordered pixel-paint layers onto a background image and records the
//! process as a numbered sequence of PNG snapshots.
//!
//! # Pipeline overview
//!
//! 1. **Load**: point files (`#RRGGBB <count> (row,col) ...`) become [`PointSource`]s.
//! 2. **Project**: each [`Layer`] is mapped onto the canvas once, off-canvas points dropped.
//! 3. **Traverse**: a [`LayerCursor`] per layer hands out points in file order or color by color.
//! 4. **Sequence**: the [`SnapshotSequencer`] round-robins the cursors into an accumulator frame
//!    and pushes a snapshot to a [`SnapshotSink`] every `batch_size` effective pixel changes.
//!
//! Writes are opaque overwrites. A write that leaves a pixel unchanged is consumed but does not
//! count toward a batch.
#![forbid(unsafe_code)]

mod foundation;
mod layer;
mod render;
mod sequence;
mod session;
mod source;

pub use foundation::core::{Canvas, Origin, PaintPoint, Rgba8, SnapshotIndex};
pub use foundation::error::{PaintreelError, PaintreelResult};
pub use layer::cursor::{KeepOrder, LayerCursor, PointShuffler, SeededShuffler};
pub use layer::projector::{
    GroupRotation, Layer, LayerPolicy, ProjectedGroup, ProjectedLayer, project_cell, project_layer,
};
pub use render::frame::RgbaFrame;
pub use sequence::sequencer::{DEFAULT_BATCH_SIZE, ExportStats, SequencerOpts, SnapshotSequencer};
pub use sequence::sink::{
    DEFAULT_SNAPSHOT_PREFIX, InMemorySink, PngDirSink, SinkConfig, SnapshotMeta, SnapshotSink,
};
pub use session::export::{ExportJob, ExportReport, ExportSession};
pub use session::job::{CoordValue, JobConfig, LayerConfig};
pub use source::extract::{
    HexGridOpts, extract_point_source, extract_point_source_from_path, hex_grid, hex_grid_json,
};
pub use source::points::{Cell, ColorGroup, PointSource, SourcePoint};
