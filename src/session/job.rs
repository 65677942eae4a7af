use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::Origin;
use crate::foundation::error::{PaintreelError, PaintreelResult};
use crate::layer::projector::{GroupRotation, Layer, LayerPolicy};
use crate::sequence::sequencer::DEFAULT_BATCH_SIZE;
use crate::sequence::sink::DEFAULT_SNAPSHOT_PREFIX;
use crate::source::points::PointSource;

/// Layer origin coordinate as written in a job file: a number, or text holding a number.
///
/// Any other JSON value is kept as [`CoordValue::Other`] so that only its layer fails to
/// resolve, not the whole job.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CoordValue {
    Int(i64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for CoordValue {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl CoordValue {
    pub fn resolve(&self, axis: &str) -> PaintreelResult<i64> {
        match self {
            Self::Int(v) => Ok(*v),
            Self::Text(s) => s.trim().parse().map_err(|_| {
                PaintreelError::configuration(format!("origin {axis} '{s}' is not an integer"))
            }),
            Self::Other(v) => Err(PaintreelError::configuration(format!(
                "origin {axis} {v} is not an integer"
            ))),
        }
    }
}

fn default_ordered() -> bool {
    true
}

/// One layer entry of a job file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
    /// Display name; defaults to `layer<N>` (1-based).
    #[serde(default)]
    pub name: Option<String>,
    /// Point file, relative to the job file.
    #[serde(default)]
    pub points: Option<PathBuf>,
    #[serde(default)]
    pub x: CoordValue,
    #[serde(default)]
    pub y: CoordValue,
    /// `true` keeps file order, `false` draws by color with shuffled groups.
    #[serde(default = "default_ordered")]
    pub ordered: bool,
    #[serde(default)]
    pub rotation: GroupRotation,
}

impl LayerConfig {
    pub fn policy(&self) -> LayerPolicy {
        if self.ordered {
            LayerPolicy::Ordered
        } else {
            LayerPolicy::ByColor
        }
    }

    /// Resolve origin and point source.
    ///
    /// Configuration problems come back as [`PaintreelError::Configuration`]; failing to read an
    /// attached point file is an IO error.
    pub fn resolve(&self, name: String, root: &Path) -> PaintreelResult<Layer> {
        let origin = Origin::new(self.x.resolve("x")?, self.y.resolve("y")?);
        let rel = self.points.as_ref().ok_or_else(|| {
            PaintreelError::configuration(format!("layer '{name}' has no point source"))
        })?;
        let source = PointSource::from_path(&root.join(rel))?;
        Ok(Layer {
            name,
            origin,
            policy: self.policy(),
            rotation: self.rotation,
            source: Some(source),
        })
    }
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_prefix() -> String {
    DEFAULT_SNAPSHOT_PREFIX.to_string()
}

/// An export job as stored on disk (JSON).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    /// Background raster, relative to the job file.
    pub background: PathBuf,
    /// Snapshot directory, relative to the job file.
    pub out_dir: PathBuf,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Shuffle seed. Drawn at random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_prefix")]
    pub snapshot_prefix: String,
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
}

impl JobConfig {
    pub fn from_json_str(s: &str) -> PaintreelResult<Self> {
        serde_json::from_str(s).map_err(|e| PaintreelError::serde(e.to_string()))
    }

    pub fn from_path(path: &Path) -> PaintreelResult<Self> {
        let f = File::open(path).map_err(|e| PaintreelError::io(path, e))?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| PaintreelError::serde(format!("{}: {e}", path.display())))
    }

    /// Resolve every layer against `root`.
    ///
    /// A layer with a configuration error is logged and replaced by an inert layer so the rest
    /// of the run proceeds. Any other error aborts.
    pub fn resolve_layers(&self, root: &Path) -> PaintreelResult<Vec<Layer>> {
        let mut out = Vec::with_capacity(self.layers.len());
        for (i, cfg) in self.layers.iter().enumerate() {
            let name = cfg.name.clone().unwrap_or_else(|| format!("layer{}", i + 1));
            match cfg.resolve(name.clone(), root) {
                Ok(layer) => out.push(layer),
                Err(err) if err.is_layer_local() => {
                    tracing::warn!(layer = %name, error = %err, "layer disabled");
                    out.push(Layer::inert(name));
                }
                Err(err) => return Err(err),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/job.rs"]
mod tests;
