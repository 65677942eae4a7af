use crate::foundation::core::{Canvas, Origin, PaintPoint};
use crate::source::points::{Cell, PointSource};

/// How a layer's points are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerPolicy {
    /// Exactly the file order.
    #[default]
    Ordered,
    /// Color group by color group, each group shuffled once up front.
    ByColor,
}

/// When the by-color cursor moves on to the next color group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupRotation {
    /// Stay on the current group until it is drained.
    #[default]
    Sticky,
    /// Move to the next group after every drawn point.
    Interleave,
}

/// One paint layer as configured by the caller, before projection.
///
/// `source == None` marks a layer with no point source attached; it projects to nothing.
#[derive(Clone, Debug, Default)]
pub struct Layer {
    pub name: String,
    pub origin: Origin,
    pub policy: LayerPolicy,
    pub rotation: GroupRotation,
    pub source: Option<PointSource>,
}

impl Layer {
    pub fn new(name: impl Into<String>, source: PointSource) -> Self {
        Self {
            name: name.into(),
            source: Some(source),
            ..Self::default()
        }
    }

    /// A layer that contributes nothing, e.g. after a configuration error.
    pub fn inert(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, x: i64, y: i64) -> Self {
        self.origin = Origin::new(x, y);
        self
    }

    pub fn with_policy(mut self, policy: LayerPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_rotation(mut self, rotation: GroupRotation) -> Self {
        self.rotation = rotation;
        self
    }
}

/// A color group in canvas space. Never empty after projection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectedGroup {
    pub points: Vec<PaintPoint>,
}

/// A layer mapped onto the canvas with off-canvas points removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectedLayer {
    pub name: String,
    pub policy: LayerPolicy,
    pub rotation: GroupRotation,
    /// File order, consulted by [`LayerPolicy::Ordered`].
    pub points: Vec<PaintPoint>,
    /// Color groups in first-appearance order, consulted by [`LayerPolicy::ByColor`].
    pub groups: Vec<ProjectedGroup>,
}

impl ProjectedLayer {
    /// `true` when the policy's point set is empty; such a layer never takes part in a run.
    pub fn is_empty(&self) -> bool {
        match self.policy {
            LayerPolicy::Ordered => self.points.is_empty(),
            LayerPolicy::ByColor => self.groups.is_empty(),
        }
    }

    pub fn point_count(&self) -> usize {
        match self.policy {
            LayerPolicy::Ordered => self.points.len(),
            LayerPolicy::ByColor => self.groups.iter().map(|g| g.points.len()).sum(),
        }
    }
}

/// Map a 1-based file cell to a canvas pixel: `x = x0 + col - 1`, `y = y0 + row - 1`.
///
/// A coordinate that does not fit in `i64` is off-canvas.
pub fn project_cell(origin: Origin, cell: Cell, canvas: Canvas) -> Option<(u32, u32)> {
    let x = origin.x.checked_add(i64::from(cell.col) - 1)?;
    let y = origin.y.checked_add(i64::from(cell.row) - 1)?;
    canvas.clip(x, y)
}

/// Project a layer onto a canvas once, up front.
///
/// Points outside `[0, W) x [0, H)` are dropped, as are color groups left with no points.
pub fn project_layer(layer: &Layer, canvas: Canvas) -> ProjectedLayer {
    let mut out = ProjectedLayer {
        name: layer.name.clone(),
        policy: layer.policy,
        rotation: layer.rotation,
        points: Vec::new(),
        groups: Vec::new(),
    };
    let Some(src) = &layer.source else {
        return out;
    };

    out.points = src
        .points
        .iter()
        .filter_map(|p| {
            let (x, y) = project_cell(layer.origin, p.cell, canvas)?;
            Some(PaintPoint { x, y, color: p.color })
        })
        .collect();

    out.groups = src
        .groups
        .iter()
        .filter_map(|g| {
            let points: Vec<PaintPoint> = g
                .cells
                .iter()
                .filter_map(|&cell| {
                    let (x, y) = project_cell(layer.origin, cell, canvas)?;
                    Some(PaintPoint {
                        x,
                        y,
                        color: g.color,
                    })
                })
                .collect();
            (!points.is_empty()).then_some(ProjectedGroup { points })
        })
        .collect();

    let dropped = src.points.len() - out.points.len();
    if dropped > 0 {
        tracing::debug!(layer = %layer.name, dropped, "dropped off-canvas points");
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layer/projector.rs"]
mod tests;
