use std::collections::VecDeque;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::foundation::core::{Canvas, PaintPoint};
use crate::layer::projector::{GroupRotation, LayerPolicy, ProjectedGroup, ProjectedLayer};

/// Source of the one-time permutation applied to each color group.
pub trait PointShuffler {
    /// Permute `points` in place.
    fn shuffle(&mut self, points: &mut [PaintPoint]);
}

/// Uniform shuffle driven by a seeded [`StdRng`].
#[derive(Clone, Debug)]
pub struct SeededShuffler {
    seed: u64,
    rng: StdRng,
}

impl SeededShuffler {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed drawn from the thread RNG. Record [`SeededShuffler::seed`] to replay the run.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl PointShuffler for SeededShuffler {
    fn shuffle(&mut self, points: &mut [PaintPoint]) {
        points.shuffle(&mut self.rng);
    }
}

/// Leaves every group in file order.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeepOrder;

impl PointShuffler for KeepOrder {
    fn shuffle(&mut self, _points: &mut [PaintPoint]) {}
}

/// A color group being drawn from, with its read position.
#[derive(Clone, Debug)]
struct GroupCursor {
    points: Vec<PaintPoint>,
    idx: usize,
}

#[derive(Clone, Debug)]
enum CursorState {
    Ordered {
        points: Vec<PaintPoint>,
        idx: usize,
    },
    ByColor {
        /// Undrained groups; the front is the group the pointer is on.
        queue: VecDeque<GroupCursor>,
        rotation: GroupRotation,
        remaining: usize,
    },
    Exhausted,
}

/// Per-layer traversal state: hands out the layer's points one at a time.
///
/// Once [`LayerCursor::next_point`] returns `None` the cursor is exhausted for good and keeps
/// returning `None`.
#[derive(Clone, Debug)]
pub struct LayerCursor {
    name: String,
    state: CursorState,
}

impl LayerCursor {
    /// Build a cursor, shuffling each color group once for [`LayerPolicy::ByColor`].
    pub fn new(layer: ProjectedLayer, shuffler: &mut dyn PointShuffler) -> Self {
        let state = if layer.is_empty() {
            CursorState::Exhausted
        } else {
            match layer.policy {
                LayerPolicy::Ordered => CursorState::Ordered {
                    points: layer.points,
                    idx: 0,
                },
                LayerPolicy::ByColor => {
                    let queue: VecDeque<GroupCursor> = layer
                        .groups
                        .into_iter()
                        .filter(|g| !g.points.is_empty())
                        .map(|ProjectedGroup { mut points }| {
                            shuffler.shuffle(&mut points);
                            GroupCursor { points, idx: 0 }
                        })
                        .collect();
                    CursorState::ByColor {
                        remaining: queue.iter().map(|g| g.points.len()).sum(),
                        queue,
                        rotation: layer.rotation,
                    }
                }
            }
        };
        Self {
            name: layer.name,
            state,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Next point to apply, or `None` once every point has been handed out.
    pub fn next_point(&mut self) -> Option<PaintPoint> {
        let next = match &mut self.state {
            CursorState::Ordered { points, idx } => {
                let p = points.get(*idx).copied();
                if p.is_some() {
                    *idx += 1;
                }
                p
            }
            CursorState::ByColor {
                queue,
                rotation,
                remaining,
            } => {
                let p = next_by_color(queue, *rotation);
                if p.is_some() {
                    *remaining -= 1;
                }
                p
            }
            CursorState::Exhausted => return None,
        };
        if next.is_none() {
            tracing::debug!(layer = %self.name, "layer exhausted");
            self.state = CursorState::Exhausted;
        }
        next
    }

    /// `true` while at least one point remains unconsumed.
    pub fn is_active(&self) -> bool {
        self.remaining() > 0
    }

    pub fn remaining(&self) -> usize {
        match &self.state {
            CursorState::Ordered { points, idx } => points.len() - idx,
            CursorState::ByColor { remaining, .. } => *remaining,
            CursorState::Exhausted => 0,
        }
    }

    /// `true` when every point still to be handed out lies inside `canvas`.
    pub fn fits(&self, canvas: Canvas) -> bool {
        let inside = |p: &PaintPoint| p.x < canvas.width && p.y < canvas.height;
        match &self.state {
            CursorState::Ordered { points, idx } => points[*idx..].iter().all(inside),
            CursorState::ByColor { queue, .. } => {
                queue.iter().all(|g| g.points[g.idx..].iter().all(inside))
            }
            CursorState::Exhausted => true,
        }
    }
}

/// Draw from the front group. A drained group leaves the queue; under
/// [`GroupRotation::Interleave`] the front group also moves to the back after every drawn point.
fn next_by_color(queue: &mut VecDeque<GroupCursor>, rotation: GroupRotation) -> Option<PaintPoint> {
    let front = queue.front_mut()?;
    let p = *front.points.get(front.idx)?;
    front.idx += 1;
    if front.idx == front.points.len() {
        queue.pop_front();
    } else if rotation == GroupRotation::Interleave {
        queue.rotate_left(1);
    }
    Some(p)
}

#[cfg(test)]
#[path = "../../tests/unit/layer/cursor.rs"]
mod tests;
