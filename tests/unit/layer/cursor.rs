use super::*;
use crate::foundation::core::Rgba8;

const A: Rgba8 = Rgba8::opaque(200, 0, 0);
const B: Rgba8 = Rgba8::opaque(0, 200, 0);

fn pt(x: u32, color: Rgba8) -> PaintPoint {
    PaintPoint { x, y: 0, color }
}

fn ordered(points: Vec<PaintPoint>) -> ProjectedLayer {
    ProjectedLayer {
        name: "ordered".to_string(),
        policy: LayerPolicy::Ordered,
        rotation: GroupRotation::Sticky,
        points,
        groups: vec![],
    }
}

fn by_color(rotation: GroupRotation) -> ProjectedLayer {
    let a: Vec<PaintPoint> = (1..=3).map(|x| pt(x, A)).collect();
    let b: Vec<PaintPoint> = (11..=12).map(|x| pt(x, B)).collect();
    ProjectedLayer {
        name: "by_color".to_string(),
        policy: LayerPolicy::ByColor,
        rotation,
        points: a.iter().chain(b.iter()).copied().collect(),
        groups: vec![ProjectedGroup { points: a }, ProjectedGroup { points: b }],
    }
}

fn drain(cursor: &mut LayerCursor) -> Vec<u32> {
    std::iter::from_fn(|| cursor.next_point()).map(|p| p.x).collect()
}

struct Reverse;

impl PointShuffler for Reverse {
    fn shuffle(&mut self, points: &mut [PaintPoint]) {
        points.reverse();
    }
}

#[test]
fn ordered_yields_exact_file_order() {
    let points: Vec<PaintPoint> = [5, 1, 4, 1, 3].iter().map(|&x| pt(x, A)).collect();
    let mut c = LayerCursor::new(ordered(points), &mut Reverse);
    assert_eq!(drain(&mut c), vec![5, 1, 4, 1, 3]);
}

#[test]
fn exhaustion_is_terminal_and_idempotent() {
    let mut c = LayerCursor::new(ordered(vec![pt(0, A)]), &mut KeepOrder);
    assert!(c.is_active());
    assert!(c.next_point().is_some());
    assert!(!c.is_active());
    for _ in 0..3 {
        assert_eq!(c.next_point(), None);
    }
    assert_eq!(c.remaining(), 0);
}

#[test]
fn sticky_rotation_drains_each_group_before_moving_on() {
    let mut c = LayerCursor::new(by_color(GroupRotation::Sticky), &mut KeepOrder);
    assert_eq!(c.remaining(), 5);
    assert_eq!(drain(&mut c), vec![1, 2, 3, 11, 12]);
    assert_eq!(c.next_point(), None);
}

#[test]
fn interleave_rotation_alternates_groups_and_skips_drained_ones() {
    let mut c = LayerCursor::new(by_color(GroupRotation::Interleave), &mut KeepOrder);
    assert_eq!(drain(&mut c), vec![1, 11, 2, 12, 3]);
    assert!(!c.is_active());
}

#[test]
fn injected_shuffler_permutes_within_groups_only() {
    let mut c = LayerCursor::new(by_color(GroupRotation::Sticky), &mut Reverse);
    assert_eq!(drain(&mut c), vec![3, 2, 1, 12, 11]);
}

#[test]
fn ordered_policy_never_shuffles() {
    let points: Vec<PaintPoint> = (0..4).map(|x| pt(x, A)).collect();
    let mut c = LayerCursor::new(ordered(points), &mut SeededShuffler::new(3));
    assert_eq!(drain(&mut c), vec![0, 1, 2, 3]);
}

#[test]
fn seeded_shuffle_is_a_reproducible_permutation() {
    let run = |seed| {
        let mut c = LayerCursor::new(by_color(GroupRotation::Sticky), &mut SeededShuffler::new(seed));
        drain(&mut c)
    };
    let first = run(42);
    assert_eq!(first, run(42));

    let mut a_part = first[..3].to_vec();
    a_part.sort_unstable();
    assert_eq!(a_part, vec![1, 2, 3]);
    let mut b_part = first[3..].to_vec();
    b_part.sort_unstable();
    assert_eq!(b_part, vec![11, 12]);
}

#[test]
fn seeded_shuffler_reports_its_seed() {
    assert_eq!(SeededShuffler::new(7).seed(), 7);
    let s = SeededShuffler::from_entropy();
    assert_eq!(SeededShuffler::new(s.seed()).seed(), s.seed());
}

#[test]
fn empty_layer_starts_exhausted() {
    let mut c = LayerCursor::new(ordered(vec![]), &mut KeepOrder);
    assert!(!c.is_active());
    assert_eq!(c.next_point(), None);
    assert_eq!(c.name(), "ordered");
}

#[test]
fn remaining_counts_down_with_every_point() {
    for rotation in [GroupRotation::Sticky, GroupRotation::Interleave] {
        let mut c = LayerCursor::new(by_color(rotation), &mut KeepOrder);
        for left in (0..5).rev() {
            assert!(c.next_point().is_some());
            assert_eq!(c.remaining(), left);
            assert_eq!(c.is_active(), left > 0);
        }
        assert_eq!(c.next_point(), None);
        assert_eq!(c.remaining(), 0);
    }

    let mut c = LayerCursor::new(ordered((0..3).map(|x| pt(x, A)).collect()), &mut KeepOrder);
    for left in (0..3).rev() {
        c.next_point();
        assert_eq!(c.remaining(), left);
    }
}

#[test]
fn many_small_groups_drain_in_group_order() {
    let groups: Vec<ProjectedGroup> = (0..20_000u32)
        .map(|g| ProjectedGroup {
            points: (0..5).map(|i| pt(g * 5 + i, A)).collect(),
        })
        .collect();
    let layer = ProjectedLayer {
        name: "photo".to_string(),
        policy: LayerPolicy::ByColor,
        rotation: GroupRotation::Sticky,
        points: vec![],
        groups,
    };
    let mut c = LayerCursor::new(layer, &mut KeepOrder);
    assert_eq!(c.remaining(), 100_000);
    let xs = drain(&mut c);
    assert_eq!(xs.len(), 100_000);
    assert!(xs.windows(2).all(|w| w[0] + 1 == w[1]));
}

#[test]
fn interleave_keeps_cycling_over_the_groups_still_live() {
    let layer = ProjectedLayer {
        name: "three".to_string(),
        policy: LayerPolicy::ByColor,
        rotation: GroupRotation::Interleave,
        points: vec![],
        groups: vec![
            ProjectedGroup { points: vec![pt(1, A)] },
            ProjectedGroup { points: vec![pt(11, B), pt(12, B), pt(13, B)] },
            ProjectedGroup { points: vec![pt(21, A), pt(22, A)] },
        ],
    };
    let mut c = LayerCursor::new(layer, &mut KeepOrder);
    assert_eq!(drain(&mut c), vec![1, 11, 21, 12, 22, 13]);
}

#[test]
fn fits_checks_the_points_still_to_come() {
    let canvas = Canvas::new(4, 1).unwrap();
    let mut c = LayerCursor::new(ordered(vec![pt(9, A), pt(2, A)]), &mut KeepOrder);
    assert!(!c.fits(canvas));
    c.next_point();
    assert!(c.fits(canvas));
    let c = LayerCursor::new(by_color(GroupRotation::Sticky), &mut KeepOrder);
    assert!(!c.fits(canvas));
    assert!(c.fits(Canvas::new(13, 1).unwrap()));
}
