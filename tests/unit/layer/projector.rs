use super::*;
use crate::foundation::core::Rgba8;
use crate::source::points::ColorGroup;

const RED: Rgba8 = Rgba8::opaque(255, 0, 0);
const BLUE: Rgba8 = Rgba8::opaque(0, 0, 255);

fn canvas() -> Canvas {
    Canvas::new(4, 3).unwrap()
}

fn two_color_source() -> PointSource {
    PointSource::from_groups(vec![
        ColorGroup {
            color: RED,
            cells: vec![Cell::new(1, 1), Cell::new(1, 4)],
        },
        ColorGroup {
            color: BLUE,
            cells: vec![Cell::new(3, 1)],
        },
    ])
}

#[test]
fn one_based_cells_map_to_zero_based_pixels() {
    let layer = Layer::new("a", two_color_source());
    let p = project_layer(&layer, canvas());
    let xy: Vec<(u32, u32)> = p.points.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(xy, vec![(0, 0), (3, 0), (0, 2)]);
    assert_eq!(p.points[2].color, BLUE);
}

#[test]
fn origin_offsets_and_drops_off_canvas_points() {
    let layer = Layer::new("a", two_color_source()).with_origin(1, 0);
    let p = project_layer(&layer, canvas());
    let xy: Vec<(u32, u32)> = p.points.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(xy, vec![(1, 0), (1, 2)]);
    assert_eq!(p.groups.len(), 2);
    assert_eq!(p.groups[0].points.len(), 1);
}

#[test]
fn negative_origin_can_pull_points_onto_canvas() {
    let src = PointSource::from_groups(vec![ColorGroup {
        color: RED,
        cells: vec![Cell::new(5, 5), Cell::new(1, 1)],
    }]);
    let layer = Layer::new("a", src).with_origin(-3, -2);
    let p = project_layer(&layer, canvas());
    let xy: Vec<(u32, u32)> = p.points.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(xy, vec![(1, 2)]);
}

#[test]
fn groups_emptied_by_clipping_are_removed() {
    let layer = Layer::new("a", two_color_source())
        .with_origin(0, -2)
        .with_policy(LayerPolicy::ByColor);
    let p = project_layer(&layer, canvas());
    assert_eq!(p.groups.len(), 1);
    assert_eq!(p.groups[0].points[0].color, BLUE);
    assert_eq!(p.point_count(), 1);
}

#[test]
fn fully_off_canvas_layer_is_empty() {
    for policy in [LayerPolicy::Ordered, LayerPolicy::ByColor] {
        let layer = Layer::new("a", two_color_source())
            .with_origin(100, 100)
            .with_policy(policy);
        assert!(project_layer(&layer, canvas()).is_empty());
    }
}

#[test]
fn layer_without_source_is_empty() {
    let p = project_layer(&Layer::inert("missing"), canvas());
    assert!(p.is_empty());
    assert_eq!(p.point_count(), 0);
}

#[test]
fn extreme_origins_project_off_canvas_without_overflow() {
    let src = PointSource::from_groups(vec![ColorGroup {
        color: RED,
        cells: vec![Cell::new(1, 2), Cell::new(0, 0), Cell::new(3, 1)],
    }]);
    for (x, y) in [(i64::MAX, 0), (0, i64::MAX), (i64::MIN, 0), (0, i64::MIN)] {
        for policy in [LayerPolicy::Ordered, LayerPolicy::ByColor] {
            let layer = Layer::new("far", src.clone())
                .with_origin(x, y)
                .with_policy(policy);
            assert!(project_layer(&layer, canvas()).is_empty());
        }
    }
    assert_eq!(
        project_cell(Origin::new(i64::MIN, 0), Cell::new(1, 0), canvas()),
        None
    );
    assert_eq!(
        project_cell(Origin::new(i64::MAX, i64::MAX), Cell::new(u32::MAX, u32::MAX), canvas()),
        None
    );
}
