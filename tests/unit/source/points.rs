use super::*;

const SAMPLE: &str = "3
#ff0000 2 (1,1) (1,2)
#00FF00 1 ( 2 , 3 )

#FF0000 1 (4,4)
garbage line
#0000FF 9 (5,6)
";

#[test]
fn points_keep_file_order_and_colors() {
    let src = PointSource::parse(SAMPLE);
    assert_eq!(src.declared_count, Some(3));
    let cells: Vec<(u32, u32)> = src.points.iter().map(|p| (p.cell.row, p.cell.col)).collect();
    assert_eq!(cells, vec![(1, 1), (1, 2), (2, 3), (4, 4), (5, 6)]);
    assert_eq!(src.points[0].color, Rgba8::opaque(255, 0, 0));
    assert_eq!(src.points[2].color, Rgba8::opaque(0, 255, 0));
    assert_eq!(src.points[3].color, Rgba8::opaque(255, 0, 0));
}

#[test]
fn groups_merge_repeated_colors_in_first_appearance_order() {
    let src = PointSource::parse(SAMPLE);
    let colors: Vec<String> = src.groups.iter().map(|g| g.color.to_hex()).collect();
    assert_eq!(colors, vec!["#FF0000", "#00FF00", "#0000FF"]);
    assert_eq!(
        src.groups[0].cells,
        vec![Cell::new(1, 1), Cell::new(1, 2), Cell::new(4, 4)]
    );
}

#[test]
fn declared_line_count_is_not_trusted() {
    let src = PointSource::parse(SAMPLE);
    assert_eq!(src.groups[2].cells, vec![Cell::new(5, 6)]);
}

#[test]
fn empty_and_header_only_inputs_yield_no_points() {
    assert!(PointSource::parse("").is_empty());
    assert!(PointSource::parse("\n\n  \n").is_empty());
    let header_only = PointSource::parse("0\n");
    assert!(header_only.is_empty());
    assert_eq!(header_only.declared_count, Some(0));
}

#[test]
fn malformed_coordinates_are_skipped_within_a_line() {
    let src = PointSource::parse("1\n#123456 3 (1,2) (x,3) (4,) (5,6)\n");
    let cells: Vec<Cell> = src.points.iter().map(|p| p.cell).collect();
    assert_eq!(cells, vec![Cell::new(1, 2), Cell::new(5, 6)]);
}

#[test]
fn count_must_follow_the_color() {
    let src = PointSource::parse("1\n#123456(1,2)\n#123456 x (1,2)\n");
    assert!(src.is_empty());
}

#[test]
fn text_output_parses_back_to_the_same_groups() {
    let src = PointSource::from_groups(vec![
        ColorGroup {
            color: Rgba8::opaque(1, 2, 3),
            cells: vec![Cell::new(1, 1), Cell::new(2, 2)],
        },
        ColorGroup {
            color: Rgba8::opaque(250, 251, 252),
            cells: vec![Cell::new(3, 4)],
        },
    ]);
    let text = src.to_text();
    assert!(text.starts_with("2\n#010203 2 (1,1) (2,2)\n"));
    assert_eq!(PointSource::parse(&text), src);
}

#[test]
fn missing_file_reports_path() {
    let err = PointSource::from_path(Path::new("definitely/not/here.txt")).unwrap_err();
    assert!(err.to_string().contains("here.txt"));
}
