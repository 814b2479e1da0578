use super::*;
use kurbo::PathEl;

#[test]
fn fewer_than_three_points_build_nothing() {
    assert!(contour_path(&[]).elements().is_empty());
    assert!(contour_path(&[Point::new(0.0, 0.0)]).elements().is_empty());
    assert!(
        contour_path(&[Point::new(0.0, 0.0), Point::new(4.0, 0.0)])
            .elements()
            .is_empty()
    );
}

#[test]
fn polygon_becomes_a_closed_path() {
    let square = [
        Point::new(1.0, 1.0),
        Point::new(5.0, 1.0),
        Point::new(5.0, 5.0),
        Point::new(1.0, 5.0),
    ];
    let path = contour_path(&square);
    let els = path.elements();
    assert_eq!(els.len(), 5);
    assert_eq!(els[0], PathEl::MoveTo(square[0]));
    assert_eq!(els[4], PathEl::ClosePath);
    assert!(matches!(els[1], PathEl::LineTo(p) if p == square[1]));
}
