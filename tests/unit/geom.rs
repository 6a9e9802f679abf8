use super::*;

#[test]
fn rect_intersect_overlapping() {
    let a = Rect::from_ltrb(0.0, 0.0, 10.0, 10.0);
    let b = Rect::from_ltrb(5.0, -2.0, 15.0, 7.0);
    let r = Rect::intersect(a, b).unwrap();
    assert_eq!(r, Rect::from_ltrb(5.0, 0.0, 10.0, 7.0));
}

#[test]
fn rect_intersect_disjoint_is_none() {
    let a = Rect::from_ltrb(0.0, 0.0, 4.0, 4.0);
    let b = Rect::from_ltrb(4.0, 0.0, 8.0, 4.0);
    assert!(Rect::intersect(a, b).is_none());
}

#[test]
fn rect_round_goes_to_nearest_edge() {
    let r = Rect::from_ltrb(0.4, 0.5, 3.4, 3.6);
    assert_eq!(r.round(), IRect::from_ltrb(0, 1, 3, 4));
}

#[test]
fn rect_quad_order_is_tl_tr_br_bl() {
    let q = Rect::from_ltrb(1.0, 2.0, 3.0, 4.0).to_quad();
    assert_eq!(q[0], Point::new(1.0, 2.0));
    assert_eq!(q[1], Point::new(3.0, 2.0));
    assert_eq!(q[2], Point::new(3.0, 4.0));
    assert_eq!(q[3], Point::new(1.0, 4.0));
}

#[test]
fn contains_is_half_open() {
    let r = Rect::from_ltrb(0.0, 0.0, 2.0, 2.0);
    assert!(r.contains(0.0, 0.0));
    assert!(r.contains(1.999, 1.999));
    assert!(!r.contains(2.0, 0.0));
    assert!(!r.contains(0.0, 2.0));

    let ir = IRect::from_wh(2, 2);
    assert!(ir.contains(0, 0));
    assert!(ir.contains(1, 1));
    assert!(!ir.contains(2, 0));
    assert!(!ir.contains(0, 2));
}

#[test]
fn empty_rects_report_empty() {
    assert!(Rect::from_ltrb(3.0, 0.0, 3.0, 5.0).is_empty());
    assert!(Rect::from_ltrb(0.0, 5.0, 3.0, 2.0).is_empty());
    assert!(IRect::from_ltrb(2, 2, 2, 8).is_empty());
    assert!(!Rect::from_wh(1.0, 1.0).is_empty());
}

#[test]
fn irect_dimensions_clamp_when_inverted() {
    let r = IRect::from_ltrb(5, 5, 2, 2);
    assert_eq!(r.width(), 0);
    assert_eq!(r.height(), 0);
}
