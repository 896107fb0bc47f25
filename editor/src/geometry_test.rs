#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::ElementKind;

fn geom(left: f64, top: f64, width: f64, height: f64) -> Geometry {
    Geometry::new(left, top, width, height)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Point / Geometry
// =============================================================

#[test]
fn point_delta_from() {
    assert_eq!(pt(30.0, 5.0).delta_from(pt(10.0, 20.0)), pt(20.0, -15.0));
}

#[test]
fn point_is_finite_rejects_nan_and_infinity() {
    assert!(pt(1.0, 2.0).is_finite());
    assert!(!pt(f64::NAN, 2.0).is_finite());
    assert!(!pt(1.0, f64::INFINITY).is_finite());
}

#[test]
fn geometry_contains_is_edge_inclusive() {
    let g = geom(10.0, 20.0, 100.0, 50.0);
    assert!(g.contains(pt(10.0, 20.0)));
    assert!(g.contains(pt(110.0, 70.0)));
    assert!(!g.contains(pt(9.9, 30.0)));
    assert!(!g.contains(pt(50.0, 70.1)));
}

#[test]
fn geometry_rounded_rounds_every_field() {
    let g = geom(10.4, 20.6, 99.5, 50.49).rounded();
    assert_eq!(g, geom(10.0, 21.0, 100.0, 50.0));
}

// =============================================================
// ResizeHandle
// =============================================================

#[test]
fn handle_edges_follow_name_letters() {
    assert!(ResizeHandle::Nw.moves_north() && ResizeHandle::Nw.moves_west());
    assert!(!ResizeHandle::Nw.moves_south() && !ResizeHandle::Nw.moves_east());
    assert!(ResizeHandle::E.moves_east());
    assert!(!ResizeHandle::E.moves_north() && !ResizeHandle::E.moves_south());
    assert!(ResizeHandle::Se.moves_south() && ResizeHandle::Se.moves_east());
}

#[test]
fn handle_parse_roundtrips_names() {
    for handle in ResizeHandle::ALL {
        assert_eq!(ResizeHandle::parse(handle.as_str()), Some(handle));
    }
    assert_eq!(ResizeHandle::parse("x"), None);
}

#[test]
fn handle_positions_sit_on_the_border() {
    let g = geom(10.0, 20.0, 100.0, 60.0);
    assert_eq!(ResizeHandle::Nw.position(&g), pt(10.0, 20.0));
    assert_eq!(ResizeHandle::N.position(&g), pt(60.0, 20.0));
    assert_eq!(ResizeHandle::E.position(&g), pt(110.0, 50.0));
    assert_eq!(ResizeHandle::Se.position(&g), pt(110.0, 80.0));
}

#[test]
fn handle_serde_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&ResizeHandle::Sw).unwrap(), "\"sw\"");
    let back: ResizeHandle = serde_json::from_str("\"ne\"").unwrap();
    assert_eq!(back, ResizeHandle::Ne);
}

#[test]
fn text_policy_exposes_only_horizontal_handles() {
    let policy = ElementKind::Text.policy();
    assert_eq!(policy.handles(), &[ResizeHandle::W, ResizeHandle::E]);
    assert!(!policy.allows(ResizeHandle::Se));
    assert_eq!(ElementKind::Image.policy().handles().len(), 8);
}

// =============================================================
// drag
// =============================================================

#[test]
fn drag_moves_by_delta() {
    let g = drag(&geom(50.0, 60.0, 100.0, 80.0), pt(10.0, -20.0));
    assert_eq!(g, geom(60.0, 40.0, 100.0, 80.0));
}

#[test]
fn drag_clamps_at_origin() {
    let g = drag(&geom(50.0, 60.0, 100.0, 80.0), pt(-500.0, -61.0));
    assert_eq!(g.left, 0.0);
    assert_eq!(g.top, 0.0);
}

#[test]
fn drag_has_no_upper_bound() {
    let g = drag(&geom(0.0, 0.0, 100.0, 80.0), pt(5000.0, 9000.0));
    assert_eq!(g.left, 5000.0);
    assert_eq!(g.top, 9000.0);
}

#[test]
fn drag_rounds_to_whole_pixels() {
    let g = drag(&geom(0.0, 0.0, 100.0, 80.0), pt(10.4, 10.6));
    assert_eq!(g.left, 10.0);
    assert_eq!(g.top, 11.0);
}

// =============================================================
// resize
// =============================================================

#[test]
fn resize_se_grows_both_dimensions() {
    let policy = ElementKind::Image.policy();
    let g = resize(&geom(50.0, 50.0, 400.0, 300.0), ResizeHandle::Se, pt(40.0, 20.0), &policy);
    assert_eq!(g, geom(50.0, 50.0, 440.0, 320.0));
}

#[test]
fn resize_nw_moves_origin_and_shrinks() {
    let policy = ElementKind::Shape.policy();
    let g = resize(&geom(10.0, 20.0, 100.0, 80.0), ResizeHandle::Nw, pt(20.0, 20.0), &policy);
    assert_eq!(g, geom(30.0, 40.0, 80.0, 60.0));
}

#[test]
fn resize_nw_past_opposite_edge_stops_at_minimum() {
    let policy = ElementKind::Image.policy();
    let g = resize(&geom(50.0, 50.0, 440.0, 320.0), ResizeHandle::Nw, pt(500.0, 500.0), &policy);
    assert_eq!(g.width, 30.0);
    assert_eq!(g.height, 30.0);
    // Right and bottom edges stay where they were.
    assert_eq!(g.right(), 490.0);
    assert_eq!(g.bottom(), 370.0);
}

#[test]
fn resize_w_never_pushes_left_negative() {
    let policy = ElementKind::Shape.policy();
    let g = resize(&geom(50.0, 0.0, 100.0, 100.0), ResizeHandle::W, pt(-200.0, 0.0), &policy);
    assert_eq!(g.left, 0.0);
    assert_eq!(g.width, 150.0);
}

#[test]
fn resize_n_never_pushes_top_negative() {
    let policy = ElementKind::Table.policy();
    let g = resize(&geom(0.0, 30.0, 400.0, 250.0), ResizeHandle::N, pt(0.0, -100.0), &policy);
    assert_eq!(g.top, 0.0);
    assert_eq!(g.height, 280.0);
}

#[test]
fn resize_e_clamps_to_min_width() {
    let policy = ElementKind::Table.policy();
    let g = resize(&geom(0.0, 0.0, 400.0, 250.0), ResizeHandle::E, pt(-1000.0, 0.0), &policy);
    assert_eq!(g.width, 300.0);
    assert_eq!(g.height, 250.0);
}

#[test]
fn resize_s_clamps_to_min_height() {
    let policy = ElementKind::SignatureField.policy();
    let g = resize(&geom(0.0, 0.0, 200.0, 80.0), ResizeHandle::S, pt(0.0, -200.0), &policy);
    assert_eq!(g.height, 40.0);
}

#[test]
fn resize_text_ignores_vertical_component() {
    let policy = ElementKind::Text.policy();
    let g = resize(&geom(0.0, 10.0, 200.0, 40.0), ResizeHandle::E, pt(30.0, 90.0), &policy);
    assert_eq!(g, geom(0.0, 10.0, 230.0, 40.0));
}

#[test]
fn resize_text_w_clamps_to_min_width() {
    let policy = ElementKind::Text.policy();
    let g = resize(&geom(100.0, 0.0, 200.0, 40.0), ResizeHandle::W, pt(400.0, 0.0), &policy);
    assert_eq!(g.width, 50.0);
    assert_eq!(g.left, 250.0);
}

#[test]
fn resize_keeps_invariants_over_a_sweep() {
    for kind in ElementKind::Z_ORDER {
        let policy = kind.policy();
        let orig = geom(40.0, 40.0, 400.0, 300.0);
        for handle in policy.handles() {
            for dx in [-900.0, -45.5, 0.0, 33.3, 900.0] {
                for dy in [-900.0, -12.7, 0.0, 61.9, 900.0] {
                    let g = resize(&orig, *handle, pt(dx, dy), &policy);
                    assert!(policy.admits(&g), "{kind:?} {handle:?} ({dx},{dy}) -> {g:?}");
                }
            }
        }
    }
}
