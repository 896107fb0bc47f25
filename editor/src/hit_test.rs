use uuid::Uuid;

use super::*;
use crate::doc::Element;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn add(section: &mut Section, element: Element, g: Geometry) -> ElementRef {
    let mut element = element;
    match &mut element {
        Element::Text(e) => e.geometry = g,
        Element::Image(e) => e.geometry = g,
        Element::Shape(e) => e.geometry = g,
        Element::Table(e) => e.geometry = g,
        Element::SignatureField(e) => e.geometry = g,
    }
    let target = ElementRef::new(section.id, element.kind(), element.id());
    section.push_element(element);
    target
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn miss_returns_none() {
    let mut section = Section::new("S");
    add(&mut section, Element::shape("#000"), Geometry::new(10.0, 10.0, 50.0, 50.0));
    assert_eq!(hit_test(pt(200.0, 200.0), &section, None), None);
}

#[test]
fn topmost_layer_wins() {
    let mut section = Section::new("S");
    add(&mut section, Element::image("a.png"), Geometry::new(0.0, 0.0, 100.0, 100.0));
    let text = add(&mut section, Element::text("t"), Geometry::new(0.0, 0.0, 100.0, 40.0));
    let hit = hit_test(pt(20.0, 20.0), &section, None).unwrap();
    assert_eq!(hit, Hit { element: text, part: HitPart::Body });
}

#[test]
fn selected_element_is_tested_first() {
    let mut section = Section::new("S");
    let image = add(&mut section, Element::image("a.png"), Geometry::new(0.0, 0.0, 100.0, 100.0));
    add(&mut section, Element::shape("#000"), Geometry::new(0.0, 0.0, 100.0, 100.0));
    let hit = hit_test(pt(50.0, 50.0), &section, Some(image)).unwrap();
    assert_eq!(hit.element, image);
}

#[test]
fn handles_only_on_selected_element() {
    let mut section = Section::new("S");
    let shape = add(&mut section, Element::shape("#000"), Geometry::new(10.0, 10.0, 100.0, 100.0));
    assert_eq!(hit_test(pt(110.0, 110.0), &section, None).unwrap().part, HitPart::Body);
    assert_eq!(
        hit_test(pt(110.0, 110.0), &section, Some(shape)).unwrap().part,
        HitPart::ResizeHandle(ResizeHandle::Se)
    );
}

#[test]
fn handle_slop_reaches_outside_the_box() {
    let mut section = Section::new("S");
    let shape = add(&mut section, Element::shape("#000"), Geometry::new(10.0, 10.0, 100.0, 100.0));
    let hit = hit_test(pt(115.0, 60.0), &section, Some(shape)).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle(ResizeHandle::E));
    assert_eq!(hit_test(pt(117.0, 60.0), &section, Some(shape)), None);
}

#[test]
fn selection_from_another_section_is_ignored() {
    let mut section = Section::new("S");
    add(&mut section, Element::shape("#000"), Geometry::new(10.0, 10.0, 100.0, 100.0));
    let foreign = ElementRef::new(Uuid::new_v4(), ElementKind::Shape, Uuid::new_v4());
    assert_eq!(hit_test(pt(50.0, 50.0), &section, Some(foreign)).unwrap().part, HitPart::Body);
}

#[test]
fn non_finite_point_never_hits() {
    let mut section = Section::new("S");
    add(&mut section, Element::shape("#000"), Geometry::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(hit_test(pt(f64::NAN, 10.0), &section, None), None);
}

// =============================================================
// handle_at
// =============================================================

#[test]
fn text_has_no_corner_handles() {
    let g = Geometry::new(0.0, 0.0, 200.0, 40.0);
    assert_eq!(handle_at(pt(200.0, 40.0), &g, ElementKind::Text), None);
    assert_eq!(handle_at(pt(200.0, 20.0), &g, ElementKind::Text), Some(ResizeHandle::E));
    assert_eq!(handle_at(pt(0.0, 22.0), &g, ElementKind::Text), Some(ResizeHandle::W));
}

// =============================================================
// Table cells
// =============================================================

#[test]
fn table_cell_interior_is_interactive() {
    let mut section = Section::new("S");
    add(&mut section, Element::table(2, 2), Geometry::new(0.0, 0.0, 400.0, 200.0));
    assert_eq!(hit_test(pt(300.0, 150.0), &section, None).unwrap().part, HitPart::Interactive);
}

#[test]
fn table_cell_border_is_body() {
    let mut section = Section::new("S");
    add(&mut section, Element::table(2, 2), Geometry::new(0.0, 0.0, 400.0, 200.0));
    assert_eq!(hit_test(pt(200.0, 50.0), &section, None).unwrap().part, HitPart::Body);
    assert_eq!(hit_test(pt(2.0, 50.0), &section, None).unwrap().part, HitPart::Body);
}

#[test]
fn table_cell_at_maps_rows_and_columns() {
    let mut section = Section::new("S");
    let target = add(&mut section, Element::table(2, 4), Geometry::new(10.0, 20.0, 400.0, 200.0));
    let table = section.table(target.id).unwrap();
    assert_eq!(table_cell_at(pt(60.0, 70.0), table), Some((0, 0)));
    assert_eq!(table_cell_at(pt(360.0, 170.0), table), Some((1, 3)));
    assert_eq!(table_cell_at(pt(5.0, 70.0), table), None);
}
