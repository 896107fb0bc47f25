//! Hit-testing a section-relative point against a section's elements.
//!
//! The selected element is tested first, handles before body, so its
//! handles stay grabbable even where they overlap a neighbor. Remaining
//! elements are tested top-down in stacking order.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HANDLE_RADIUS_PX, TABLE_CELL_INSET_PX};
use crate::doc::{ElementKind, ElementRef, Section, TableBlock};
use crate::geometry::{Geometry, Point, ResizeHandle};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The element body; starts a drag.
    Body,
    /// A resize handle of the selected element.
    ResizeHandle(ResizeHandle),
    /// A nested editable region (a table cell); selects without dragging.
    Interactive,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub element: ElementRef,
    pub part: HitPart,
}

/// Test which element (if any) of `section` lies under `pt`.
#[must_use]
pub fn hit_test(pt: Point, section: &Section, selected: Option<ElementRef>) -> Option<Hit> {
    if !pt.is_finite() {
        return None;
    }

    let selected = selected.filter(|s| s.section == section.id);
    if let Some(sel) = selected {
        if let Some(geom) = section.geometry_of(sel.kind, sel.id) {
            if let Some(handle) = handle_at(pt, &geom, sel.kind) {
                return Some(Hit { element: sel, part: HitPart::ResizeHandle(handle) });
            }
            if geom.contains(pt) {
                return Some(Hit { element: sel, part: body_part(pt, section, sel) });
            }
        }
    }

    section
        .elements()
        .into_iter()
        .rev()
        .filter(|entry| entry.geometry.contains(pt))
        .map(|entry| ElementRef::new(section.id, entry.kind, entry.id))
        .find(|element| Some(*element) != selected)
        .map(|element| Hit { element, part: body_part(pt, section, element) })
}

/// The handle of an element of `kind` with geometry `geom` under `pt`, if any.
#[must_use]
pub fn handle_at(pt: Point, geom: &Geometry, kind: ElementKind) -> Option<ResizeHandle> {
    kind.policy().handles().iter().copied().find(|handle| {
        let center = handle.position(geom);
        (pt.x - center.x).abs() <= HANDLE_RADIUS_PX && (pt.y - center.y).abs() <= HANDLE_RADIUS_PX
    })
}

/// The `(row, col)` of the table cell whose editable region contains `pt`.
#[must_use]
pub fn table_cell_at(pt: Point, table: &TableBlock) -> Option<(usize, usize)> {
    let rows = table.rows();
    let cols = table.columns();
    let geom = table.geometry;
    if rows == 0 || cols == 0 || !geom.contains(pt) {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let (cell_w, cell_h) = (geom.width / cols as f64, geom.height / rows as f64);
    let local_x = pt.x - geom.left;
    let local_y = pt.y - geom.top;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (col, row) = (
        ((local_x / cell_w).floor() as usize).min(cols - 1),
        ((local_y / cell_h).floor() as usize).min(rows - 1),
    );

    #[allow(clippy::cast_precision_loss)]
    let (in_x, in_y) = (local_x - col as f64 * cell_w, local_y - row as f64 * cell_h);
    let inside = in_x >= TABLE_CELL_INSET_PX
        && in_x <= cell_w - TABLE_CELL_INSET_PX
        && in_y >= TABLE_CELL_INSET_PX
        && in_y <= cell_h - TABLE_CELL_INSET_PX;
    inside.then_some((row, col))
}

fn body_part(pt: Point, section: &Section, element: ElementRef) -> HitPart {
    if element.kind == ElementKind::Table {
        if let Some(table) = section.table(element.id) {
            if table_cell_at(pt, table).is_some() {
                return HitPart::Interactive;
            }
        }
    }
    HitPart::Body
}
