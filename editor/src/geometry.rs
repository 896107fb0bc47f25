//! Geometry primitives and the pure drag/resize arithmetic.
//!
//! Every positionable element shares the same `{top, left, width, height}`
//! frame, expressed relative to its section's top-left corner. The functions
//! here take the geometry captured at gesture start plus the pointer delta
//! since then and return the geometry to write back. They never produce a
//! negative position or a size below the element type's minimum, and all
//! outputs are rounded to whole pixels.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in section-relative pixel coordinates, or a delta between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise `self - origin`.
    #[must_use]
    pub fn delta_from(self, origin: Point) -> Point {
        Point { x: self.x - origin.x, y: self.y - origin.y }
    }
}

/// Position and size of an element within its section.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// Distance from the section's top edge.
    pub top: f64,
    /// Distance from the section's left edge.
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `pt` lies inside the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left && pt.x <= self.right() && pt.y >= self.top && pt.y <= self.bottom()
    }

    /// Round every field to the nearest whole pixel.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            top: self.top.round(),
            left: self.left.round(),
            width: self.width.round(),
            height: self.height.round(),
        }
    }
}

/// One of the eight resize handles around a selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    Nw,
    N,
    Ne,
    W,
    E,
    Sw,
    S,
    Se,
}

impl ResizeHandle {
    /// All handles, corners and edges.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Nw,
        ResizeHandle::N,
        ResizeHandle::Ne,
        ResizeHandle::W,
        ResizeHandle::E,
        ResizeHandle::Sw,
        ResizeHandle::S,
        ResizeHandle::Se,
    ];

    /// Handles that only change the width.
    pub const HORIZONTAL: [ResizeHandle; 2] = [ResizeHandle::W, ResizeHandle::E];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nw => "nw",
            Self::N => "n",
            Self::Ne => "ne",
            Self::W => "w",
            Self::E => "e",
            Self::Sw => "sw",
            Self::S => "s",
            Self::Se => "se",
        }
    }

    /// Parse a handle name such as `"se"`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.as_str() == name)
    }

    #[must_use]
    pub fn moves_north(self) -> bool {
        self.as_str().contains('n')
    }

    #[must_use]
    pub fn moves_south(self) -> bool {
        self.as_str().contains('s')
    }

    #[must_use]
    pub fn moves_east(self) -> bool {
        self.as_str().contains('e')
    }

    #[must_use]
    pub fn moves_west(self) -> bool {
        self.as_str().contains('w')
    }

    /// Center of this handle on the border of `geom`.
    #[must_use]
    pub fn position(self, geom: &Geometry) -> Point {
        let x = if self.moves_west() {
            geom.left
        } else if self.moves_east() {
            geom.right()
        } else {
            geom.left + geom.width / 2.0
        };
        let y = if self.moves_north() {
            geom.top
        } else if self.moves_south() {
            geom.bottom()
        } else {
            geom.top + geom.height / 2.0
        };
        Point::new(x, y)
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::N | Self::S => "ns-resize",
            Self::W | Self::E => "ew-resize",
        }
    }
}

/// Which axes an element type may be resized along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAxes {
    /// Width only; height follows content.
    Horizontal,
    /// Width and height.
    Both,
}

/// Per-type sizing rules consumed by the geometry controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryPolicy {
    pub min_width: f64,
    pub min_height: f64,
    pub axes: ResizeAxes,
}

impl GeometryPolicy {
    /// Handles exposed for this policy.
    #[must_use]
    pub fn handles(&self) -> &'static [ResizeHandle] {
        match self.axes {
            ResizeAxes::Horizontal => &ResizeHandle::HORIZONTAL,
            ResizeAxes::Both => &ResizeHandle::ALL,
        }
    }

    #[must_use]
    pub fn allows(&self, handle: ResizeHandle) -> bool {
        self.handles().contains(&handle)
    }

    /// Whether `geom` satisfies the minimum size and non-negative position rules.
    #[must_use]
    pub fn admits(&self, geom: &Geometry) -> bool {
        geom.top >= 0.0 && geom.left >= 0.0 && geom.width >= self.min_width && geom.height >= self.min_height
    }
}

/// Move `orig` by `delta`, clamping the position at the section origin.
#[must_use]
pub fn drag(orig: &Geometry, delta: Point) -> Geometry {
    Geometry {
        left: (orig.left + delta.x).max(0.0),
        top: (orig.top + delta.y).max(0.0),
        ..*orig
    }
    .rounded()
}

/// Resize `orig` by dragging `handle` by `delta`.
///
/// East/south edges grow or shrink the size directly. West/north edges keep
/// the opposite edge anchored: the moving edge stops once the size reaches
/// the minimum, and never crosses the section origin. Axes the policy does
/// not allow are left untouched.
#[must_use]
pub fn resize(orig: &Geometry, handle: ResizeHandle, delta: Point, policy: &GeometryPolicy) -> Geometry {
    let mut next = *orig;

    if handle.moves_east() {
        next.width = (orig.width + delta.x).max(policy.min_width);
    }
    if handle.moves_west() {
        let (left, width) = pull_leading_edge(orig.left, orig.width, delta.x, policy.min_width);
        next.left = left;
        next.width = width;
    }

    if policy.axes == ResizeAxes::Both {
        if handle.moves_south() {
            next.height = (orig.height + delta.y).max(policy.min_height);
        }
        if handle.moves_north() {
            let (top, height) = pull_leading_edge(orig.top, orig.height, delta.y, policy.min_height);
            next.top = top;
            next.height = height;
        }
    }

    next.rounded()
}

/// Move the leading (left/top) edge of a span by `delta`, keeping the
/// trailing edge fixed. Returns the new `(start, length)`.
fn pull_leading_edge(start: f64, length: f64, delta: f64, min_length: f64) -> (f64, f64) {
    let end = start + length;
    let new_start = (start + delta).min(end - min_length).max(0.0);
    (new_start, (end - new_start).max(min_length))
}
