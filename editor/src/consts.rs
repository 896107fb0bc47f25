//! Shared numeric constants for the editor crate.

// ── Minimum sizes ───────────────────────────────────────────────

/// Minimum width of a text element. Text height is never constrained.
pub const TEXT_MIN_WIDTH: f64 = 50.0;

/// Minimum width and height of an image element.
pub const IMAGE_MIN_SIZE: f64 = 30.0;

/// Minimum width and height of a shape element.
pub const SHAPE_MIN_SIZE: f64 = 30.0;

/// Minimum width of a table element.
pub const TABLE_MIN_WIDTH: f64 = 300.0;

/// Minimum height of a table element.
pub const TABLE_MIN_HEIGHT: f64 = 200.0;

/// Minimum width of a signature field.
pub const SIGNATURE_MIN_WIDTH: f64 = 100.0;

/// Minimum height of a signature field.
pub const SIGNATURE_MIN_HEIGHT: f64 = 40.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Hit slop in pixels around each resize handle's center.
pub const HANDLE_RADIUS_PX: f64 = 6.0;

/// Inset of a table cell's editable region from the cell borders.
pub const TABLE_CELL_INSET_PX: f64 = 4.0;

// ── Rendering ───────────────────────────────────────────────────

/// Heading font size used when the theme does not style a level.
pub const FALLBACK_HEADING_FONT_SIZE: f64 = 24.0;

/// Heading font weight used when the theme does not style a level.
pub const FALLBACK_HEADING_FONT_WEIGHT: u16 = 600;

/// Heading line height used when the theme does not style a level.
pub const FALLBACK_HEADING_LINE_HEIGHT: f64 = 1.2;

/// Stacking order given to the selected element so it renders above its siblings.
pub const SELECTED_Z_INDEX: i64 = 1000;

/// Label drawn at the bottom of every signature field.
pub const SIGNATURE_LABEL: &str = "Signature";

/// Recipient label used when a signature field points at a missing signatory.
pub const UNKNOWN_RECIPIENT: &str = "Unknown";
