//! Document model: proposals, sections, positionable elements, signatories.
//!
//! A [`Proposal`] owns one [`Document`] (title plus ordered sections) and the
//! list of [`Signatory`] parties its signature fields point at. Each
//! [`Section`] is an independent positioning frame holding five typed
//! element collections; every element's geometry is relative to its own
//! section.
//!
//! Mutations never edit a section in place from the outside: callers go
//! through [`Document::update_section`], which builds the replacement
//! section from the current one and swaps it in whole. The engine and the
//! renderer's write-back helpers are the only callers.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    IMAGE_MIN_SIZE, SHAPE_MIN_SIZE, SIGNATURE_MIN_HEIGHT, SIGNATURE_MIN_WIDTH, TABLE_MIN_HEIGHT, TABLE_MIN_WIDTH,
    TEXT_MIN_WIDTH,
};
use crate::geometry::{Geometry, GeometryPolicy, ResizeAxes};

/// Unique identifier for an element, block, or section.
pub type ElementId = Uuid;

/// Unique identifier for a section.
pub type SectionId = Uuid;

/// Unique identifier for a signatory.
pub type SignatoryId = Uuid;

// =============================================================
// Element kinds and references
// =============================================================

/// The type of a positionable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Text,
    Image,
    Shape,
    Table,
    SignatureField,
}

impl ElementKind {
    /// Bottom-to-top stacking order of the collections within a section.
    pub const Z_ORDER: [ElementKind; 5] =
        [ElementKind::Image, ElementKind::Shape, ElementKind::Table, ElementKind::Text, ElementKind::SignatureField];

    /// Sizing rules for this element type.
    #[must_use]
    pub fn policy(self) -> GeometryPolicy {
        match self {
            Self::Text => GeometryPolicy { min_width: TEXT_MIN_WIDTH, min_height: 0.0, axes: ResizeAxes::Horizontal },
            Self::Image => {
                GeometryPolicy { min_width: IMAGE_MIN_SIZE, min_height: IMAGE_MIN_SIZE, axes: ResizeAxes::Both }
            }
            Self::Shape => {
                GeometryPolicy { min_width: SHAPE_MIN_SIZE, min_height: SHAPE_MIN_SIZE, axes: ResizeAxes::Both }
            }
            Self::Table => {
                GeometryPolicy { min_width: TABLE_MIN_WIDTH, min_height: TABLE_MIN_HEIGHT, axes: ResizeAxes::Both }
            }
            Self::SignatureField => GeometryPolicy {
                min_width: SIGNATURE_MIN_WIDTH,
                min_height: SIGNATURE_MIN_HEIGHT,
                axes: ResizeAxes::Both,
            },
        }
    }

    /// Geometry given to a freshly added element of this type.
    #[must_use]
    pub fn default_geometry(self) -> Geometry {
        match self {
            Self::Text => Geometry::new(20.0, 20.0, 240.0, 40.0),
            Self::Image => Geometry::new(20.0, 20.0, 200.0, 150.0),
            Self::Shape => Geometry::new(20.0, 20.0, 100.0, 100.0),
            Self::Table => Geometry::new(20.0, 20.0, 400.0, 200.0),
            Self::SignatureField => Geometry::new(20.0, 20.0, 200.0, 80.0),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Shape => "shape",
            Self::Table => "table",
            Self::SignatureField => "signatureField",
        }
    }
}

/// Locates one element in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRef {
    pub section: SectionId,
    pub kind: ElementKind,
    pub id: ElementId,
}

impl ElementRef {
    #[must_use]
    pub fn new(section: SectionId, kind: ElementKind, id: ElementId) -> Self {
        Self { section, kind, id }
    }
}

// =============================================================
// Elements
// =============================================================

/// Optional typography overrides on a text element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// Free-positioned block of text. Height grows with content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub id: ElementId,
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Raw content; may contain `{{variable}}` tokens.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub style: TextStyle,
}

fn full_opacity() -> f64 {
    1.0
}

fn is_full_opacity(v: &f64) -> bool {
    (*v - 1.0).abs() < f64::EPSILON
}

/// Positioned image. `src` is a media reference resolved at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    pub id: ElementId,
    #[serde(flatten)]
    pub geometry: Geometry,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default = "full_opacity", skip_serializing_if = "is_full_opacity")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
}

/// Outline of a shape element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Triangle,
}

/// Positioned decorative shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeBlock {
    pub id: ElementId,
    #[serde(flatten)]
    pub geometry: Geometry,
    #[serde(default)]
    pub shape: ShapeKind,
    pub fill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default)]
    pub stroke_width: f64,
    #[serde(default = "full_opacity", skip_serializing_if = "is_full_opacity")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
}

/// Positioned table; `cells` is row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBlock {
    pub id: ElementId,
    #[serde(flatten)]
    pub geometry: Geometry,
    pub cells: Vec<Vec<String>>,
    #[serde(default)]
    pub header_row: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_background: Option<String>,
}

impl TableBlock {
    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Width of the widest row.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Text in cell `(row, col)`, empty when the row is short.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.cells.get(row).and_then(|r| r.get(col)).map_or("", String::as_str)
    }
}

/// Progress of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureStatus {
    #[default]
    Pending,
    Signed,
    Declined,
}

/// Positioned placeholder where a signatory signs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureField {
    pub id: ElementId,
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Lookup-only reference into the proposal's signatory list.
    pub recipient_id: SignatoryId,
    #[serde(default)]
    pub status: SignatureStatus,
}

/// Shared access to the id and geometry of every element type.
pub trait Positionable {
    const KIND: ElementKind;

    fn id(&self) -> ElementId;
    fn geometry(&self) -> Geometry;
    fn set_geometry(&mut self, geometry: Geometry);
}

macro_rules! positionable {
    ($ty:ty, $kind:expr) => {
        impl Positionable for $ty {
            const KIND: ElementKind = $kind;

            fn id(&self) -> ElementId {
                self.id
            }

            fn geometry(&self) -> Geometry {
                self.geometry
            }

            fn set_geometry(&mut self, geometry: Geometry) {
                self.geometry = geometry;
            }
        }
    };
}

positionable!(TextBlock, ElementKind::Text);
positionable!(ImageBlock, ElementKind::Image);
positionable!(ShapeBlock, ElementKind::Shape);
positionable!(TableBlock, ElementKind::Table);
positionable!(SignatureField, ElementKind::SignatureField);

/// An element of any type, used when adding to a section.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextBlock),
    Image(ImageBlock),
    Shape(ShapeBlock),
    Table(TableBlock),
    SignatureField(SignatureField),
}

impl Element {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text(_) => ElementKind::Text,
            Self::Image(_) => ElementKind::Image,
            Self::Shape(_) => ElementKind::Shape,
            Self::Table(_) => ElementKind::Table,
            Self::SignatureField(_) => ElementKind::SignatureField,
        }
    }

    #[must_use]
    pub fn id(&self) -> ElementId {
        match self {
            Self::Text(e) => e.id,
            Self::Image(e) => e.id,
            Self::Shape(e) => e.id,
            Self::Table(e) => e.id,
            Self::SignatureField(e) => e.id,
        }
    }

    /// A new text element with placeholder content.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(TextBlock {
            id: Uuid::new_v4(),
            geometry: ElementKind::Text.default_geometry(),
            content: content.into(),
            style: TextStyle::default(),
        })
    }

    /// A new image element pointing at a media reference.
    #[must_use]
    pub fn image(src: impl Into<String>) -> Self {
        Self::Image(ImageBlock {
            id: Uuid::new_v4(),
            geometry: ElementKind::Image.default_geometry(),
            src: src.into(),
            alt: None,
            opacity: 1.0,
            border_radius: None,
            border: None,
        })
    }

    /// A new rectangle with the given fill.
    #[must_use]
    pub fn shape(fill: impl Into<String>) -> Self {
        Self::Shape(ShapeBlock {
            id: Uuid::new_v4(),
            geometry: ElementKind::Shape.default_geometry(),
            shape: ShapeKind::Rectangle,
            fill: fill.into(),
            stroke: None,
            stroke_width: 0.0,
            opacity: 1.0,
            border_radius: None,
        })
    }

    /// A new empty table of `rows` × `cols` with a header row.
    #[must_use]
    pub fn table(rows: usize, cols: usize) -> Self {
        Self::Table(TableBlock {
            id: Uuid::new_v4(),
            geometry: ElementKind::Table.default_geometry(),
            cells: vec![vec![String::new(); cols]; rows],
            header_row: true,
            border_color: None,
            header_background: None,
        })
    }

    /// A new pending signature field for `recipient_id`.
    #[must_use]
    pub fn signature_field(recipient_id: SignatoryId) -> Self {
        Self::SignatureField(SignatureField {
            id: Uuid::new_v4(),
            geometry: ElementKind::SignatureField.default_geometry(),
            recipient_id,
            status: SignatureStatus::Pending,
        })
    }
}

/// Element template sent by the page when adding an element, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NewElement {
    Text {
        #[serde(default)]
        content: String,
    },
    Image {
        src: String,
    },
    Shape {
        fill: String,
    },
    Table {
        rows: usize,
        cols: usize,
    },
    SignatureField {
        #[serde(rename = "recipientId")]
        recipient_id: SignatoryId,
    },
}

impl From<NewElement> for Element {
    fn from(template: NewElement) -> Self {
        match template {
            NewElement::Text { content } => Element::text(content),
            NewElement::Image { src } => Element::image(src),
            NewElement::Shape { fill } => Element::shape(fill),
            NewElement::Table { rows, cols } => Element::table(rows, cols),
            NewElement::SignatureField { recipient_id } => Element::signature_field(recipient_id),
        }
    }
}

// =============================================================
// Rich content blocks
// =============================================================

/// Heading level `h1`..`h6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }
}

/// The role of a block of flowing section content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockKind {
    Heading { level: HeadingLevel },
    Paragraph,
    ListItem,
}

/// One block of a section's flowing rich content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: ElementId,
    #[serde(flatten)]
    pub kind: BlockKind,
    #[serde(default)]
    pub text: String,
}

impl ContentBlock {
    #[must_use]
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), kind, text: text.into() }
    }
}

// =============================================================
// Sections
// =============================================================

/// Column arrangement of a section's flowing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionLayout {
    #[default]
    Single,
    TwoColumn,
    ThreeColumn,
}

impl SectionLayout {
    #[must_use]
    pub fn columns(self) -> usize {
        match self {
            Self::Single => 1,
            Self::TwoColumn => 2,
            Self::ThreeColumn => 3,
        }
    }
}

/// Id and geometry of one element, as listed by [`Section::elements`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementEntry {
    pub kind: ElementKind,
    pub id: ElementId,
    pub geometry: Geometry,
}

/// An independent positioning frame within a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub layout: SectionLayout,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub texts: Vec<TextBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<ShapeBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<TableBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signature_fields: Vec<SignatureField>,
}

/// Uniform operations over one typed element collection.
trait Collection {
    fn geometry_of(&self, id: ElementId) -> Option<Geometry>;
    fn set_geometry(&mut self, id: ElementId, geometry: Geometry) -> bool;
    fn remove(&mut self, id: ElementId) -> bool;
    fn entries(&self) -> Vec<ElementEntry>;
}

impl<T: Positionable> Collection for Vec<T> {
    fn geometry_of(&self, id: ElementId) -> Option<Geometry> {
        self.iter().find(|e| e.id() == id).map(Positionable::geometry)
    }

    fn set_geometry(&mut self, id: ElementId, geometry: Geometry) -> bool {
        let Some(element) = self.iter_mut().find(|e| e.id() == id) else {
            return false;
        };
        element.set_geometry(geometry);
        true
    }

    fn remove(&mut self, id: ElementId) -> bool {
        let before = self.len();
        self.retain(|e| e.id() != id);
        self.len() != before
    }

    fn entries(&self) -> Vec<ElementEntry> {
        self.iter().map(|e| ElementEntry { kind: T::KIND, id: e.id(), geometry: e.geometry() }).collect()
    }
}

impl Section {
    /// An empty single-column section.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: Vec::new(),
            layout: SectionLayout::Single,
            texts: Vec::new(),
            images: Vec::new(),
            shapes: Vec::new(),
            tables: Vec::new(),
            signature_fields: Vec::new(),
        }
    }

    fn collection(&self, kind: ElementKind) -> &dyn Collection {
        match kind {
            ElementKind::Text => &self.texts,
            ElementKind::Image => &self.images,
            ElementKind::Shape => &self.shapes,
            ElementKind::Table => &self.tables,
            ElementKind::SignatureField => &self.signature_fields,
        }
    }

    fn collection_mut(&mut self, kind: ElementKind) -> &mut dyn Collection {
        match kind {
            ElementKind::Text => &mut self.texts,
            ElementKind::Image => &mut self.images,
            ElementKind::Shape => &mut self.shapes,
            ElementKind::Table => &mut self.tables,
            ElementKind::SignatureField => &mut self.signature_fields,
        }
    }

    /// Geometry of the element, if it exists in this section.
    #[must_use]
    pub fn geometry_of(&self, kind: ElementKind, id: ElementId) -> Option<Geometry> {
        self.collection(kind).geometry_of(id)
    }

    /// Overwrite an element's geometry. Returns false if it does not exist.
    pub fn set_geometry(&mut self, kind: ElementKind, id: ElementId, geometry: Geometry) -> bool {
        self.collection_mut(kind).set_geometry(id, geometry)
    }

    /// Remove an element. Returns false if it does not exist.
    pub fn remove_element(&mut self, kind: ElementKind, id: ElementId) -> bool {
        self.collection_mut(kind).remove(id)
    }

    /// Append an element to its collection (top of its z-layer).
    pub fn push_element(&mut self, element: Element) {
        match element {
            Element::Text(e) => self.texts.push(e),
            Element::Image(e) => self.images.push(e),
            Element::Shape(e) => self.shapes.push(e),
            Element::Table(e) => self.tables.push(e),
            Element::SignatureField(e) => self.signature_fields.push(e),
        }
    }

    /// Every element in bottom-to-top stacking order.
    #[must_use]
    pub fn elements(&self) -> Vec<ElementEntry> {
        ElementKind::Z_ORDER.iter().flat_map(|kind| self.collection(*kind).entries()).collect()
    }

    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<&TextBlock> {
        self.texts.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn table(&self, id: ElementId) -> Option<&TableBlock> {
        self.tables.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn block(&self, id: ElementId) -> Option<&ContentBlock> {
        self.content.iter().find(|b| b.id == id)
    }
}

// =============================================================
// Document and proposal
// =============================================================

/// An element whose geometry breaks the position or minimum-size rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Violation {
    pub element: ElementRef,
    pub geometry: Geometry,
}

/// Title plus ordered sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Document {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), sections: Vec::new() }
    }

    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Replace the section with the given id by `f(current)`. Returns false
    /// when no such section exists.
    pub fn update_section<F>(&mut self, id: SectionId, f: F) -> bool
    where
        F: FnOnce(&Section) -> Section,
    {
        let Some(slot) = self.sections.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        let next = f(slot);
        *slot = next;
        true
    }

    #[must_use]
    pub fn contains(&self, element: &ElementRef) -> bool {
        self.geometry_of(element).is_some()
    }

    #[must_use]
    pub fn geometry_of(&self, element: &ElementRef) -> Option<Geometry> {
        self.section(element.section)?.geometry_of(element.kind, element.id)
    }

    /// Write new geometry for an element. Returns false if it does not exist.
    pub fn set_geometry(&mut self, element: &ElementRef, geometry: Geometry) -> bool {
        if !self.contains(element) {
            return false;
        }
        self.update_section(element.section, |s| {
            let mut next = s.clone();
            next.set_geometry(element.kind, element.id, geometry);
            next
        })
    }

    /// Remove an element. Returns false if it does not exist.
    pub fn remove_element(&mut self, element: &ElementRef) -> bool {
        if !self.contains(element) {
            return false;
        }
        self.update_section(element.section, |s| {
            let mut next = s.clone();
            next.remove_element(element.kind, element.id);
            next
        })
    }

    /// Append an element to a section, returning its reference.
    pub fn add_element(&mut self, section: SectionId, element: Element) -> Option<ElementRef> {
        let target = ElementRef::new(section, element.kind(), element.id());
        let added = self.update_section(section, |s| {
            let mut next = s.clone();
            next.push_element(element);
            next
        });
        added.then_some(target)
    }

    /// Replace the content of a text element. Returns false if it does not exist.
    pub fn set_text_content(&mut self, section: SectionId, id: ElementId, content: &str) -> bool {
        if self.section(section).and_then(|s| s.text(id)).is_none() {
            return false;
        }
        self.update_section(section, |s| {
            let mut next = s.clone();
            if let Some(text) = next.texts.iter_mut().find(|t| t.id == id) {
                text.content = content.to_owned();
            }
            next
        })
    }

    /// Elements breaking `top >= 0`, `left >= 0` or their type's minimum size.
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        self.sections
            .iter()
            .flat_map(|section| {
                section.elements().into_iter().filter_map(move |entry| {
                    if entry.kind.policy().admits(&entry.geometry) {
                        None
                    } else {
                        Some(Violation {
                            element: ElementRef::new(section.id, entry.kind, entry.id),
                            geometry: entry.geometry,
                        })
                    }
                })
            })
            .collect()
    }
}

/// A party eligible to sign the proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signatory {
    pub id: SignatoryId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub order: u32,
}

/// A named placeholder referenced from text as `{{name}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub id: Uuid,
    pub name: String,
    pub value: String,
}

impl Variable {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), value: value.into() }
    }
}

/// A document together with the signatories its signature fields refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: Uuid,
    pub document: Document,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signatories: Vec<Signatory>,
}

impl Proposal {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { id: Uuid::new_v4(), document, signatories: Vec::new() }
    }

    #[must_use]
    pub fn signatory(&self, id: SignatoryId) -> Option<&Signatory> {
        self.signatories.iter().find(|s| s.id == id)
    }

    /// Remove a signatory and every signature field in every section that
    /// references it. Returns the number of fields removed, or `None` if the
    /// signatory did not exist.
    pub fn remove_signatory(&mut self, id: SignatoryId) -> Option<usize> {
        let before = self.signatories.len();
        self.signatories.retain(|s| s.id != id);
        if self.signatories.len() == before {
            return None;
        }

        let mut removed = 0;
        let affected: Vec<SectionId> = self
            .document
            .sections
            .iter()
            .filter(|s| s.signature_fields.iter().any(|f| f.recipient_id == id))
            .map(|s| s.id)
            .collect();
        for section in affected {
            self.document.update_section(section, |s| {
                let mut next = s.clone();
                next.signature_fields.retain(|f| f.recipient_id != id);
                removed += s.signature_fields.len() - next.signature_fields.len();
                next
            });
        }
        tracing::debug!(signatory = %id, removed, "signatory removed");
        Some(removed)
    }
}
