//! Theme renderer: maps a document and a theme to a tree of styled nodes.
//!
//! There are two entry points sharing every style rule. [`render_display`]
//! produces the read-only tree used for previews and final output, with
//! `{{variable}}` tokens substituted. [`render_editable`] keeps raw tokens
//! and adds click-to-select targets on the title, each section and each
//! content block, edit/delete actions on the selected block, and the
//! selection outline and resize handles of the element selected in the
//! geometry session.
//!
//! Rendering reads its inputs only. Edits made through the editable tree are
//! applied with [`commit_edit`] and [`delete_block`], which return a new
//! document.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::collab::{DirectMedia, MediaResolver};
use crate::consts::{SELECTED_Z_INDEX, SIGNATURE_LABEL, UNKNOWN_RECIPIENT};
use crate::doc::{
    BlockKind, ContentBlock, Document, ElementId, ElementKind, ElementRef, HeadingLevel, ImageBlock, Section,
    SectionId, ShapeBlock, ShapeKind, Signatory, SignatureField, SignatureStatus, TableBlock, TextBlock, Variable,
};
use crate::geometry::{Geometry, ResizeHandle};
use crate::input::Session;
use crate::style::{Style, px, resolve_text_style};
use crate::text_surface::substitute;
use crate::theme::Theme;

// =============================================================
// Node tree
// =============================================================

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Document,
    Title,
    Section,
    SectionTitle,
    Content,
    Heading,
    Paragraph,
    List,
    ListItem,
    Elements,
    Text,
    Image,
    Shape,
    Table,
    TableRow,
    TableCell,
    Signature,
    SignatureRecipient,
    SignatureStatus,
    SignatureLabel,
}

/// A click-to-select target in editable mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditTarget {
    Title,
    Section { section: SectionId },
    Block { section: SectionId, block: ElementId },
}

/// Action offered on a selected node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeAction {
    Edit,
    Delete,
}

/// Selection affordances attached to a node in editable mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub target: EditTarget,
    pub selected: bool,
    /// The node's text is being edited inline.
    pub editing: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NodeAction>,
}

/// One styled visual node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub kind: NodeKind,
    pub key: String,
    #[serde(skip_serializing_if = "Style::is_empty")]
    pub style: Style,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// The host hides this node if its source fails to load.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hide_on_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
    /// Element driven by the geometry controller (editable mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<ElementRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub handles: Vec<ResizeHandle>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    #[must_use]
    pub fn new(kind: NodeKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            style: Style::new(),
            text: None,
            src: None,
            hide_on_error: false,
            interaction: None,
            element: None,
            handles: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Depth-first search for the node with `key`.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Node> {
        if self.key == key {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(key))
    }

    /// Every node in the subtree, depth-first, including `self`.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.descendants());
        }
        out
    }
}

// =============================================================
// Inputs
// =============================================================

/// Everything besides the document and theme that rendering reads.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Parties looked up by signature fields.
    pub signatories: &'a [Signatory],
    /// Values substituted for `{{name}}` in display mode.
    pub variables: &'a [Variable],
    pub media: &'a dyn MediaResolver,
    /// Resolved image URLs the host reported as failing to load.
    pub broken_media: Option<&'a BTreeSet<String>>,
}

impl<'a> RenderContext<'a> {
    /// Context with direct media URLs and no variables.
    #[must_use]
    pub fn new(signatories: &'a [Signatory]) -> Self {
        Self { signatories, variables: &[], media: &DirectMedia, broken_media: None }
    }

    #[must_use]
    pub fn with_variables(mut self, variables: &'a [Variable]) -> Self {
        self.variables = variables;
        self
    }

    #[must_use]
    pub fn with_media(mut self, media: &'a dyn MediaResolver) -> Self {
        self.media = media;
        self
    }

    #[must_use]
    pub fn with_broken_media(mut self, broken: &'a BTreeSet<String>) -> Self {
        self.broken_media = Some(broken);
        self
    }

    fn recipient_name(&self, field: &SignatureField) -> &str {
        self.signatories
            .iter()
            .find(|s| s.id == field.recipient_id)
            .map_or(UNKNOWN_RECIPIENT, |s| s.name.as_str())
    }

    fn image_url(&self, image: &ImageBlock) -> Option<String> {
        let url = self.media.resolve(&image.src)?;
        let broken = self.broken_media.is_some_and(|set| set.contains(&url));
        (!broken).then_some(url)
    }
}

/// Click-to-select state of the editable renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditState {
    pub selected: Option<EditTarget>,
    pub editing: bool,
}

impl EditState {
    /// Select `target`, leaving any inline edit.
    pub fn select(&mut self, target: EditTarget) {
        if self.selected != Some(target) {
            self.editing = false;
        }
        self.selected = Some(target);
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.editing = false;
    }

    /// Start editing the selected title or block. Sections are not editable inline.
    pub fn begin_edit(&mut self) -> bool {
        self.editing = matches!(self.selected, Some(EditTarget::Title | EditTarget::Block { .. }));
        self.editing
    }

    pub fn end_edit(&mut self) {
        self.editing = false;
    }

    fn interaction(&self, target: EditTarget) -> Interaction {
        let selected = self.selected == Some(target);
        let actions = match (selected, target) {
            (true, EditTarget::Block { .. }) => vec![NodeAction::Edit, NodeAction::Delete],
            (true, EditTarget::Title) => vec![NodeAction::Edit],
            _ => Vec::new(),
        };
        Interaction { target, selected, editing: selected && self.editing, actions }
    }
}

#[derive(Clone, Copy)]
enum Mode<'a> {
    Display,
    Editable { edit: &'a EditState, session: &'a Session },
}

impl Mode<'_> {
    fn interaction(&self, target: EditTarget) -> Option<Interaction> {
        match self {
            Mode::Display => None,
            Mode::Editable { edit, .. } => Some(edit.interaction(target)),
        }
    }

    fn is_selected(&self, target: EditTarget) -> bool {
        matches!(self, Mode::Editable { edit, .. } if edit.selected == Some(target))
    }
}

// =============================================================
// Entry points
// =============================================================

/// Read-only rendering for previews and final output.
#[must_use]
pub fn render_display(doc: &Document, theme: &Theme, ctx: &RenderContext<'_>) -> Node {
    render(doc, theme, ctx, Mode::Display)
}

/// Rendering with selection targets, inline-edit state and element handles.
#[must_use]
pub fn render_editable(
    doc: &Document,
    theme: &Theme,
    ctx: &RenderContext<'_>,
    edit: &EditState,
    session: &Session,
) -> Node {
    render(doc, theme, ctx, Mode::Editable { edit, session })
}

fn render(doc: &Document, theme: &Theme, ctx: &RenderContext<'_>, mode: Mode<'_>) -> Node {
    let style = Style::new()
        .with("display", "flex")
        .with("flex-direction", "column")
        .with_px("gap", theme.layout.section_gap)
        .with_px("max-width", theme.layout.max_width)
        .with("margin", "0 auto")
        .with("background", &theme.colors.background)
        .with("color", &theme.colors.text)
        .with("font-family", &theme.fonts.body);

    let mut children = vec![render_title(doc, theme, ctx, mode)];
    children.extend(doc.sections.iter().map(|s| render_section(s, theme, ctx, mode)));

    Node::new(NodeKind::Document, "document").with_style(style).with_children(children)
}

fn display_text(text: &str, ctx: &RenderContext<'_>, mode: Mode<'_>) -> String {
    match mode {
        Mode::Display => substitute(text, ctx.variables),
        Mode::Editable { .. } => text.to_owned(),
    }
}

fn outline(style: &mut Style, theme: &Theme) {
    style.insert("outline", format!("2px solid {}", theme.colors.accent));
}

fn render_title(doc: &Document, theme: &Theme, ctx: &RenderContext<'_>, mode: Mode<'_>) -> Node {
    let mut style = resolve_text_style(theme, BlockKind::Heading { level: HeadingLevel::H1 }).to_style();
    if mode.is_selected(EditTarget::Title) {
        outline(&mut style, theme);
    }
    let mut node = Node::new(NodeKind::Title, "title").with_style(style).with_text(display_text(&doc.title, ctx, mode));
    node.interaction = mode.interaction(EditTarget::Title);
    node
}

// =============================================================
// Sections
// =============================================================

fn render_section(section: &Section, theme: &Theme, ctx: &RenderContext<'_>, mode: Mode<'_>) -> Node {
    let target = EditTarget::Section { section: section.id };
    let border_color = if mode.is_selected(target) { &theme.colors.accent } else { &theme.colors.border };
    let bm = theme.box_model;

    let mut style = Style::new()
        .with("position", "relative")
        .with_px("padding", bm.default_padding)
        .with_px("border-radius", bm.border_radius)
        .with("border", format!("{} solid {border_color}", px(bm.border_width)))
        .with("background", &theme.colors.background);

    let elements = section.elements();
    if let Some(bottom) = elements.iter().map(|e| e.geometry.bottom()).reduce(f64::max) {
        style.insert_px("min-height", bottom);
    }

    let title_style = resolve_text_style(theme, BlockKind::Heading { level: HeadingLevel::H2 }).to_style();
    let mut children = vec![
        Node::new(NodeKind::SectionTitle, format!("section-title-{}", section.id))
            .with_style(title_style)
            .with_text(display_text(&section.title, ctx, mode)),
    ];
    if !section.content.is_empty() {
        children.push(render_content(section, theme, ctx, mode));
    }
    if !elements.is_empty() {
        children.push(render_elements(section, theme, ctx, mode));
    }

    let mut node = Node::new(NodeKind::Section, format!("section-{}", section.id))
        .with_style(style)
        .with_children(children);
    node.interaction = mode.interaction(target);
    node
}

fn render_content(section: &Section, theme: &Theme, ctx: &RenderContext<'_>, mode: Mode<'_>) -> Node {
    let style = Style::new()
        .with("display", "grid")
        .with("grid-template-columns", format!("repeat({}, 1fr)", section.layout.columns()))
        .with_px("column-gap", theme.layout.column_gutter);

    let mut children: Vec<Node> = Vec::new();
    let mut list: Vec<Node> = Vec::new();
    for block in &section.content {
        let node = render_block(section.id, block, theme, ctx, mode);
        if block.kind == BlockKind::ListItem {
            list.push(node);
            continue;
        }
        flush_list(&mut children, &mut list);
        children.push(node);
    }
    flush_list(&mut children, &mut list);

    Node::new(NodeKind::Content, format!("content-{}", section.id)).with_style(style).with_children(children)
}

/// Wrap consecutive list items in one list node.
fn flush_list(children: &mut Vec<Node>, list: &mut Vec<Node>) {
    let Some(first) = list.first() else {
        return;
    };
    let key = format!("list-{}", first.key);
    let items = std::mem::take(list);
    children.push(
        Node::new(NodeKind::List, key)
            .with_style(Style::new().with("margin", "0").with("padding-left", "1.5em"))
            .with_children(items),
    );
}

fn render_block(
    section: SectionId,
    block: &ContentBlock,
    theme: &Theme,
    ctx: &RenderContext<'_>,
    mode: Mode<'_>,
) -> Node {
    let target = EditTarget::Block { section, block: block.id };
    let kind = match block.kind {
        BlockKind::Heading { .. } => NodeKind::Heading,
        BlockKind::Paragraph => NodeKind::Paragraph,
        BlockKind::ListItem => NodeKind::ListItem,
    };

    let mut style = resolve_text_style(theme, block.kind).to_style();
    if mode.is_selected(target) {
        outline(&mut style, theme);
    }

    let mut node = Node::new(kind, format!("block-{}", block.id))
        .with_style(style)
        .with_text(display_text(&block.text, ctx, mode));
    node.interaction = mode.interaction(target);
    node
}

// =============================================================
// Positioned elements
// =============================================================

fn render_elements(section: &Section, theme: &Theme, ctx: &RenderContext<'_>, mode: Mode<'_>) -> Node {
    let mut children = Vec::new();
    // Stacking follows `Z_ORDER`, then collection order, matching the
    // top-down walk in `hit_test`.
    let mut z: i64 = 0;
    for kind in ElementKind::Z_ORDER {
        match kind {
            ElementKind::Text => {
                for t in &section.texts {
                    z += 1;
                    children.push(wrap(section.id, kind, t.id, &t.geometry, z, theme, mode, |s| {
                        render_text(t, theme, ctx, mode, s)
                    }));
                }
            }
            ElementKind::Image => {
                for img in &section.images {
                    z += 1;
                    children.push(wrap(section.id, kind, img.id, &img.geometry, z, theme, mode, |s| {
                        render_image(img, ctx, s)
                    }));
                }
            }
            ElementKind::Shape => {
                for shape in &section.shapes {
                    z += 1;
                    children.push(wrap(section.id, kind, shape.id, &shape.geometry, z, theme, mode, |s| {
                        render_shape(shape, s)
                    }));
                }
            }
            ElementKind::Table => {
                for table in &section.tables {
                    z += 1;
                    children.push(wrap(section.id, kind, table.id, &table.geometry, z, theme, mode, |s| {
                        render_table(table, theme, ctx, mode, s)
                    }));
                }
            }
            ElementKind::SignatureField => {
                for field in &section.signature_fields {
                    z += 1;
                    children.push(wrap(section.id, kind, field.id, &field.geometry, z, theme, mode, |s| {
                        render_signature(field, theme, ctx, s)
                    }));
                }
            }
        }
    }

    if z >= SELECTED_Z_INDEX {
        for child in children.iter_mut().filter(|c| !c.handles.is_empty()) {
            child.style.insert("z-index", z + 1);
        }
    }

    Node::new(NodeKind::Elements, format!("elements-{}", section.id)).with_children(children)
}

/// Position an element body inside its section and, in editable mode, attach
/// its geometry-controller reference, selection outline and handles.
#[allow(clippy::too_many_arguments)]
fn wrap<F>(
    section: SectionId,
    kind: ElementKind,
    id: ElementId,
    geom: &Geometry,
    z_index: i64,
    theme: &Theme,
    mode: Mode<'_>,
    body: F,
) -> Node
where
    F: FnOnce(Style) -> Node,
{
    let element = ElementRef::new(section, kind, id);
    let selected = matches!(mode, Mode::Editable { session, .. } if session.is_selected(&element));

    let mut style = Style::new()
        .with("position", "absolute")
        .with_px("top", geom.top)
        .with_px("left", geom.left)
        .with_px("width", geom.width)
        .with("z-index", if selected { SELECTED_Z_INDEX } else { z_index });
    if kind == ElementKind::Text {
        style.insert_px("min-height", geom.height);
    } else {
        style.insert_px("height", geom.height);
    }
    if selected {
        outline(&mut style, theme);
    }

    let mut node = body(style);
    if let Mode::Editable { .. } = mode {
        node.element = Some(element);
        if selected {
            node.handles = kind.policy().handles().to_vec();
        }
    }
    node
}

fn render_text(text: &TextBlock, theme: &Theme, ctx: &RenderContext<'_>, mode: Mode<'_>, mut style: Style) -> Node {
    style.merge(&resolve_text_style(theme, BlockKind::Paragraph).to_style());
    style.insert("white-space", "pre-wrap");
    let overrides = &text.style;
    if let Some(v) = overrides.font_size {
        style.insert_px("font-size", v);
    }
    if let Some(v) = overrides.font_weight {
        style.insert("font-weight", v);
    }
    if let Some(v) = &overrides.font_family {
        style.insert("font-family", v);
    }
    if let Some(v) = &overrides.color {
        style.insert("color", v);
    }
    if let Some(v) = &overrides.text_align {
        style.insert("text-align", v);
    }
    if let Some(v) = &overrides.background {
        style.insert("background", v);
    }

    Node::new(NodeKind::Text, format!("text-{}", text.id))
        .with_style(style)
        .with_text(display_text(&text.content, ctx, mode))
}

fn render_image(image: &ImageBlock, ctx: &RenderContext<'_>, mut style: Style) -> Node {
    style.insert("object-fit", "cover");
    style.insert("opacity", image.opacity);
    if let Some(r) = image.border_radius {
        style.insert_px("border-radius", r);
    }
    if let Some(b) = &image.border {
        style.insert("border", b);
    }

    let url = ctx.image_url(image);
    if url.is_none() {
        style.insert("display", "none");
    }

    let mut node = Node::new(NodeKind::Image, format!("image-{}", image.id)).with_style(style);
    node.src = url;
    node.text = image.alt.clone();
    node.hide_on_error = true;
    node
}

fn render_shape(shape: &ShapeBlock, mut style: Style) -> Node {
    style.insert("background", &shape.fill);
    style.insert("opacity", shape.opacity);
    if let Some(stroke) = &shape.stroke {
        style.insert("border", format!("{} solid {stroke}", px(shape.stroke_width)));
    }
    match shape.shape {
        ShapeKind::Rectangle => {
            if let Some(r) = shape.border_radius {
                style.insert_px("border-radius", r);
            }
        }
        ShapeKind::Circle => style.insert("border-radius", "50%"),
        ShapeKind::Triangle => style.insert("clip-path", "polygon(50% 0, 100% 100%, 0 100%)"),
    }
    Node::new(NodeKind::Shape, format!("shape-{}", shape.id)).with_style(style)
}

fn render_table(table: &TableBlock, theme: &Theme, ctx: &RenderContext<'_>, mode: Mode<'_>, mut style: Style) -> Node {
    let border_color = table.border_color.as_deref().unwrap_or(theme.colors.border.as_str());
    let header_bg = table.header_background.as_deref().unwrap_or(theme.colors.border.as_str());
    style.insert("border-collapse", "collapse");
    style.insert("table-layout", "fixed");

    let cols = table.columns();
    let rows = (0..table.rows())
        .map(|r| {
            let header = table.header_row && r == 0;
            let cells = (0..cols)
                .map(|c| {
                    let mut cell_style = Style::new()
                        .with("border", format!("{} solid {border_color}", px(theme.box_model.border_width)))
                        .with("padding", "4px 8px");
                    if header {
                        cell_style.insert("background", header_bg);
                        cell_style.insert("font-weight", 600);
                    }
                    Node::new(NodeKind::TableCell, format!("cell-{}-{r}-{c}", table.id))
                        .with_style(cell_style)
                        .with_text(display_text(table.cell(r, c), ctx, mode))
                })
                .collect();
            Node::new(NodeKind::TableRow, format!("row-{}-{r}", table.id)).with_children(cells)
        })
        .collect();

    Node::new(NodeKind::Table, format!("table-{}", table.id)).with_style(style).with_children(rows)
}

fn render_signature(field: &SignatureField, theme: &Theme, ctx: &RenderContext<'_>, mut style: Style) -> Node {
    style.insert("border", format!("2px dashed {}", theme.colors.primary));
    style.insert_px("border-radius", theme.box_model.border_radius);
    style.insert("box-sizing", "border-box");

    let status = match field.status {
        SignatureStatus::Pending => "Pending",
        SignatureStatus::Signed => "Signed",
        SignatureStatus::Declined => "Declined",
    };

    let children = vec![
        Node::new(NodeKind::SignatureRecipient, format!("signature-recipient-{}", field.id))
            .with_style(Style::new().with_px("padding", 8.0).with("color", &theme.colors.text))
            .with_text(ctx.recipient_name(field)),
        Node::new(NodeKind::SignatureStatus, format!("signature-status-{}", field.id))
            .with_style(Style::new().with_px("padding", 8.0).with("color", &theme.colors.secondary))
            .with_text(status),
        Node::new(NodeKind::SignatureLabel, format!("signature-label-{}", field.id))
            .with_style(
                Style::new()
                    .with("position", "absolute")
                    .with_px("bottom", 4.0)
                    .with_px("left", 8.0)
                    .with("color", &theme.colors.primary)
                    .with_px("font-size", 12.0),
            )
            .with_text(SIGNATURE_LABEL),
    ];

    Node::new(NodeKind::Signature, format!("signature-{}", field.id)).with_style(style).with_children(children)
}

// =============================================================
// Write-back
// =============================================================

/// Apply inline-edited `text` to `target`, returning the updated document.
/// Returns `None` when the target no longer exists.
#[must_use]
pub fn commit_edit(doc: &Document, target: EditTarget, text: &str) -> Option<Document> {
    let mut next = doc.clone();
    match target {
        EditTarget::Title => {
            next.title = text.to_owned();
            Some(next)
        }
        EditTarget::Section { section } => {
            doc.section(section)?;
            next.update_section(section, |s| Section { title: text.to_owned(), ..s.clone() });
            Some(next)
        }
        EditTarget::Block { section, block } => {
            doc.section(section)?.block(block)?;
            next.update_section(section, |s| {
                let mut updated = s.clone();
                if let Some(b) = updated.content.iter_mut().find(|b| b.id == block) {
                    b.text = text.to_owned();
                }
                updated
            });
            Some(next)
        }
    }
}

/// Remove a content block, returning the updated document.
/// Returns `None` when the block does not exist.
#[must_use]
pub fn delete_block(doc: &Document, section: SectionId, block: ElementId) -> Option<Document> {
    doc.section(section)?.block(block)?;
    let mut next = doc.clone();
    next.update_section(section, |s| {
        let mut updated = s.clone();
        updated.content.retain(|b| b.id != block);
        updated
    });
    Some(next)
}
