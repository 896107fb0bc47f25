//! Editor engine: the geometry controller plus the document operations that
//! go with it.
//!
//! `EngineCore` owns the proposal, the selection session, the gesture state
//! and the inline-edit state. Exactly one thing is selected at a time: a
//! positioned element, or a title, section or content block of the editable
//! tree. Selecting one clears the other. A text element being typed into is
//! backed by a [`TextSurface`], and every change it makes is written back into
//! the element's content.
//!
//! The host forwards pointer and keyboard events; every handler
//! returns the [`Action`]s the host should carry out (re-render, change the
//! cursor, notify the user). Pointer-move and pointer-up are expected from a
//! document-wide listener so a gesture ends even when the pointer leaves the
//! element.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;
use tracing::{debug, warn};

use crate::collab::{ContentGenerator, Persistence};
use crate::doc::{Document, Element, ElementKind, ElementRef, Proposal, SectionId, SignatoryId, Variable};
use crate::geometry::{self, Geometry, Point, ResizeHandle};
use crate::hit::{self, HitPart};
use crate::input::{Button, InputState, Key, Modifiers, Session};
use crate::render::{EditState, EditTarget, commit_edit, delete_block};
use crate::text_surface::TextSurface;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    Info,
    Error,
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Action {
    ElementCreated(ElementRef),
    ElementUpdated { target: ElementRef, geometry: Geometry },
    ElementDeleted(ElementRef),
    TextChanged(ElementRef),
    SelectionChanged(Option<ElementRef>),
    SetCursor(String),
    Notify { level: NotifyLevel, message: String },
    RenderNeeded,
}

/// How generated text is combined with a text element's existing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Splice {
    Replace,
    Append,
}

/// A text element open for typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub target: ElementRef,
    pub surface: TextSurface,
}

/// Text surface state handed to the page after each change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceState {
    pub target: ElementRef,
    pub text: String,
    pub cursor: usize,
    pub visible: bool,
    pub search: String,
    pub suggestions: Vec<Variable>,
}

/// Core engine state. Independent of any browser API so it can be driven
/// directly from tests and the host binary.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub proposal: Proposal,
    session: Session,
    pub input: InputState,
    edit: EditState,
    text_edit: Option<TextEdit>,
}

impl EngineCore {
    #[must_use]
    pub fn new(proposal: Proposal) -> Self {
        Self {
            proposal,
            session: Session::default(),
            input: InputState::Idle,
            edit: EditState::default(),
            text_edit: None,
        }
    }

    /// Replace the open proposal, dropping selection and any gesture.
    pub fn load(&mut self, proposal: Proposal) {
        self.proposal = proposal;
        self.session = Session::default();
        self.input = InputState::Idle;
        self.edit.clear();
        self.text_edit = None;
    }

    // --- Queries ---

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.proposal.document
    }

    #[must_use]
    pub fn selection(&self) -> Option<ElementRef> {
        self.session.active
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn geometry_of(&self, target: &ElementRef) -> Option<Geometry> {
        self.proposal.document.geometry_of(target)
    }

    /// Selection and inline-edit state of the editable tree.
    #[must_use]
    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    #[must_use]
    pub fn text_edit(&self) -> Option<&TextEdit> {
        self.text_edit.as_ref()
    }

    fn text_content(&self, target: &ElementRef) -> Option<String> {
        if target.kind != ElementKind::Text {
            return None;
        }
        self.proposal.document.section(target.section)?.text(target.id).map(|t| t.content.clone())
    }

    // --- Selection ---

    /// Make `target` the only selected element. Clears any node selection in
    /// the editable tree.
    pub fn select(&mut self, target: ElementRef) -> Vec<Action> {
        if self.session.active == Some(target) || !self.proposal.document.contains(&target) {
            return Vec::new();
        }
        debug!(element = %target.id, kind = target.kind.as_str(), "selected");
        self.edit.clear();
        if self.text_edit.as_ref().is_some_and(|t| t.target != target) {
            self.text_edit = None;
        }
        self.session.active = Some(target);
        vec![Action::SelectionChanged(Some(target)), Action::RenderNeeded]
    }

    /// Clear the element selection.
    pub fn deselect(&mut self) -> Vec<Action> {
        self.text_edit = None;
        if self.session.active.take().is_none() {
            return Vec::new();
        }
        vec![Action::SelectionChanged(None), Action::RenderNeeded]
    }

    /// Select a title, section or content block. Clears the element selection.
    pub fn select_node(&mut self, target: EditTarget) -> Vec<Action> {
        if !self.input.is_idle() || !self.node_exists(target) {
            return Vec::new();
        }
        let mut actions = self.deselect();
        if self.edit.selected != Some(target) {
            debug!(target = ?target, "node selected");
            self.edit.select(target);
            push_render(&mut actions);
        }
        actions
    }

    fn node_exists(&self, target: EditTarget) -> bool {
        let doc = &self.proposal.document;
        match target {
            EditTarget::Title => true,
            EditTarget::Section { section } => doc.section(section).is_some(),
            EditTarget::Block { section, block } => doc.section(section).and_then(|s| s.block(block)).is_some(),
        }
    }

    /// Start editing the selected title or block inline.
    pub fn begin_edit(&mut self) -> bool {
        self.edit.begin_edit()
    }

    /// Commit inline-edited text. Only applies while an inline edit started
    /// by [`Self::begin_edit`] is open.
    pub fn commit_text(&mut self, text: &str) -> Vec<Action> {
        let Some(target) = self.edit.selected.filter(|_| self.edit.editing) else {
            return Vec::new();
        };
        let Some(next) = commit_edit(&self.proposal.document, target, text) else {
            return Vec::new();
        };
        self.proposal.document = next;
        self.edit.end_edit();
        vec![Action::RenderNeeded]
    }

    /// Delete the selected content block.
    pub fn delete_selected_block(&mut self) -> Vec<Action> {
        let Some(EditTarget::Block { section, block }) = self.edit.selected else {
            return Vec::new();
        };
        let Some(next) = delete_block(&self.proposal.document, section, block) else {
            return Vec::new();
        };
        self.proposal.document = next;
        self.edit.clear();
        vec![Action::RenderNeeded]
    }

    // --- Pointer input ---

    /// Pointer pressed at `pt`, relative to the top-left of `section`.
    pub fn on_pointer_down(
        &mut self,
        section: SectionId,
        pt: Point,
        button: Button,
        _modifiers: Modifiers,
    ) -> Vec<Action> {
        if button != Button::Primary || !self.input.is_idle() || !pt.is_finite() {
            return Vec::new();
        }
        let Some(sec) = self.proposal.document.section(section) else {
            return Vec::new();
        };

        match hit::hit_test(pt, sec, self.session.active) {
            None => self.deselect(),
            Some(hit) => match hit.part {
                HitPart::Body => self.begin_drag(hit.element, pt),
                HitPart::ResizeHandle(handle) => self.begin_resize(hit.element, handle, pt),
                HitPart::Interactive => self.select(hit.element),
            },
        }
    }

    /// Start moving `target` from pointer position `pt`. Selects it first.
    pub fn begin_drag(&mut self, target: ElementRef, pt: Point) -> Vec<Action> {
        if !self.input.is_idle() || !pt.is_finite() {
            return Vec::new();
        }
        let Some(orig) = self.geometry_of(&target) else {
            return Vec::new();
        };

        let mut actions = self.select(target);
        self.input = InputState::Dragging { target, start: pt, orig };
        debug!(element = %target.id, "drag started");
        actions.push(Action::SetCursor("move".into()));
        actions
    }

    /// Start resizing `target` by `handle`. Only an already-selected element
    /// exposes handles, and only those its type allows.
    pub fn begin_resize(&mut self, target: ElementRef, handle: ResizeHandle, pt: Point) -> Vec<Action> {
        if !self.input.is_idle() || !pt.is_finite() || !self.session.is_selected(&target) {
            return Vec::new();
        }
        if !target.kind.policy().allows(handle) {
            return Vec::new();
        }
        let Some(orig) = self.geometry_of(&target) else {
            return Vec::new();
        };

        self.input = InputState::Resizing { target, handle, start: pt, orig };
        debug!(element = %target.id, handle = handle.as_str(), "resize started");
        vec![Action::SetCursor(handle.cursor().into())]
    }

    /// Pointer moved to `pt`. Applies one update for the active gesture.
    pub fn on_pointer_move(&mut self, pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if !pt.is_finite() {
            return Vec::new();
        }

        let (target, next) = match self.input {
            InputState::Idle => return Vec::new(),
            InputState::Dragging { target, start, orig } => (target, geometry::drag(&orig, pt.delta_from(start))),
            InputState::Resizing { target, handle, start, orig } => {
                (target, geometry::resize(&orig, handle, pt.delta_from(start), &target.kind.policy()))
            }
        };

        let Some(current) = self.geometry_of(&target) else {
            // Element vanished mid-gesture.
            self.input = InputState::Idle;
            return vec![Action::SetCursor("default".into())];
        };
        if current == next {
            return Vec::new();
        }

        self.proposal.document.set_geometry(&target, next);
        vec![Action::ElementUpdated { target, geometry: next }, Action::RenderNeeded]
    }

    /// Pointer released anywhere. Ends the active gesture.
    pub fn on_pointer_up(&mut self, _pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let Some(target) = self.input.target() else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        debug!(element = %target.id, geometry = ?self.geometry_of(&target), "gesture ended");
        vec![Action::SetCursor("default".into())]
    }

    // --- Keyboard ---

    /// `Delete`/`Backspace` remove the selected element and `Escape` clears
    /// the selection. Both are ignored while a gesture is active.
    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        if key.is_escape() {
            let had_node = self.edit.selected.is_some();
            self.edit.clear();
            let mut actions = self.deselect();
            if had_node {
                push_render(&mut actions);
            }
            return actions;
        }
        if key.is_delete() {
            if let Some(target) = self.session.active {
                return self.delete_element(target);
            }
        }
        Vec::new()
    }

    // --- Document operations ---

    /// Append `element` to `section` and select it.
    pub fn add_element(&mut self, section: SectionId, element: Element) -> Vec<Action> {
        let Some(target) = self.proposal.document.add_element(section, element) else {
            return Vec::new();
        };
        let mut actions = vec![Action::ElementCreated(target)];
        actions.extend(self.select(target));
        actions
    }

    /// Remove an element, clearing the selection if it was selected.
    pub fn delete_element(&mut self, target: ElementRef) -> Vec<Action> {
        if self.input.target() == Some(target) || !self.proposal.document.remove_element(&target) {
            return Vec::new();
        }
        if self.text_edit.as_ref().is_some_and(|t| t.target == target) {
            self.text_edit = None;
        }
        let mut actions = vec![Action::ElementDeleted(target)];
        if self.session.is_selected(&target) {
            actions.extend(self.deselect());
        } else {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Write new content into a text element. An open text surface on the
    /// same element is reset to the new content.
    pub fn set_text(&mut self, target: ElementRef, content: &str) -> Vec<Action> {
        if target.kind != ElementKind::Text
            || !self.proposal.document.set_text_content(target.section, target.id, content)
        {
            return Vec::new();
        }
        if let Some(edit) = self.text_edit.as_mut().filter(|t| t.target == target) {
            if edit.surface.text() != content {
                edit.surface = TextSurface::new(content);
            }
        }
        vec![Action::TextChanged(target), Action::RenderNeeded]
    }

    // --- Text surface ---

    /// Select a text element and open it for typing.
    pub fn open_text_surface(&mut self, target: ElementRef) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let Some(content) = self.text_content(&target) else {
            return Vec::new();
        };
        let actions = self.select(target);
        self.text_edit = Some(TextEdit { target, surface: TextSurface::new(content) });
        actions
    }

    /// Close the text surface. The content typed so far stays in the element.
    pub fn close_text_surface(&mut self) {
        self.text_edit = None;
    }

    /// Content-change event from the text surface: update the trigger state
    /// and write the text back into the element.
    pub fn text_change(&mut self, text: &str, cursor: usize) -> Vec<Action> {
        let Some(edit) = self.text_edit.as_mut() else {
            return Vec::new();
        };
        edit.surface.on_change(text, cursor);
        let target = edit.target;
        self.set_text(target, text)
    }

    /// Cursor moved inside the text surface without a content change.
    pub fn text_cursor(&mut self, cursor: usize) {
        if let Some(edit) = self.text_edit.as_mut() {
            edit.surface.on_cursor(cursor);
        }
    }

    /// Hide the variable popup without touching the text.
    pub fn dismiss_suggestions(&mut self) {
        if let Some(edit) = self.text_edit.as_mut() {
            edit.surface.close_popup();
        }
    }

    /// Insert `variable` at the open trigger and write the result back.
    pub fn insert_variable(&mut self, variable: &Variable) -> Vec<Action> {
        let Some(edit) = self.text_edit.as_mut() else {
            return Vec::new();
        };
        if !edit.surface.insert_variable(variable) {
            return Vec::new();
        }
        let (target, content) = (edit.target, edit.surface.text().to_owned());
        debug!(element = %target.id, variable = %variable.name, "variable inserted");
        self.set_text(target, &content)
    }

    /// The open text surface and the variables its popup lists.
    #[must_use]
    pub fn surface_state(&self, variables: &[Variable]) -> Option<SurfaceState> {
        let edit = self.text_edit.as_ref()?;
        let surface = &edit.surface;
        Some(SurfaceState {
            target: edit.target,
            text: surface.text().to_owned(),
            cursor: surface.cursor(),
            visible: surface.popup_visible(),
            search: surface.search().to_owned(),
            suggestions: surface.suggestions(variables).into_iter().cloned().collect(),
        })
    }

    // --- Generated content ---

    /// Ask `generator` for text and splice it into a text element. A failed
    /// generation leaves the content untouched and notifies the user.
    pub fn apply_generated(
        &mut self,
        target: ElementRef,
        generator: &dyn ContentGenerator,
        prompt: &str,
        splice: Splice,
    ) -> Vec<Action> {
        if self.text_content(&target).is_none() {
            return Vec::new();
        }
        match generator.generate(prompt) {
            Ok(generated) => self.splice_text(target, &generated, splice),
            Err(e) => {
                warn!(error = %e, element = %target.id, "content generation failed");
                vec![Action::Notify { level: NotifyLevel::Error, message: format!("Generation failed: {e}") }]
            }
        }
    }

    /// Combine already generated text with a text element's content.
    pub fn splice_text(&mut self, target: ElementRef, generated: &str, splice: Splice) -> Vec<Action> {
        let Some(existing) = self.text_content(&target) else {
            return Vec::new();
        };
        let content = match splice {
            Splice::Replace => generated.to_owned(),
            Splice::Append if existing.is_empty() => generated.to_owned(),
            Splice::Append => format!("{existing}\n{generated}"),
        };
        self.set_text(target, &content)
    }

    // --- Signatories and persistence ---

    /// Remove a signatory and every signature field assigned to it.
    pub fn remove_signatory(&mut self, id: SignatoryId) -> Vec<Action> {
        let Some(removed) = self.proposal.remove_signatory(id) else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        if let Some(active) = self.session.active {
            if !self.proposal.document.contains(&active) {
                if self.input.target() == Some(active) {
                    self.input = InputState::Idle;
                }
                actions.extend(self.deselect());
            }
        }
        if removed > 0 && !actions.contains(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Save through `store`. On failure the in-memory proposal is kept as is
    /// so the user can retry.
    pub fn save(&mut self, store: &dyn Persistence) -> Vec<Action> {
        match store.save(&self.proposal) {
            Ok(_) => vec![Action::Notify { level: NotifyLevel::Info, message: "Proposal saved".into() }],
            Err(e) => {
                warn!(error = %e, proposal = %self.proposal.id, "save failed");
                vec![Action::Notify { level: NotifyLevel::Error, message: format!("Save failed: {e}") }]
            }
        }
    }
}

fn push_render(actions: &mut Vec<Action>) {
    if !actions.contains(&Action::RenderNeeded) {
        actions.push(Action::RenderNeeded);
    }
}
