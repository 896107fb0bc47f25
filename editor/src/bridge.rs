//! Browser bridge: exposes the engine and renderer to the JavaScript host.
//!
//! Payloads cross the boundary as JSON strings. Pointer coordinates for
//! `pointer_down` are relative to the section's top-left corner; move and up
//! events come from a document-wide listener in the same coordinate space.

use std::collections::BTreeSet;

use serde::Serialize;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

use crate::doc::{ElementRef, NewElement, Proposal, Variable};
use crate::engine::{Action, EngineCore, Splice, SurfaceState};
use crate::geometry::Point;
use crate::input::{Button, Key, Modifiers};
use crate::render::{EditTarget, RenderContext, render_display, render_editable};
use crate::theme::Theme;

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "bridge serialization failed");
        "null".into()
    })
}

fn actions_json(actions: &[Action]) -> String {
    to_json(actions)
}

/// Reply to text surface events: the actions to carry out and the surface
/// state for the variable popup.
#[derive(Serialize)]
struct SurfaceReply<'a> {
    actions: &'a [Action],
    surface: Option<SurfaceState>,
}

/// Editor handle owned by the page.
#[wasm_bindgen]
pub struct Editor {
    core: EngineCore,
    theme: Theme,
    variables: Vec<Variable>,
    broken_media: BTreeSet<String>,
}

impl Editor {
    fn surface_reply(&self, actions: &[Action]) -> String {
        to_json(&SurfaceReply { actions, surface: self.core.surface_state(&self.variables) })
    }
}

#[wasm_bindgen]
impl Editor {
    /// Open a proposal with a theme, both given as JSON.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if either payload fails to parse.
    #[wasm_bindgen(constructor)]
    pub fn new(proposal_json: &str, theme_json: &str) -> Result<Editor, JsError> {
        let proposal: Proposal = serde_json::from_str(proposal_json)?;
        let theme = Theme::from_json(theme_json)?;
        Ok(Self { core: EngineCore::new(proposal), theme, variables: Vec::new(), broken_media: BTreeSet::new() })
    }

    /// Replace the variable list, given as JSON.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the payload fails to parse.
    pub fn set_variables(&mut self, variables_json: &str) -> Result<(), JsError> {
        self.variables = serde_json::from_str(variables_json)?;
        Ok(())
    }

    /// Record that an image URL failed to load so it renders hidden.
    pub fn report_broken_media(&mut self, url: &str) {
        self.broken_media.insert(url.to_owned());
    }

    // --- Pointer and keyboard ---

    pub fn pointer_down(&mut self, section: &str, x: f64, y: f64, button: i16) -> String {
        let Ok(section) = Uuid::parse_str(section) else {
            return actions_json(&[]);
        };
        let button = Button::from_dom(button);
        actions_json(&self.core.on_pointer_down(section, Point::new(x, y), button, Modifiers::default()))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> String {
        actions_json(&self.core.on_pointer_move(Point::new(x, y), Modifiers::default()))
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16) -> String {
        actions_json(&self.core.on_pointer_up(Point::new(x, y), Button::from_dom(button), Modifiers::default()))
    }

    pub fn key_down(&mut self, key: &str) -> String {
        actions_json(&self.core.on_key_down(&Key::new(key), Modifiers::default()))
    }

    // --- Elements ---

    /// Add an element from a JSON template (`{"kind": "image", "src": ...}`).
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the section id or template fails to parse.
    pub fn add_element(&mut self, section: &str, template_json: &str) -> Result<String, JsError> {
        let section = Uuid::parse_str(section)?;
        let template: NewElement = serde_json::from_str(template_json)?;
        Ok(actions_json(&self.core.add_element(section, template.into())))
    }

    /// Delete the element named by a JSON `ElementRef`.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the reference fails to parse.
    pub fn delete_element(&mut self, target_json: &str) -> Result<String, JsError> {
        let target: ElementRef = serde_json::from_str(target_json)?;
        Ok(actions_json(&self.core.delete_element(target)))
    }

    /// Replace a text element's content.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the reference fails to parse.
    pub fn set_text(&mut self, target_json: &str, content: &str) -> Result<String, JsError> {
        let target: ElementRef = serde_json::from_str(target_json)?;
        Ok(actions_json(&self.core.set_text(target, content)))
    }

    /// Splice text produced by the page's content generator into a text element.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the reference fails to parse.
    pub fn apply_generated_text(
        &mut self,
        target_json: &str,
        generated: &str,
        append: bool,
    ) -> Result<String, JsError> {
        let target: ElementRef = serde_json::from_str(target_json)?;
        let splice = if append { Splice::Append } else { Splice::Replace };
        Ok(actions_json(&self.core.splice_text(target, generated, splice)))
    }

    /// Remove a signatory and its signature fields.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the id fails to parse.
    pub fn remove_signatory(&mut self, id: &str) -> Result<String, JsError> {
        let id = Uuid::parse_str(id)?;
        Ok(actions_json(&self.core.remove_signatory(id)))
    }

    // --- Text surface ---

    /// Open a text element for typing. Replies with actions and surface state.
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the reference fails to parse.
    pub fn open_text(&mut self, target_json: &str) -> Result<String, JsError> {
        let target: ElementRef = serde_json::from_str(target_json)?;
        let actions = self.core.open_text_surface(target);
        Ok(self.surface_reply(&actions))
    }

    /// Content changed in the open text surface; `cursor` counts characters.
    pub fn text_change(&mut self, text: &str, cursor: usize) -> String {
        let actions = self.core.text_change(text, cursor);
        self.surface_reply(&actions)
    }

    pub fn text_cursor(&mut self, cursor: usize) -> String {
        self.core.text_cursor(cursor);
        self.surface_reply(&[])
    }

    /// Insert the variable with id `variable_id` at the open trigger.
    pub fn insert_variable(&mut self, variable_id: &str) -> String {
        let variable = Uuid::parse_str(variable_id)
            .into_iter()
            .find_map(|id| self.variables.iter().find(|v| v.id == id).cloned());
        let actions = match variable {
            Some(v) => self.core.insert_variable(&v),
            None => Vec::new(),
        };
        self.surface_reply(&actions)
    }

    pub fn dismiss_suggestions(&mut self) -> String {
        self.core.dismiss_suggestions();
        self.surface_reply(&[])
    }

    pub fn close_text(&mut self) {
        self.core.close_text_surface();
    }

    // --- Editable tree ---

    /// Select a title, section or block in the editable tree (JSON `EditTarget`).
    ///
    /// # Errors
    ///
    /// Returns a `JsError` if the payload fails to parse.
    pub fn select_node(&mut self, target_json: &str) -> Result<String, JsError> {
        let target: EditTarget = serde_json::from_str(target_json)?;
        Ok(actions_json(&self.core.select_node(target)))
    }

    pub fn begin_edit(&mut self) -> bool {
        self.core.begin_edit()
    }

    /// Commit inline-edited text for the node being edited.
    pub fn commit_text(&mut self, text: &str) -> String {
        actions_json(&self.core.commit_text(text))
    }

    /// Delete the selected content block.
    pub fn delete_selected_block(&mut self) -> String {
        actions_json(&self.core.delete_selected_block())
    }

    // --- Output ---

    /// Render the current document as a JSON node tree.
    pub fn render(&self, editable: bool) -> String {
        let ctx = RenderContext::new(&self.core.proposal.signatories)
            .with_variables(&self.variables)
            .with_broken_media(&self.broken_media);
        let doc = self.core.document();
        let tree = if editable {
            render_editable(doc, &self.theme, &ctx, self.core.edit_state(), self.core.session())
        } else {
            render_display(doc, &self.theme, &ctx)
        };
        to_json(&tree)
    }

    /// The current proposal as JSON, for the host to persist.
    pub fn proposal(&self) -> String {
        to_json(&self.core.proposal)
    }
}
