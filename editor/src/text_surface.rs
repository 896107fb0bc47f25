//! Variable-aware text surface.
//!
//! While the user types, the surface looks at the text before the cursor for
//! an opening `{` or `{{`. A bare opener shows every variable; `{{` followed
//! by letters, digits or spaces filters the list by that text; anything else
//! hides the popup. Picking a variable replaces the opener and search text
//! with `{{name}} ` in one step and moves the cursor past it.
//!
//! Cursor positions are counted in characters, as the browser reports them.

#[cfg(test)]
#[path = "text_surface_test.rs"]
mod text_surface_test;

use crate::doc::Variable;

/// An in-progress variable token before the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Character offset of the first `{` of the token.
    pub start: usize,
    /// Filter text typed after `{{`; empty for a bare opener.
    pub search: String,
}

/// Classify the text before `cursor` (in characters).
#[must_use]
pub fn detect_trigger(text: &str, cursor: usize) -> Option<Trigger> {
    let before: Vec<char> = text.chars().take(cursor).collect();
    let brace = before.iter().rposition(|c| *c == '{')?;
    if before[brace..].contains(&'}') {
        return None;
    }

    let start = if brace > 0 && before[brace - 1] == '{' { brace - 1 } else { brace };
    let token: String = before[start..].iter().collect();

    if token == "{" || token == "{{" {
        return Some(Trigger { start, search: String::new() });
    }

    let search = token.strip_prefix("{{")?;
    search
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ')
        .then(|| Trigger { start, search: search.to_owned() })
}

/// Variables whose name contains `search`, ignoring case.
#[must_use]
pub fn filter_variables<'a>(variables: &'a [Variable], search: &str) -> Vec<&'a Variable> {
    let needle = search.to_lowercase();
    variables.iter().filter(|v| v.name.to_lowercase().contains(&needle)).collect()
}

/// Replace every `{{name}}` whose name matches a variable with its value.
/// Unknown tokens are left as typed.
#[must_use]
pub fn substitute(text: &str, variables: &[Variable]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = after[..close].trim();
        match variables.iter().find(|v| v.name == name) {
            Some(var) => out.push_str(&var.value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

/// An editable text region with the variable popup state derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSurface {
    text: String,
    cursor: usize,
    trigger: Option<Trigger>,
}

impl TextSurface {
    /// A surface holding `text` with the cursor at its end.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor, trigger: None }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The active trigger, when the popup is visible.
    #[must_use]
    pub fn trigger(&self) -> Option<&Trigger> {
        self.trigger.as_ref()
    }

    #[must_use]
    pub fn popup_visible(&self) -> bool {
        self.trigger.is_some()
    }

    /// Current filter text, empty when hidden or unfiltered.
    #[must_use]
    pub fn search(&self) -> &str {
        self.trigger.as_ref().map_or("", |t| t.search.as_str())
    }

    /// Content-change event: new text and cursor position.
    pub fn on_change(&mut self, text: impl Into<String>, cursor: usize) {
        self.text = text.into();
        self.cursor = cursor.min(self.text.chars().count());
        self.trigger = detect_trigger(&self.text, self.cursor);
    }

    /// Cursor moved without a content change.
    pub fn on_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.text.chars().count());
        self.trigger = detect_trigger(&self.text, self.cursor);
    }

    /// Variables to list in the popup; empty when hidden.
    #[must_use]
    pub fn suggestions<'a>(&self, variables: &'a [Variable]) -> Vec<&'a Variable> {
        match &self.trigger {
            Some(t) => filter_variables(variables, &t.search),
            None => Vec::new(),
        }
    }

    /// Replace the in-progress token with `{{name}} ` and place the cursor
    /// after it. Returns false (and changes nothing) when no popup is open.
    pub fn insert_variable(&mut self, variable: &Variable) -> bool {
        let Some(trigger) = self.trigger.take() else {
            return false;
        };
        let token = format!("{{{{{}}}}} ", variable.name);

        let mut chars: Vec<char> = self.text.chars().collect();
        let end = self.cursor.min(chars.len());
        let start = trigger.start.min(end);
        chars.splice(start..end, token.chars());

        self.text = chars.into_iter().collect();
        self.cursor = start + token.chars().count();
        true
    }

    /// Hide the popup without changing the text.
    pub fn close_popup(&mut self) {
        self.trigger = None;
    }
}
