//! Gesture replay: drive the engine from a recorded event script.
//!
//! DESIGN
//! ======
//! A script is a JSON array of pointer and key events in the order the page
//! would have delivered them. Pointer-down coordinates are relative to the
//! named section; move and up events share that space, exactly as the
//! document-wide listener reports them. Every event goes through the same
//! `EngineCore` handlers the browser bridge calls, so a replay reproduces
//! clamping, selection and handle rules without a browser.

use editor::engine::{Action, EngineCore};
use editor::geometry::Point;
use editor::input::{Button, Key, Modifiers};
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

/// One recorded input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ReplayEvent {
    Down {
        section: Uuid,
        x: f64,
        y: f64,
        /// DOM `MouseEvent.button` code; primary when absent.
        #[serde(default)]
        button: i16,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        button: i16,
    },
    Key {
        key: String,
    },
}

/// Parse a replay script.
///
/// # Errors
///
/// Returns the `serde_json` error when the script is malformed.
pub fn parse_script(text: &str) -> Result<Vec<ReplayEvent>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Feed `events` to `core` in order, returning every action produced.
pub fn replay(core: &mut EngineCore, events: &[ReplayEvent]) -> Vec<Action> {
    let mods = Modifiers::default();
    let mut actions = Vec::new();

    for (i, event) in events.iter().enumerate() {
        let produced = match event {
            ReplayEvent::Down { section, x, y, button } => {
                core.on_pointer_down(*section, Point::new(*x, *y), Button::from_dom(*button), mods)
            }
            ReplayEvent::Move { x, y } => core.on_pointer_move(Point::new(*x, *y), mods),
            ReplayEvent::Up { x, y, button } => core.on_pointer_up(Point::new(*x, *y), Button::from_dom(*button), mods),
            ReplayEvent::Key { key } => core.on_key_down(&Key::new(key.as_str()), mods),
        };
        debug!(index = i, event = ?event, produced = produced.len(), "replayed event");
        actions.extend(produced);
    }

    let updates = actions.iter().filter(|a| matches!(a, Action::ElementUpdated { .. })).count();
    info!(events = events.len(), updates, "replay finished");
    actions
}

#[cfg(test)]
#[path = "replay_test.rs"]
mod tests;
