//! Media resolution against a configured asset base URL.
//!
//! DESIGN
//! ======
//! Image elements store a reference such as `logos/acme.png`. Absolute
//! URLs (`http`, `https`, `data`) pass through untouched; anything else is
//! joined onto the base URL. An empty reference resolves to nothing, which
//! the renderer shows as a hidden image.

use editor::collab::MediaResolver;

const PASSTHROUGH_SCHEMES: [&str; 3] = ["http://", "https://", "data:"];

/// Resolves relative media references under a base URL.
#[derive(Debug, Clone)]
pub struct BaseUrlMedia {
    base: String,
}

impl BaseUrlMedia {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self { base: base.trim_end_matches('/').to_owned() }
    }
}

impl MediaResolver for BaseUrlMedia {
    fn resolve(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        if PASSTHROUGH_SCHEMES.iter().any(|scheme| reference.starts_with(scheme)) {
            return Some(reference.to_owned());
        }
        Some(format!("{}/{}", self.base, reference.trim_start_matches('/')))
    }
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
