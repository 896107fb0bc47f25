//! Theme model: typography, colors, box-model and layout tokens.
//!
//! A theme is plain data loaded from JSON (camelCase keys) and read by the
//! renderer. Paragraph typography is required; heading levels and list items
//! are optional and fall back at render time.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::doc::HeadingLevel;

/// Font stacks for headings and body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fonts {
    pub heading: String,
    pub body: String,
}

/// Named color tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Colors {
    pub primary: String,
    pub secondary: String,
    /// Highlight color; also marks the selected section in editable mode.
    pub accent: String,
    /// Primary text color.
    pub text: String,
    pub background: String,
    pub border: String,
}

/// Typography for one kind of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyStyle {
    pub font_size: f64,
    pub font_weight: u16,
    pub line_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub margin_bottom: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<String>,
}

impl TypographyStyle {
    #[must_use]
    pub fn new(font_size: f64, font_weight: u16, line_height: f64) -> Self {
        Self { font_size, font_weight, line_height, color: None, margin_bottom: 0.0, text_transform: None }
    }

    #[must_use]
    pub fn with_margin_bottom(mut self, margin_bottom: f64) -> Self {
        self.margin_bottom = margin_bottom;
        self
    }
}

/// Typography for headings, paragraphs and list items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// Styled heading levels. Levels missing here use the fallback heading style.
    #[serde(default)]
    pub heading: BTreeMap<HeadingLevel, TypographyStyle>,
    pub paragraph: TypographyStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_item: Option<TypographyStyle>,
}

/// Box-model tokens, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxModel {
    pub default_padding: f64,
    pub border_radius: f64,
    pub border_width: f64,
}

/// Page layout tokens, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTokens {
    pub section_gap: f64,
    pub column_gutter: f64,
    pub max_width: f64,
}

/// Declarative style descriptor applied to a document at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default)]
    pub name: String,
    pub fonts: Fonts,
    pub colors: Colors,
    pub typography: Typography,
    pub box_model: BoxModel,
    pub layout: LayoutTokens,
}

impl Theme {
    /// Parse a theme from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the text is not a valid theme.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Typography for a heading level, if the theme styles it.
    #[must_use]
    pub fn heading(&self, level: HeadingLevel) -> Option<&TypographyStyle> {
        self.typography.heading.get(&level)
    }
}

impl Default for Theme {
    /// A neutral built-in theme styling `h1`..`h3` and list items.
    fn default() -> Self {
        let mut heading = BTreeMap::new();
        heading.insert(HeadingLevel::H1, TypographyStyle::new(36.0, 700, 1.2).with_margin_bottom(16.0));
        heading.insert(HeadingLevel::H2, TypographyStyle::new(28.0, 700, 1.25).with_margin_bottom(12.0));
        heading.insert(HeadingLevel::H3, TypographyStyle::new(22.0, 600, 1.3).with_margin_bottom(10.0));

        Self {
            name: "Default".into(),
            fonts: Fonts { heading: "Inter, sans-serif".into(), body: "Inter, sans-serif".into() },
            colors: Colors {
                primary: "#1F2937".into(),
                secondary: "#6B7280".into(),
                accent: "#2563EB".into(),
                text: "#111827".into(),
                background: "#FFFFFF".into(),
                border: "#E5E7EB".into(),
            },
            typography: Typography {
                heading,
                paragraph: TypographyStyle::new(16.0, 400, 1.6).with_margin_bottom(12.0),
                list_item: Some(TypographyStyle::new(16.0, 400, 1.5).with_margin_bottom(4.0)),
            },
            box_model: BoxModel { default_padding: 24.0, border_radius: 8.0, border_width: 1.0 },
            layout: LayoutTokens { section_gap: 32.0, column_gutter: 24.0, max_width: 880.0 },
        }
    }
}
