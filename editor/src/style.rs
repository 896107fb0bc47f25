//! Style maps and theme-driven text style resolution.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;

use crate::consts::{FALLBACK_HEADING_FONT_SIZE, FALLBACK_HEADING_FONT_WEIGHT, FALLBACK_HEADING_LINE_HEIGHT};
use crate::doc::BlockKind;
use crate::theme::{Theme, TypographyStyle};

/// CSS declarations for one visual node, keyed by property name.
///
/// Ordered so two renders of the same input compare and serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<&'static str, String>);

impl Style {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Style::insert`].
    #[must_use]
    pub fn with(mut self, property: &'static str, value: impl Display) -> Self {
        self.insert(property, value);
        self
    }

    /// Builder form of [`Style::insert_px`].
    #[must_use]
    pub fn with_px(mut self, property: &'static str, value: f64) -> Self {
        self.insert_px(property, value);
        self
    }

    pub fn insert(&mut self, property: &'static str, value: impl Display) {
        self.0.insert(property, value.to_string());
    }

    /// Insert a pixel length, e.g. `24` → `"24px"`.
    pub fn insert_px(&mut self, property: &'static str, value: f64) {
        self.0.insert(property, px(value));
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy every declaration of `other` over this one.
    pub fn merge(&mut self, other: &Style) {
        for (k, v) in &other.0 {
            self.0.insert(*k, v.clone());
        }
    }
}

/// Format a pixel length.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Typography resolved for one kind of text. Absent fields are left to
/// inheritance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTextStyle {
    pub font_family: String,
    pub font_size: Option<f64>,
    pub font_weight: Option<u16>,
    pub line_height: Option<f64>,
    pub color: Option<String>,
    pub margin_bottom: Option<f64>,
    pub text_transform: Option<String>,
}

impl ResolvedTextStyle {
    fn from_typography(entry: &TypographyStyle, font_family: &str, default_color: &str) -> Self {
        Self {
            font_family: font_family.to_owned(),
            font_size: Some(entry.font_size),
            font_weight: Some(entry.font_weight),
            line_height: Some(entry.line_height),
            color: Some(entry.color.clone().unwrap_or_else(|| default_color.to_owned())),
            margin_bottom: Some(entry.margin_bottom),
            text_transform: entry.text_transform.clone(),
        }
    }

    fn family_only(font_family: &str) -> Self {
        Self {
            font_family: font_family.to_owned(),
            font_size: None,
            font_weight: None,
            line_height: None,
            color: None,
            margin_bottom: None,
            text_transform: None,
        }
    }

    /// CSS declarations for this style.
    #[must_use]
    pub fn to_style(&self) -> Style {
        let mut style = Style::new().with("font-family", &self.font_family);
        if let Some(v) = self.font_size {
            style.insert_px("font-size", v);
        }
        if let Some(v) = self.font_weight {
            style.insert("font-weight", v);
        }
        if let Some(v) = self.line_height {
            style.insert("line-height", v);
        }
        if let Some(v) = &self.color {
            style.insert("color", v);
        }
        if let Some(v) = self.margin_bottom {
            style.insert_px("margin-bottom", v);
        }
        if let Some(v) = &self.text_transform {
            style.insert("text-transform", v);
        }
        style
    }
}

/// Resolve the typography for a block of `kind` under `theme`.
///
/// Headings use the theme's entry for their level, or a fixed
/// 24px / 600 / 1.2 style in the primary text color when the theme leaves the
/// level unstyled. Paragraphs always come from the theme. List items use the
/// theme's entry when present and otherwise only set the font family.
#[must_use]
pub fn resolve_text_style(theme: &Theme, kind: BlockKind) -> ResolvedTextStyle {
    let text_color = theme.colors.text.as_str();
    match kind {
        BlockKind::Heading { level } => match theme.heading(level) {
            Some(entry) => ResolvedTextStyle::from_typography(entry, &theme.fonts.heading, text_color),
            None => ResolvedTextStyle {
                font_family: theme.fonts.heading.clone(),
                font_size: Some(FALLBACK_HEADING_FONT_SIZE),
                font_weight: Some(FALLBACK_HEADING_FONT_WEIGHT),
                line_height: Some(FALLBACK_HEADING_LINE_HEIGHT),
                color: Some(text_color.to_owned()),
                margin_bottom: None,
                text_transform: None,
            },
        },
        BlockKind::Paragraph => {
            ResolvedTextStyle::from_typography(&theme.typography.paragraph, &theme.fonts.body, text_color)
        }
        BlockKind::ListItem => match &theme.typography.list_item {
            Some(entry) => ResolvedTextStyle::from_typography(entry, &theme.fonts.body, text_color),
            None => ResolvedTextStyle::family_only(&theme.fonts.body),
        },
    }
}
