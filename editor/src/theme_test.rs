#![allow(clippy::float_cmp)]

use super::*;

const MINIMAL: &str = r##"{
    "fonts": { "heading": "Georgia, serif", "body": "Helvetica, sans-serif" },
    "colors": {
        "primary": "#000000",
        "secondary": "#555555",
        "accent": "#FF6600",
        "text": "#222222",
        "background": "#FAFAFA",
        "border": "#DDDDDD"
    },
    "typography": {
        "heading": {
            "h1": { "fontSize": 40, "fontWeight": 800, "lineHeight": 1.1, "textTransform": "uppercase" }
        },
        "paragraph": { "fontSize": 15, "fontWeight": 400, "lineHeight": 1.5, "marginBottom": 10 }
    },
    "boxModel": { "defaultPadding": 20, "borderRadius": 4, "borderWidth": 2 },
    "layout": { "sectionGap": 24, "columnGutter": 16, "maxWidth": 960 }
}"##;

#[test]
fn parses_minimal_theme() {
    let theme = Theme::from_json(MINIMAL).unwrap();
    assert_eq!(theme.name, "");
    assert_eq!(theme.fonts.heading, "Georgia, serif");
    assert_eq!(theme.colors.accent, "#FF6600");
    assert_eq!(theme.box_model.border_width, 2.0);
    assert_eq!(theme.layout.max_width, 960.0);
    assert!(theme.typography.list_item.is_none());
}

#[test]
fn heading_lookup_by_level() {
    let theme = Theme::from_json(MINIMAL).unwrap();
    let h1 = theme.heading(HeadingLevel::H1).unwrap();
    assert_eq!(h1.font_size, 40.0);
    assert_eq!(h1.font_weight, 800);
    assert_eq!(h1.text_transform.as_deref(), Some("uppercase"));
    assert_eq!(h1.margin_bottom, 0.0);
    assert!(theme.heading(HeadingLevel::H2).is_none());
}

#[test]
fn missing_paragraph_is_an_error() {
    let broken = MINIMAL.replace("\"paragraph\"", "\"para\"");
    assert!(Theme::from_json(&broken).is_err());
}

#[test]
fn default_theme_styles_first_three_heading_levels() {
    let theme = Theme::default();
    for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
        assert!(theme.heading(level).is_some(), "{level:?}");
    }
    for level in [HeadingLevel::H4, HeadingLevel::H5, HeadingLevel::H6] {
        assert!(theme.heading(level).is_none(), "{level:?}");
    }
}

#[test]
fn default_theme_roundtrips_through_json() {
    let theme = Theme::default();
    let text = serde_json::to_string(&theme).unwrap();
    assert_eq!(Theme::from_json(&text).unwrap(), theme);
}
