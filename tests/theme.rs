//! Theme loading and palette tests

use markpad::highlight::{FontFamily, MarkdownPalette, RuleKind};
use markpad::theme::{list_available_themes, load_theme, Color, Theme, BUILTIN_THEMES, DARK_YAML};

#[test]
fn test_color_from_hex_6() {
    let color = Color::from_hex("#1E1E1E").unwrap();
    assert_eq!(color.r, 0x1E);
    assert_eq!(color.g, 0x1E);
    assert_eq!(color.b, 0x1E);
    assert_eq!(color.a, 255);
}

#[test]
fn test_color_from_hex_8() {
    let color = Color::from_hex("#1E1E1E80").unwrap();
    assert_eq!(color.a, 0x80);
}

#[test]
fn test_color_from_hex_invalid() {
    assert!(Color::from_hex("#GGGGGG").is_err());
    assert!(Color::from_hex("").is_err());
}

#[test]
fn test_all_builtin_themes_parse() {
    for builtin in BUILTIN_THEMES {
        let theme = Theme::from_yaml(builtin.yaml)
            .unwrap_or_else(|e| panic!("theme {} failed to parse: {}", builtin.id, e));
        assert!(!theme.name.is_empty());
    }
}

#[test]
fn test_dark_theme_values() {
    let theme = Theme::from_yaml(DARK_YAML).unwrap();
    assert_eq!(theme.name, "Markpad Dark");
    assert_eq!(theme.editor.background, Color::rgb(0x1E, 0x1E, 0x1E));
    assert_eq!(theme.markdown.headers[0], Color::rgb(0x4F, 0xA3, 0xFF));
}

#[test]
fn test_load_unknown_theme_fails() {
    assert!(load_theme("definitely-not-a-theme").is_err());
}

#[test]
fn test_builtins_are_listed() {
    let ids: Vec<_> = list_available_themes().into_iter().map(|t| t.id).collect();
    assert!(ids.contains(&"light".to_string()));
    assert!(ids.contains(&"dark".to_string()));
}

#[test]
fn test_palette_from_theme() {
    let theme = Theme::from_yaml(DARK_YAML).unwrap();
    let palette = MarkdownPalette::from_theme(&theme);

    assert_eq!(palette.base.foreground, theme.editor.foreground);
    assert_eq!(palette.base.background, Some(theme.editor.background));
    assert!(palette.bold.font.bold);
    assert!(palette.italic.font.italic);
    assert_eq!(palette.code_block.font.family, FontFamily::Monospace);
    assert_eq!(
        palette.code_block.background,
        Some(theme.markdown.code_block_background)
    );
    assert_eq!(palette.quote.background, Some(theme.markdown.quote_background));
}

#[test]
fn test_header_levels_get_distinct_styles() {
    let palette = MarkdownPalette::default();
    for level in 1..6 {
        assert_ne!(palette.header(level), palette.header(level + 1));
    }
    // Out-of-range levels clamp
    assert_eq!(palette.header(0), palette.header(1));
    assert_eq!(palette.header(9), palette.header(6));
    assert_eq!(palette.for_rule(RuleKind::Header), palette.header(1));
}
