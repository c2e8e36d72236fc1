use ratatui::style::Color;
use slidetty::theme::{resolve_theme, Palette, Theme};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_auto_and_blank_values() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    assert_eq!(resolve_theme("auto", temp_dir.path()), Theme::Auto);
    assert_eq!(resolve_theme("  auto \n", temp_dir.path()), Theme::Auto);
    assert_eq!(resolve_theme("", temp_dir.path()), Theme::Auto);
    assert_eq!(Theme::Auto.palette(), Some(Palette::default()));
}

#[test]
fn test_theme_file_in_deck_dir() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("dark.json"),
        r##"{ "heading": "red", "code": "#112233" }"##,
    )
    .expect("Failed to write theme");

    let theme = resolve_theme("dark.json", temp_dir.path());
    let palette = theme.palette().expect("Theme should resolve");
    assert!(matches!(theme, Theme::Custom { .. }));
    assert_eq!(palette.heading, Color::Red);
    assert_eq!(palette.code, Color::Rgb(0x11, 0x22, 0x33));
    assert_eq!(palette.bullet, Palette::default().bullet);
}

#[test]
fn test_theme_absolute_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("abs.json");
    fs::write(&path, "{}").expect("Failed to write theme");

    let other_dir = TempDir::new().expect("Failed to create temp dir");
    let theme = resolve_theme(&path.to_string_lossy(), other_dir.path());
    assert_eq!(
        theme,
        Theme::Custom {
            source: path,
            palette: Palette::default()
        }
    );
}

#[test]
fn test_missing_theme_is_invalid() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let theme = resolve_theme("does-not-exist.json", temp_dir.path());
    assert!(matches!(theme, Theme::Invalid(_)));
    assert!(theme.palette().is_none());
}

#[test]
fn test_malformed_theme_is_invalid() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("bad.json"), r#"{ "heading": "not-a-color" }"#)
        .expect("Failed to write theme");
    fs::write(temp_dir.path().join("unknown.json"), r#"{ "sparkle": "red" }"#)
        .expect("Failed to write theme");
    fs::write(temp_dir.path().join("broken.json"), "{ heading").expect("Failed to write theme");

    for name in ["bad.json", "unknown.json", "broken.json"] {
        assert!(
            matches!(resolve_theme(name, temp_dir.path()), Theme::Invalid(_)),
            "{} should be invalid",
            name
        );
    }
}
