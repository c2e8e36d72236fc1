use slidetty::deck::{list_slide_files, DeckSource};
use slidetty::theme::Theme;
use slidetty::{load_deck, reload_slide, save_slide, SlideError};
use std::fs;
use tempfile::TempDir;

fn create_deck(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for (name, content) in files {
        fs::write(temp_dir.path().join(name), content).expect("Failed to write deck file");
    }
    temp_dir
}

#[test]
fn test_load_deck_orders_and_excludes_metadata() {
    let temp_dir = create_deck(&[
        ("b.md", "# B"),
        ("A.md", "# A"),
        ("a.md", "# a"),
        ("_title.md", "My Talk\n"),
        ("_author.md", "  Ada  "),
        ("notes.txt", "not a slide"),
    ]);

    let loaded = load_deck(&DeckSource::new(temp_dir.path())).expect("Failed to load deck");
    let names: Vec<String> = loaded
        .slides
        .iter()
        .map(|slide| {
            slide
                .path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect();

    // Case-sensitive: uppercase sorts first
    assert_eq!(names, vec!["A.md", "a.md", "b.md"]);
    assert_eq!(loaded.metadata.title.as_deref(), Some("My Talk"));
    assert_eq!(loaded.metadata.author.as_deref(), Some("Ada"));
    assert_eq!(loaded.metadata.theme, Theme::Auto);
}

#[test]
fn test_load_deck_computes_derived_state() {
    let temp_dir = create_deck(&[(
        "01.md",
        "# Demo\n:reveal:\n- one\n- two\n\n```commands\necho hi\n```\n",
    )]);

    let loaded = load_deck(&DeckSource::new(temp_dir.path())).expect("Failed to load deck");
    let slide = &loaded.slides[0];
    assert_eq!(slide.reveal.total_items(), 2);
    assert_eq!(slide.cursor, 1);
    assert_eq!(slide.commands, vec!["echo hi"]);
}

#[test]
fn test_load_missing_directory_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("nope");
    let result = load_deck(&DeckSource::new(&missing));
    assert!(matches!(result, Err(SlideError::DirectoryReadError { .. })));
}

#[test]
fn test_load_empty_directory() {
    let temp_dir = create_deck(&[("_title.md", "Only metadata")]);
    let loaded = load_deck(&DeckSource::new(temp_dir.path())).expect("Failed to load deck");
    assert!(loaded.slides.is_empty());
}

#[test]
fn test_list_slide_files_with_glob_characters_in_dir() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_dir = temp_dir.path().join("deck [draft]");
    fs::create_dir(&deck_dir).expect("Failed to create deck dir");
    fs::write(deck_dir.join("01.md"), "# one").expect("Failed to write slide");

    let files = list_slide_files(&deck_dir).expect("Failed to list slides");
    assert_eq!(files, vec![deck_dir.join("01.md")]);
}

#[test]
fn test_reload_slide_reads_current_file() {
    let temp_dir = create_deck(&[("01.md", "first"), ("02.md", "second")]);
    let source = DeckSource::new(temp_dir.path());

    fs::write(temp_dir.path().join("02.md"), "second, revised").expect("Failed to rewrite slide");
    let slide = reload_slide(&source, 1).expect("Failed to reload slide");
    assert_eq!(slide.content, "second, revised");
    assert_eq!(slide.path, Some(temp_dir.path().join("02.md")));

    assert!(matches!(
        reload_slide(&source, 5),
        Err(SlideError::InvalidSlideIndex(5))
    ));
}

#[test]
fn test_save_slide_writes_file() {
    let temp_dir = create_deck(&[("01.md", "old")]);
    let path = temp_dir.path().join("01.md");
    save_slide(&path, "new content").expect("Failed to save slide");
    assert_eq!(fs::read_to_string(&path).expect("read back"), "new content");
}

#[test]
fn test_save_slide_into_missing_dir_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("gone").join("01.md");
    let result = save_slide(&path, "content");
    assert!(matches!(result, Err(SlideError::FileWriteError { .. })));
}

#[test]
fn test_theme_override_beats_theme_file() {
    let temp_dir = create_deck(&[("01.md", "# one"), ("_theme.md", "missing.json")]);

    let loaded = load_deck(&DeckSource::new(temp_dir.path())).expect("Failed to load deck");
    assert!(matches!(loaded.metadata.theme, Theme::Invalid(_)));

    let source = DeckSource {
        dir: temp_dir.path().to_path_buf(),
        theme_override: Some("auto".to_string()),
    };
    let loaded = load_deck(&source).expect("Failed to load deck");
    assert_eq!(loaded.metadata.theme, Theme::Auto);
}
