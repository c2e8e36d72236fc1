use slidetty::deck::DeckSource;
use slidetty::load_deck;
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slidetty"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_init_creates_loadable_deck() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let target = temp_dir.path().join("talk");
    let target_str = target.to_str().expect("utf-8 path");

    let output = run_command(&["init", target_str, "--title", "Rust Night", "--author", "Ferris"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    assert_eq!(
        fs::read_to_string(target.join("_title.md")).expect("title").trim(),
        "Rust Night"
    );
    assert_eq!(
        fs::read_to_string(target.join("_author.md")).expect("author").trim(),
        "Ferris"
    );
    assert_eq!(
        fs::read_to_string(target.join("_theme.md")).expect("theme").trim(),
        "auto"
    );

    let loaded = load_deck(&DeckSource::new(&target)).expect("Failed to load scaffolded deck");
    assert_eq!(loaded.slides.len(), 3);
    assert!(loaded.slides.iter().any(|slide| slide.reveal.total_items() > 0));
    assert!(loaded.slides.iter().any(|slide| !slide.commands.is_empty()));
}

#[test]
fn test_init_fails_when_target_exists() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let target = temp_dir.path().join("talk");
    let target_str = target.to_str().expect("utf-8 path");

    assert!(run_command(&["init", target_str]).status.success());

    let output = run_command(&["init", target_str]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"), "Unexpected stderr: {}", stderr);
}

#[test]
fn test_scaffold_library_call() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = slidetty::ScaffoldConfig {
        target: temp_dir.path().join("deck"),
        ..Default::default()
    };
    let written = slidetty::scaffold_deck(&config).expect("Failed to scaffold");
    assert_eq!(written.len(), 6);
    assert!(written.iter().all(|path| path.is_file()));
    assert!(matches!(
        slidetty::scaffold_deck(&config),
        Err(slidetty::SlideError::TargetExists(_))
    ));
}
