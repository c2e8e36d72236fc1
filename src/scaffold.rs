// ABOUTME: Deck scaffolding for the `init` subcommand
// ABOUTME: Creates a new deck directory with metadata files and example slides

use crate::deck::{AUTHOR_FILE, THEME_FILE, TITLE_FILE};
use crate::errors::{Result, SlideError};
use crate::theme::AUTO_THEME;
use crate::utils;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for a new deck
pub struct ScaffoldConfig {
    pub target: PathBuf,
    pub title: String,
    pub author: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from("slides"),
            title: "My Presentation".to_string(),
            author: "Unknown".to_string(),
        }
    }
}

const WELCOME_SLIDE: &str = "# Welcome

This deck was created by `slidetty init`.

Navigate with the arrow keys or `h` `j` `k` `l`, press `e` to edit a slide,
`r` to reload it from disk and `q` to quit.
";

const REVEAL_SLIDE: &str = "# Progressive reveal

Lists after a `:reveal:` line appear one item at a time.

:reveal:
- Press `j` or down to reveal the next item
- Press `k` or up to hide it again
- Once everything is shown, the next press moves on
";

const COMMANDS_SLIDE: &str = "# Commands

Each line of a `commands` block gets a copy hotkey shown at the bottom.

```commands
echo \"hello from slidetty\"
ls -la
```
";

/// Example slides written by `init`, in deck order.
pub const EXAMPLE_SLIDES: [(&str, &str); 3] = [
    ("01-welcome.md", WELCOME_SLIDE),
    ("02-reveal.md", REVEAL_SLIDE),
    ("03-commands.md", COMMANDS_SLIDE),
];

/// Create a new deck at `config.target`. Fails if anything already exists there.
pub fn scaffold_deck(config: &ScaffoldConfig) -> Result<Vec<PathBuf>> {
    let target = &config.target;
    utils::ensure_path_absent(target)?;
    utils::ensure_directory_exists(target)?;
    info!("Scaffolding deck in {:?}", target);

    let mut written = Vec::new();
    written.push(write_file(target, TITLE_FILE, &format!("{}\n", config.title))?);
    written.push(write_file(target, AUTHOR_FILE, &format!("{}\n", config.author))?);
    written.push(write_file(target, THEME_FILE, &format!("{}\n", AUTO_THEME))?);
    for (name, content) in EXAMPLE_SLIDES {
        written.push(write_file(target, name, content)?);
    }
    Ok(written)
}

fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content).map_err(|e| SlideError::file_write(&path, e))?;
    Ok(path)
}
