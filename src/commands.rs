// ABOUTME: Command block extraction for slides
// ABOUTME: Collects shell commands from fenced `commands` code blocks in source order

use comrak::nodes::NodeValue;
use comrak::{Arena, ComrakOptions, parse_document};

/// Info string that marks a fenced block as copyable commands.
pub const COMMANDS_LANG: &str = "commands";

/// Extract every non-blank, trimmed line of each ```commands fenced block.
pub fn extract_commands(content: &str) -> Vec<String> {
    let arena = Arena::new();
    let options = ComrakOptions::default();
    let root = parse_document(&arena, content, &options);

    let mut commands = Vec::new();
    for node in root.descendants() {
        let data = node.data.borrow();
        if let NodeValue::CodeBlock(block) = &data.value {
            if !block.fenced || block.info.trim() != COMMANDS_LANG {
                continue;
            }
            commands.extend(
                block
                    .literal
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            );
        }
    }
    commands
}
