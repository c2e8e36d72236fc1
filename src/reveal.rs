// ABOUTME: Progressive reveal engine for slides
// ABOUTME: Parses `:reveal:` directives into reveal units and filters slide text by a reveal cursor

use std::collections::HashSet;

/// Literal marker line that opens a reveal group.
pub const REVEAL_MARKER: &str = ":reveal:";

/// Reveal layout of a single slide, derived purely from its content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealConfig {
    /// Indices of marker lines. Always hidden.
    pub directive_lines: Vec<usize>,
    /// Reveal units in display order, each a list of line indices.
    pub items: Vec<Vec<usize>>,
}

impl RevealConfig {
    /// Total number of reveal units.
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// Smallest cursor value that may be displayed: 1 once any unit exists.
    pub fn min_visible(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            1
        }
    }

    /// Clamp a cursor into `[min_visible, total]`.
    pub fn clamp_cursor(&self, cursor: usize) -> usize {
        cursor.clamp(self.min_visible(), self.total_items())
    }

    pub fn is_empty(&self) -> bool {
        self.directive_lines.is_empty() && self.items.is_empty()
    }
}

/// Scan slide content for `:reveal:` markers and the list blocks that follow them.
///
/// Units from every marker in the slide are appended to one shared sequence.
pub fn analyze_reveal(content: &str) -> RevealConfig {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut config = RevealConfig::default();

    let mut i = 0;
    while i < lines.len() {
        if lines[i].trim() != REVEAL_MARKER {
            i += 1;
            continue;
        }
        config.directive_lines.push(i);
        i += 1;

        while i < lines.len() {
            if lines[i].trim().is_empty() {
                i += 1;
                continue;
            }
            if !is_list_item(lines[i]) {
                break;
            }

            let mut unit = vec![i];
            i += 1;
            while i < lines.len() {
                let line = lines[i];
                if line.trim().is_empty() {
                    // The empty tail after a final newline is not part of any unit
                    if i + 1 < lines.len() {
                        unit.push(i);
                    }
                    i += 1;
                    break;
                }
                if is_list_item(line) || !is_indented(line) {
                    break;
                }
                unit.push(i);
                i += 1;
            }
            config.items.push(unit);
        }
    }

    config
}

/// Filter `content` so that only the first `cursor` reveal units are shown.
///
/// Marker lines never render. When units remain hidden, a placeholder line
/// shaped like the next hidden unit is appended, before any trailing blank lines.
pub fn apply_reveal(content: &str, config: &RevealConfig, cursor: usize) -> String {
    if config.is_empty() {
        return content.to_string();
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let total = config.total_items();
    let visible = visible_units(config, cursor);

    let mut hidden: HashSet<usize> = config.directive_lines.iter().copied().collect();
    for unit in &config.items[visible..] {
        hidden.extend(unit.iter().copied());
    }

    let mut filtered: Vec<String> = lines
        .iter()
        .enumerate()
        .filter(|(idx, _)| !hidden.contains(idx))
        .map(|(_, line)| line.to_string())
        .collect();

    if visible < total {
        let next = config.items[visible]
            .first()
            .and_then(|&idx| lines.get(idx))
            .map(|line| ellipsis_line(line))
            .unwrap_or_else(|| "...".to_string());
        // Keep the placeholder attached to the list, ahead of trailing blank lines
        let trailing = filtered
            .iter()
            .rev()
            .take_while(|line| line.trim().is_empty())
            .count();
        filtered.insert(filtered.len() - trailing, next);
    }

    filtered.join("\n")
}

/// Number of units actually shown for a requested cursor.
pub fn visible_units(config: &RevealConfig, cursor: usize) -> usize {
    let total = config.total_items();
    let mut visible = cursor.min(total);
    if total > 0 && visible == 0 {
        visible = 1;
    }
    visible
}

/// Build the placeholder shown in place of the next hidden unit.
pub fn ellipsis_line(line: &str) -> String {
    let trimmed = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - trimmed.len()];

    if let Some(marker) = bullet_marker(trimmed) {
        return format!("{indent}{marker}...");
    }
    if let Some(prefix) = ordinal_prefix(trimmed) {
        return format!("{indent}{prefix}...");
    }
    format!("{indent}...")
}

/// True when the line (after leading whitespace) starts a bullet or ordinal list item.
pub fn is_list_item(line: &str) -> bool {
    let trimmed = line.trim_start_matches([' ', '\t']);
    if trimmed.is_empty() {
        return false;
    }
    bullet_marker(trimmed).is_some() || ordinal_prefix(trimmed).is_some()
}

fn is_indented(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}

fn bullet_marker(trimmed: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .into_iter()
        .find(|marker| trimmed.starts_with(marker))
        .map(|_| &trimmed[..2])
}

// Matches `N. ` and returns it including the trailing space
fn ordinal_prefix(trimmed: &str) -> Option<&str> {
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    if trimmed[digits..].starts_with(". ") {
        Some(&trimmed[..digits + 2])
    } else {
        None
    }
}
