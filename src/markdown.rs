// ABOUTME: Markdown to styled terminal text
// ABOUTME: Walks the comrak AST and produces ratatui lines styled by the active theme palette

use crate::errors::{Result, SlideError};
use crate::theme::{Palette, Theme};
use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Columns reserved around the slide body.
pub const HORIZONTAL_MARGIN: u16 = 4;
const MIN_WRAP: usize = 20;

/// Renders slide markdown for one terminal width and theme.
///
/// Cheap to build; the viewer rebuilds it on every resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownRenderer {
    wrap: usize,
    theme: Theme,
}

impl MarkdownRenderer {
    pub fn new(width: u16, theme: &Theme) -> Self {
        let wrap = usize::from(width.saturating_sub(HORIZONTAL_MARGIN)).max(MIN_WRAP);
        Self {
            wrap,
            theme: theme.clone(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn render(&self, markdown: &str) -> Result<Text<'static>> {
        let palette = match &self.theme {
            Theme::Invalid(message) => return Err(SlideError::RenderError(message.clone())),
            theme => theme.palette().unwrap_or_default(),
        };

        let arena = Arena::new();
        let mut options = ComrakOptions::default();
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        let root = parse_document(&arena, markdown, &options);

        let writer = BlockWriter {
            palette,
            wrap: self.wrap,
        };
        let lines = writer.block(root);
        Ok(Text::from(lines))
    }
}

struct BlockWriter {
    palette: Palette,
    wrap: usize,
}

impl BlockWriter {
    fn text_style(&self) -> Style {
        Style::default().fg(self.palette.text)
    }

    fn block<'a>(&self, node: &'a AstNode<'a>) -> Vec<Line<'static>> {
        let data = node.data.borrow();
        match &data.value {
            NodeValue::Document | NodeValue::BlockQuote => {
                let lines = self.children_separated(node, true);
                if matches!(data.value, NodeValue::BlockQuote) {
                    let bar = Span::styled("│ ", Style::default().fg(self.palette.quote));
                    prefix_lines(lines, bar.clone(), bar)
                } else {
                    lines
                }
            }
            NodeValue::Paragraph => self.inline_lines(node, self.text_style()),
            NodeValue::Heading(heading) => {
                let style = Style::default()
                    .fg(self.palette.heading)
                    .add_modifier(Modifier::BOLD);
                let marker = format!("{} ", "#".repeat(heading.level as usize));
                let mut lines = self.inline_lines(node, style);
                if let Some(first) = lines.first_mut() {
                    first.spans.insert(0, Span::styled(marker, style));
                }
                lines
            }
            NodeValue::List(list) => {
                let mut number = list.start;
                let delimiter = match list.delimiter {
                    ListDelimType::Period => '.',
                    ListDelimType::Paren => ')',
                };
                let mut out = Vec::new();
                for item in node.children() {
                    let marker = match list.list_type {
                        ListType::Bullet => "• ".to_string(),
                        ListType::Ordered => format!("{}{} ", number, delimiter),
                    };
                    number += 1;
                    if !list.tight && !out.is_empty() {
                        out.push(Line::default());
                    }
                    let indent = " ".repeat(marker.chars().count());
                    let first = Span::styled(marker, Style::default().fg(self.palette.bullet));
                    let rest = Span::raw(indent);
                    let body = self.children_separated(item, !list.tight);
                    out.extend(prefix_lines(body, first, rest));
                }
                out
            }
            NodeValue::CodeBlock(code) => {
                let style = Style::default().fg(self.palette.code);
                code.literal
                    .trim_end_matches('\n')
                    .split('\n')
                    .map(|line| Line::from(Span::styled(format!("  {}", line), style)))
                    .collect()
            }
            NodeValue::HtmlBlock(html) => html
                .literal
                .trim_end_matches('\n')
                .split('\n')
                .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(self.palette.quote))))
                .collect(),
            NodeValue::ThematicBreak => vec![Line::from(Span::styled(
                "─".repeat(self.wrap),
                Style::default().fg(self.palette.rule),
            ))],
            NodeValue::Table(..) => self.table(node),
            _ => self.children_separated(node, false),
        }
    }

    fn children_separated<'a>(&self, node: &'a AstNode<'a>, blank_between: bool) -> Vec<Line<'static>> {
        let mut out: Vec<Line<'static>> = Vec::new();
        for child in node.children() {
            let lines = self.block(child);
            if lines.is_empty() {
                continue;
            }
            if blank_between && !out.is_empty() {
                out.push(Line::default());
            }
            out.extend(lines);
        }
        out
    }

    fn table<'a>(&self, node: &'a AstNode<'a>) -> Vec<Line<'static>> {
        let separator = Span::styled(" │ ", Style::default().fg(self.palette.rule));
        node.children()
            .enumerate()
            .map(|(row_index, row)| {
                let style = if row_index == 0 {
                    self.text_style().add_modifier(Modifier::BOLD)
                } else {
                    self.text_style()
                };
                let mut spans = Vec::new();
                for (cell_index, cell) in row.children().enumerate() {
                    if cell_index > 0 {
                        spans.push(separator.clone());
                    }
                    let mut inline = InlineBuffer::default();
                    self.inline(cell, style, &mut inline);
                    for line in inline.lines {
                        spans.extend(line);
                    }
                }
                Line::from(spans)
            })
            .collect()
    }

    fn inline_lines<'a>(&self, node: &'a AstNode<'a>, style: Style) -> Vec<Line<'static>> {
        let mut buffer = InlineBuffer::default();
        self.inline(node, style, &mut buffer);
        buffer.lines.into_iter().map(Line::from).collect()
    }

    fn inline<'a>(&self, node: &'a AstNode<'a>, style: Style, out: &mut InlineBuffer) {
        for child in node.children() {
            let data = child.data.borrow();
            match &data.value {
                NodeValue::Text(text) => out.push(Span::styled(text.clone(), style)),
                NodeValue::SoftBreak => out.push(Span::styled(" ", style)),
                NodeValue::LineBreak => out.break_line(),
                NodeValue::Code(code) => out.push(Span::styled(
                    code.literal.clone(),
                    style.fg(self.palette.code),
                )),
                NodeValue::HtmlInline(html) => out.push(Span::styled(html.clone(), style)),
                NodeValue::Emph => self.inline(
                    child,
                    style.fg(self.palette.emphasis).add_modifier(Modifier::ITALIC),
                    out,
                ),
                NodeValue::Strong => self.inline(child, style.add_modifier(Modifier::BOLD), out),
                NodeValue::Strikethrough => {
                    self.inline(child, style.add_modifier(Modifier::CROSSED_OUT), out)
                }
                NodeValue::Link(..) => self.inline(
                    child,
                    style.fg(self.palette.link).add_modifier(Modifier::UNDERLINED),
                    out,
                ),
                NodeValue::Image(..) => {
                    let alt = style.fg(self.palette.link);
                    out.push(Span::styled("[image: ", alt));
                    self.inline(child, alt, out);
                    out.push(Span::styled("]", alt));
                }
                _ => self.inline(child, style, out),
            }
        }
    }
}

#[derive(Default)]
struct InlineBuffer {
    lines: Vec<Vec<Span<'static>>>,
}

impl InlineBuffer {
    fn push(&mut self, span: Span<'static>) {
        match self.lines.last_mut() {
            Some(line) => line.push(span),
            None => self.lines.push(vec![span]),
        }
    }

    fn break_line(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(Vec::new());
        }
        self.lines.push(Vec::new());
    }
}

fn prefix_lines(lines: Vec<Line<'static>>, first: Span<'static>, rest: Span<'static>) -> Vec<Line<'static>> {
    if lines.is_empty() {
        return vec![Line::from(first)];
    }
    lines
        .into_iter()
        .enumerate()
        .map(|(index, mut line)| {
            let prefix = if index == 0 { first.clone() } else { rest.clone() };
            line.spans.insert(0, prefix);
            line
        })
        .collect()
}
