// ABOUTME: Drawing of the viewer state
// ABOUTME: Renders the current slide, status line, progress bar, notifications and the edit panel

use crate::app::{App, COPY_HOTKEYS};
use crate::markdown::HORIZONTAL_MARGIN;
use crate::theme::Palette;
use crate::utils::truncate_with_ellipsis;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Gauge, Padding, Paragraph, Wrap};
use ratatui::Frame;
use std::path::Path;

const DEFAULT_TITLE: &str = "Slidetty";
const DEFAULT_AUTHOR: &str = "Unknown";
const CHEVRON: &str = "\u{E0B0}";
const STATUS_DARK: Color = Color::Rgb(0x00, 0x00, 0x80);
const STATUS_LIGHT: Color = Color::Rgb(0x1E, 0x3A, 0x8A);
const HELP_COLOR: Color = Color::Rgb(0x94, 0xA3, 0xB8);
const PANEL_BORDER: Color = Color::Rgb(0x7C, 0x3A, 0xED);
const PANEL_BACKGROUND: Color = Color::Rgb(0x0F, 0x17, 0x2A);

/// Draw the whole screen for `app`.
pub fn draw(frame: &mut Frame, app: &App, deck_dir: &Path) {
    let area = frame.area();

    if let Some(message) = app.load_error() {
        let text = format!("Error: {}\n\nPress 'q' to quit, 'r' to retry.", message);
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), area);
        return;
    }
    if app.deck().is_empty() {
        let text = if app.is_loaded() {
            format!("No slides found in {}\n\nPress 'q' to quit.", deck_dir.display())
        } else {
            "Loading slides...\n\nPress 'q' to quit.".to_string()
        };
        frame.render_widget(Paragraph::new(text), area);
        return;
    }

    draw_slide(frame, app, area);

    if app.is_editing() {
        draw_editor(frame, app, area);
    }
}

fn draw_slide(frame: &mut Frame, app: &App, area: Rect) {
    let Some(slide) = app.deck().current() else {
        return;
    };
    let palette = app.renderer().theme().palette().unwrap_or_default();
    let hint_height = u16::from(!slide.commands.is_empty());

    let [content_area, hint_area, status_area, progress_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(hint_height),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let text = match app.renderer().render(&slide.visible_content()) {
        Ok(text) => text,
        Err(e) => Text::raw(format!("Error rendering markdown: {}", e)),
    };
    let body = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(HORIZONTAL_MARGIN / 2)));
    frame.render_widget(body, content_area);

    if hint_height > 0 {
        frame.render_widget(command_hints(&slide.commands, &palette), hint_area);
    }
    draw_status_line(frame, app, status_area);
    draw_progress(frame, app, progress_area, &palette);

    if let Some(message) = app.error() {
        let banner = Rect {
            y: status_area.y.saturating_sub(1 + hint_height),
            height: 1,
            ..status_area
        };
        frame.render_widget(Clear, banner);
        frame.render_widget(
            Paragraph::new(format!("error: {}", message)).style(Style::default().fg(Color::Red)),
            banner,
        );
    }

    if let Some(notification) = app.notification() {
        let width = (notification.message.chars().count() as u16 + 2).min(area.width);
        let toast = Rect {
            x: area.width.saturating_sub(width),
            y: status_area.y.saturating_sub(2 + hint_height),
            width,
            height: 1,
        };
        frame.render_widget(Clear, toast);
        frame.render_widget(
            Paragraph::new(format!(" {} ", notification.message))
                .style(Style::default().fg(Color::White).bg(palette.accent)),
            toast,
        );
    }
}

fn command_hints(commands: &[String], palette: &Palette) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (hotkey, command) in COPY_HOTKEYS.iter().zip(commands) {
        spans.push(Span::styled(
            format!("[{}] ", hotkey),
            Style::default().fg(palette.bullet).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{}  ", truncate_with_ellipsis(command, 24)),
            Style::default().fg(HELP_COLOR),
        ));
    }
    Paragraph::new(Line::from(spans))
}

fn draw_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let deck = app.deck();
    let metadata = deck.metadata();
    let title = metadata.title.as_deref().unwrap_or(DEFAULT_TITLE);
    let author = metadata.author.as_deref().unwrap_or(DEFAULT_AUTHOR);
    let slide_info = format!("Slide {}/{}", deck.current_index() + 1, deck.len());

    let section = area.width.saturating_sub(2) / 3;
    let right_width = area.width.saturating_sub(2 * section + 2);
    let [left, left_chevron, center, right_chevron, right] = Layout::horizontal([
        Constraint::Length(section),
        Constraint::Length(1),
        Constraint::Length(section),
        Constraint::Length(1),
        Constraint::Length(right_width),
    ])
    .areas(area);

    let fit = |text: &str, width: u16| truncate_with_ellipsis(text, usize::from(width.saturating_sub(2)));
    let dark = Style::default().bg(STATUS_DARK).fg(Color::White);
    let light = Style::default().bg(STATUS_LIGHT).fg(Color::White);

    frame.render_widget(
        Paragraph::new(format!(" {}", fit(&slide_info, left.width))).style(dark),
        left,
    );
    frame.render_widget(
        Paragraph::new(CHEVRON).style(Style::default().bg(STATUS_LIGHT).fg(STATUS_DARK)),
        left_chevron,
    );
    frame.render_widget(
        Paragraph::new(fit(author, center.width))
            .alignment(Alignment::Center)
            .style(light),
        center,
    );
    frame.render_widget(
        Paragraph::new(CHEVRON).style(Style::default().bg(STATUS_DARK).fg(STATUS_LIGHT)),
        right_chevron,
    );
    frame.render_widget(
        Paragraph::new(format!("{} ", fit(title, right.width)))
            .alignment(Alignment::Right)
            .style(dark),
        right,
    );
}

fn draw_progress(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let inner = Rect {
        x: area.x + (HORIZONTAL_MARGIN / 2).min(area.width),
        width: area.width.saturating_sub(HORIZONTAL_MARGIN),
        ..area
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(palette.heading).bg(Color::Reset))
        .ratio(app.progress().clamp(0.0, 1.0))
        .label(format!("{:.0}%", app.progress() * 100.0));
    frame.render_widget(gauge, inner);
}

fn draw_editor(frame: &mut Frame, app: &App, area: Rect) {
    let Some(session) = app.editor() else {
        return;
    };
    let layout = session.layout;
    let panel = centered(area, layout.panel_width, layout.panel_height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(PANEL_BORDER))
        .style(Style::default().bg(PANEL_BACKGROUND))
        .padding(Padding::new(2, 2, 1, 1));
    let inner = block.inner(panel);
    frame.render_widget(Clear, panel);
    frame.render_widget(block, panel);

    let mut help = vec![
        Line::from(session.path_label()),
        Line::from(if session.saving {
            "saving..."
        } else {
            "esc to close - ctrl+s to save"
        }),
    ];
    if let Some(message) = app.error() {
        help.push(Line::styled(
            format!("error: {}", message),
            Style::default().fg(Color::Red),
        ));
    }

    let [editor_area, help_area] = Layout::vertical([
        Constraint::Length(layout.editor_height.min(inner.height.saturating_sub(help.len() as u16))),
        Constraint::Min(0),
    ])
    .areas(inner);
    let editor_area = Rect {
        width: layout.editor_width.min(editor_area.width),
        ..editor_area
    };

    frame.render_widget(session.textarea(), editor_area);
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(HELP_COLOR)),
        help_area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
