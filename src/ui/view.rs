// Widgets for the token line, status line, boundary markers, and deck

use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::render_state::{RenderState, TokenCell};
use crate::app::AppMode;
use crate::line::TokenKind;
use crate::ui::theme::colors;

/// Text a cell occupies on screen. Control whitespace would render as
/// zero-width, so every whitespace character shows as a plain space.
fn display_text(cell: &TokenCell) -> String {
    cell.text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect()
}

fn cell_width(cell: &TokenCell) -> usize {
    display_text(cell).as_str().width()
}

/// Horizontal scroll that keeps the selected token inside `width` columns.
pub fn scroll_offset(state: &RenderState, width: u16) -> u16 {
    let Some(selected) = state.selected else {
        return 0;
    };
    let width = width as usize;
    if width == 0 {
        return 0;
    }
    let start: usize = state.tokens[..selected].iter().map(cell_width).sum();
    let end = start + cell_width(&state.tokens[selected]);
    if end > width {
        (end - width).min(start).min(u16::MAX as usize) as u16
    } else {
        0
    }
}

pub fn render_status_line(state: &RenderState) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(
        state.status.clone(),
        Style::default()
            .fg(colors::text())
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(interim) = &state.interim {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            interim.clone(),
            Style::default()
                .fg(colors::dimmed())
                .add_modifier(Modifier::ITALIC),
        ));
    }
    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Left)
        .style(Style::default().bg(colors::background()))
}

pub fn render_token_line(state: &RenderState) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for cell in &state.tokens {
        let style = if cell.selected {
            Style::default()
                .fg(colors::background())
                .bg(colors::accent())
                .add_modifier(Modifier::BOLD)
        } else if cell.kind == TokenKind::Whitespace {
            Style::default().fg(colors::dimmed())
        } else {
            Style::default().fg(colors::text())
        };
        spans.push(Span::styled(display_text(cell), style));
    }
    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Left)
        .style(Style::default().bg(colors::background()))
}

/// Gutter bar at the line edge; lights up while a boundary flash is live.
pub fn render_boundary_marker(active: bool) -> Paragraph<'static> {
    let style = if active {
        Style::default()
            .fg(colors::accent())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::dimmed())
    };
    Paragraph::new("│").style(style.bg(colors::background()))
}

/// Bottom deck: command input while the deck is open, otherwise the
/// latest notice or nothing.
pub fn render_deck(state: &RenderState) -> Paragraph<'static> {
    let text = match state.mode {
        AppMode::Command => format!("COMMAND {}", state.command_input),
        _ => state.notice.clone().unwrap_or_default(),
    };
    Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(colors::dimmed())),
        )
        .style(Style::default().fg(colors::text()).bg(colors::surface()))
}
