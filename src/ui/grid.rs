use crate::app::{App, InputMode, CARD_HEIGHT, CARD_WIDTH};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + search(3) + grid(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header_text = format!(
        " Arcade Explorer   [{} of {} games]",
        app.filtered.len(),
        app.catalog.len()
    );
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, chunks[0]);

    // ── Search bar ──
    let search_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let search_label = if app.input_mode == InputMode::Editing {
        " 🔍 Search (Enter to apply, Esc to cancel): "
    } else {
        " 🔍 Search (/): "
    };
    let search_text = format!("{}{}", search_label, app.search);
    let search_bar = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(" Search "),
        );
    frame.render_widget(search_bar, chunks[1]);

    // Set cursor position when editing
    if app.input_mode == InputMode::Editing {
        let cursor_x = chunks[1].x + search_label.width() as u16 + app.search.width() as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    // ── Card grid ──
    let first_visible = app.row_offset * app.columns;
    let last_visible = ((app.row_offset + app.visible_rows) * app.columns).min(app.filtered.len());
    let range_info = format!(
        " {}-{} of {} ",
        if app.filtered.is_empty() { 0 } else { first_visible + 1 },
        last_visible,
        app.filtered.len()
    );

    let grid_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Games ")
        .title_bottom(Line::from(range_info).alignment(Alignment::Right));
    let inner = grid_block.inner(chunks[2]);
    frame.render_widget(grid_block, chunks[2]);

    if app.filtered.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No games found matching \"{}\"", app.search),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
    } else {
        render_cards(app, frame, inner);
    }

    // ── Status bar ──
    let status_line = Line::from(vec![
        Span::styled(
            " ↑↓←→",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Navigate  "),
        Span::styled(
            "/",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Search  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Play  "),
        Span::styled(
            "o",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Browser  "),
        Span::styled(
            "?",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Help  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Quit  "),
        Span::styled(
            &app.status_msg,
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let status_bar = Paragraph::new(status_line);
    frame.render_widget(status_bar, chunks[3]);
}

/// Draw the visible window of the card grid into `inner`.
fn render_cards(app: &App, frame: &mut Frame, inner: Rect) {
    let total_rows = app.filtered.len().div_ceil(app.columns);

    for row in 0..app.visible_rows {
        let grid_row = app.row_offset + row;
        if grid_row >= total_rows {
            break;
        }
        for col in 0..app.columns {
            let pos = grid_row * app.columns + col;
            let Some(&entry_idx) = app.filtered.get(pos) else {
                break;
            };
            let entry = &app.catalog.entries()[entry_idx];

            let x = inner.x + col as u16 * CARD_WIDTH;
            let y = inner.y + row as u16 * CARD_HEIGHT;
            if x >= inner.right() || y >= inner.bottom() {
                continue;
            }
            let card = Rect {
                x,
                y,
                width: CARD_WIDTH.min(inner.right() - x),
                height: CARD_HEIGHT.min(inner.bottom() - y),
            };

            let is_selected = pos == app.selected;
            let border_style = if is_selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let title_style = if is_selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let text_width = (card.width as usize).saturating_sub(4);
            let lines = vec![
                Line::from(Span::styled(
                    format!(" {}", truncate_str(&entry.title, text_width)),
                    title_style,
                )),
                Line::from(Span::styled(
                    format!(" {}", truncate_str(host_of(&entry.url), text_width)),
                    Style::default().fg(Color::DarkGray),
                )),
            ];

            let widget = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(Span::styled(
                        format!(" {} ", entry.id),
                        Style::default().fg(Color::DarkGray),
                    )),
            );
            frame.render_widget(widget, card);
        }
    }
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        width += w;
    }
    result.push('…');
    result
}

/// Host part of a URL, for the card's second line.
fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, r)| r);
    rest.split('/').next().unwrap_or(rest)
}
