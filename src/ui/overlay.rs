use crate::app::{App, PlayerState};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(app: &App, frame: &mut Frame) {
    let PlayerState::Open { game, expanded } = &app.player else {
        return;
    };

    // Expanded mode takes the whole viewport, normal mode a centered panel.
    let area = if *expanded {
        frame.area()
    } else {
        centered_rect(70, 60, frame.area())
    };

    // Clear the area behind the overlay
    frame.render_widget(Clear, area);

    let frame_status = match &app.frame_error {
        Some(err) => Line::from(vec![
            Span::styled(" Frame: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("failed to load ({err})"),
                Style::default().fg(Color::Red),
            ),
        ]),
        None => Line::from(vec![
            Span::styled(" Frame: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("mounted in {}", app.frame.label()),
                Style::default().fg(Color::Green),
            ),
        ]),
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" ", Style::default()),
            Span::styled(
                game.title.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" ID: ", Style::default().fg(Color::DarkGray)),
            Span::styled(game.id.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Source: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                game.url.as_str(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Thumbnail: ", Style::default().fg(Color::DarkGray)),
            Span::styled(game.thumbnail.as_str(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        frame_status,
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " f",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Fullscreen  "),
            Span::styled(
                "n/p",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Next/Prev  "),
            Span::styled(
                "o",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Browser  "),
            Span::styled(
                "y",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Yank  "),
            Span::styled(
                "Esc",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Close"),
        ]),
    ];

    let title = if *expanded {
        " Now Playing — Fullscreen "
    } else {
        " Now Playing "
    };
    let overlay = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title),
        );
    frame.render_widget(overlay, area);
}

/// Create a centered rectangle using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
