pub mod footer;
pub mod modal;

use crate::tui::state::AppMode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Tab bar, body and footer.
pub fn screen_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(2),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

pub struct TabBarData<'a> {
    pub mode: AppMode,
    pub brain_name: Option<&'a str>,
    pub status: Option<&'a str>,
}

pub fn render_tab_bar(f: &mut Frame, area: Rect, data: &TabBarData) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(36)])
        .split(area);

    let titles: Vec<Line> = AppMode::SCREENS
        .iter()
        .enumerate()
        .map(|(i, screen)| {
            Line::from(vec![
                Span::styled(format!("F{} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(screen.title()),
            ])
        })
        .collect();
    let selected = AppMode::SCREENS
        .iter()
        .position(|screen| *screen == data.mode.base_screen())
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .title(Span::styled(
                    " brainboard ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(tabs, chunks[0]);

    let right = match data.status {
        Some(status) => Line::from(Span::styled(status, Style::default().fg(Color::Red))),
        None => Line::from(vec![
            Span::styled("brain: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                data.brain_name.unwrap_or("none"),
                Style::default().fg(Color::Green),
            ),
        ]),
    };
    let info = Paragraph::new(right).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info, chunks[1]);
}
