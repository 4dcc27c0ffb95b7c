use crate::tui::state::{BrainPicker, ChatRole, SearchBarState};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_search(
    f: &mut Frame,
    area: Rect,
    search: &SearchBarState,
    brains: &BrainPicker,
    remaining_credits: Option<i64>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let brain = brains.current().map(|b| b.name.as_str());
    let input = if search.message.is_empty() {
        Span::styled(
            search.placeholder(brain.is_some()),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(format!("{}_", search.message))
    };
    let border = if search.can_submit(remaining_credits, brain.is_some()) {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = format!(" @{} ", brain.unwrap_or("no brain"));
    f.render_widget(
        Paragraph::new(Line::from(input)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        ),
        chunks[0],
    );

    if search.show_history {
        render_history(f, chunks[1], search);
    } else {
        render_messages(f, chunks[1], search);
    }
}

fn render_messages(f: &mut Frame, area: Rect, search: &SearchBarState) {
    let mut lines: Vec<Line> = Vec::new();
    for message in &search.messages {
        let (label, color) = match message.role {
            ChatRole::User => ("you", Color::Cyan),
            ChatRole::Assistant => ("brain", Color::Green),
            ChatRole::System => ("error", Color::Red),
        };
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.extend(message.content.lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(""));
    }
    if search.searching {
        lines.push(Line::from(Span::styled(
            "Thinking...",
            Style::default().fg(Color::Yellow),
        )));
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Answer "))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_history(f: &mut Frame, area: Rect, search: &SearchBarState) {
    let items: Vec<ListItem> = search
        .chats
        .iter()
        .map(|chat| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<24}", chat.creation_time.as_deref().unwrap_or("")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(chat.chat_name.clone()),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(" Chat history ")),
        area,
    );
}
