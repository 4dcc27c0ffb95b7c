use crate::api::SyncElement;
use crate::tui::state::ConnectionsState;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

pub fn render_connections(f: &mut Frame, area: Rect, state: &mut ConnectionsState, is_premium: bool) {
    if state.current_sync.is_some() {
        render_browser(f, area, state, is_premium);
    } else {
        render_sync_list(f, area, state);
    }
}

fn render_sync_list(f: &mut Frame, area: Rect, state: &mut ConnectionsState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Connections ({} files picked) ", state.picked_count()));

    if state.syncs.is_empty() {
        let message = if state.loading {
            "Loading connections..."
        } else {
            "No connection yet. Connect an account from the web app."
        };
        f.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray))).block(block),
            area,
        );
        return;
    }

    let focused = state.list_state.selected();
    let items: Vec<ListItem> = state
        .syncs
        .iter()
        .enumerate()
        .map(|(i, sync)| {
            let style = if focused == Some(i) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let picked = state.selected_files.get(&sync.id).map_or(0, |files| files.len());
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<12}", sync.provider), Style::default().fg(Color::Cyan)),
                Span::styled(sync.name.clone(), style),
                Span::styled(
                    sync.email
                        .as_deref()
                        .map(|e| format!("  {}", e))
                        .unwrap_or_default(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    if picked > 0 {
                        format!("  [{} picked]", picked)
                    } else {
                        String::new()
                    },
                    Style::default().fg(Color::Green),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));
    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn element_line<'a>(
    element: &'a SyncElement,
    picked: bool,
    selectable: bool,
    focused: bool,
) -> ListItem<'a> {
    let check = match (selectable, picked) {
        (false, _) => "   ",
        (true, true) => "[x]",
        (true, false) => "[ ]",
    };
    let icon = if element.is_folder { "▸ " } else { "  " };
    let style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if element.is_folder {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    ListItem::new(Line::from(vec![
        Span::styled(format!(" {} ", check), Style::default().fg(Color::Green)),
        Span::styled(icon, style),
        Span::styled(element.display_name(), style),
        Span::styled(
            element
                .last_modified
                .as_deref()
                .map(|d| format!("  {}", d))
                .unwrap_or_default(),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

fn render_browser(f: &mut Frame, area: Rect, state: &mut ConnectionsState, is_premium: bool) {
    let name = state.current().map(|s| s.name.clone()).unwrap_or_default();
    let path = match state.folder_stack.depth() {
        0 => "/".to_string(),
        depth => format!("/{} level(s) down", depth),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} {} ", name, path));

    if state.loading || state.loading_first_list {
        f.render_widget(
            Paragraph::new(Span::styled("Loading...", Style::default().fg(Color::DarkGray)))
                .block(block),
            area,
        );
        return;
    }
    if state.is_empty_folder() {
        f.render_widget(
            Paragraph::new(Span::styled("Empty folder", Style::default().fg(Color::DarkGray)))
                .block(block),
            area,
        );
        return;
    }

    let focused = state.list_state.selected();
    let items: Vec<ListItem> = state
        .folders
        .iter()
        .chain(state.files.iter())
        .enumerate()
        .map(|(i, element)| {
            element_line(
                element,
                state.is_picked(&element.id),
                state.is_selectable(element, is_premium),
                focused == Some(i),
            )
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut list_state = state.list_state.clone();
    f.render_stateful_widget(list, area, &mut list_state);
    state.list_state = list_state;
}
