use crate::knowledge::Knowledge;
use crate::tui::logic::{SortDirection, SortDirective, SortKey};
use crate::tui::state::KnowledgeTableState;
use crate::utils::{format_size_with, truncate_middle};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

const NAME_WIDTH: usize = 40;
const STATUS_WIDTH: usize = 12;

pub fn render_knowledge_table(
    f: &mut Frame,
    area: Rect,
    table: &mut KnowledgeTableState,
    sizes_in_bytes: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_query(f, chunks[0], table);
    render_columns(f, chunks[1], table.sort, table.all_checked);
    render_rows(f, chunks[2], table, sizes_in_bytes);
    render_summary(f, chunks[3], table);
}

fn render_query(f: &mut Frame, area: Rect, table: &KnowledgeTableState) {
    let style = if table.editing_query {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text = if table.query.is_empty() && !table.editing_query {
        "Search knowledge (/)".to_string()
    } else if table.editing_query {
        format!("{}_", table.query)
    } else {
        table.query.clone()
    };
    let line = Line::from(vec![
        Span::styled(" 🔍 ", style),
        Span::styled(text, style),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn sort_marker(sort: SortDirective, key: SortKey) -> &'static str {
    if sort.key != key {
        return "";
    }
    match sort.direction {
        SortDirection::Ascending => " ▲",
        SortDirection::Descending => " ▼",
    }
}

fn render_columns(f: &mut Frame, area: Rect, sort: SortDirective, all_checked: bool) {
    let header = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD);
    let check = if all_checked { "[x]" } else { "[ ]" };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", check), header),
        Span::styled(
            format!(
                "{:<width$}",
                format!("Name{}", sort_marker(sort, SortKey::Name)),
                width = NAME_WIDTH
            ),
            header,
        ),
        Span::styled(
            format!(
                "{:<width$}",
                format!("Status{}", sort_marker(sort, SortKey::Status)),
                width = STATUS_WIDTH
            ),
            header,
        ),
        Span::styled(format!("{:>10}  ", "Size"), header),
        Span::styled("Description", header),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn status_color(status: &str) -> Color {
    match status.to_ascii_uppercase().as_str() {
        "UPLOADED" => Color::Green,
        "PROCESSING" | "RESERVED" => Color::Yellow,
        "ERROR" => Color::Red,
        _ => Color::Gray,
    }
}

fn row<'a>(item: &'a Knowledge, checked: bool, focused: bool, sizes_in_bytes: bool) -> ListItem<'a> {
    let check = if checked { "[x]" } else { "[ ]" };
    let name_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if checked {
        Style::default().fg(Color::White)
    } else {
        Style::default()
    };
    let name = truncate_middle(item.display_name(), NAME_WIDTH - 2);
    let size = item
        .file_size
        .map(|bytes| format_size_with(bytes, sizes_in_bytes))
        .unwrap_or_else(|| "-".to_string());

    ListItem::new(Line::from(vec![
        Span::styled(format!(" {} ", check), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{:<width$}", name, width = NAME_WIDTH), name_style),
        Span::styled(
            format!("{:<width$}", item.status, width = STATUS_WIDTH),
            Style::default().fg(status_color(&item.status)),
        ),
        Span::styled(format!("{:>10}  ", size), Style::default().fg(Color::DarkGray)),
        Span::styled(
            item.description.as_deref().unwrap_or(""),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

fn render_rows(f: &mut Frame, area: Rect, table: &mut KnowledgeTableState, sizes_in_bytes: bool) {
    let block = Block::default().borders(Borders::TOP | Borders::BOTTOM);
    table.list_area = Some(block.inner(area));

    if table.filtered.is_empty() {
        let message = if table.loading {
            "Loading..."
        } else if table.items.is_empty() {
            "This brain has no knowledge yet"
        } else {
            "No knowledge matches the search"
        };
        let empty = Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray)))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let focused = table.list_state.selected();
    let items: Vec<ListItem> = table
        .filtered
        .iter()
        .enumerate()
        .map(|(i, item)| {
            row(
                item,
                table.selection.is_selected(&item.id),
                focused == Some(i),
                sizes_in_bytes,
            )
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));
    f.render_stateful_widget(list, area, &mut table.list_state);
}

fn render_summary(f: &mut Frame, area: Rect, table: &KnowledgeTableState) {
    let mut spans = vec![Span::styled(
        format!(
            " {} of {} shown, {} selected",
            table.filtered.len(),
            table.items.len(),
            table.selection.len()
        ),
        Style::default().fg(Color::Gray),
    )];
    if let Some(draft) = &table.description_draft {
        spans.push(Span::raw("   "));
        spans.push(Span::styled("Description: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!("{}_", draft)));
    }
    if let Some(draft) = &table.add_draft {
        spans.push(Span::raw("   "));
        spans.push(Span::styled("Add file or URL: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!("{}_", draft)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_marker_only_on_active_column() {
        let sort = SortDirective::new(SortKey::Name, SortDirection::Descending);
        assert_eq!(sort_marker(sort, SortKey::Name), " ▼");
        assert_eq!(sort_marker(sort, SortKey::Status), "");
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color("uploaded"), Color::Green);
        assert_eq!(status_color("ERROR"), Color::Red);
        assert_eq!(status_color("whatever"), Color::Gray);
    }
}
