use crate::tui::logic::recap_counts;
use crate::tui::state::{BrainWizardState, ConnectionsState, WizardField, WizardStep};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_brain_wizard(
    f: &mut Frame,
    area: Rect,
    wizard: &BrainWizardState,
    connections: &ConnectionsState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(5), Constraint::Length(2)])
        .split(area);

    render_steps(f, chunks[0], wizard.step);
    match wizard.step {
        WizardStep::Details => render_details(f, chunks[1], wizard),
        WizardStep::Knowledge => render_knowledge(f, chunks[1], wizard),
        WizardStep::Recap => render_recap(f, chunks[1], wizard, connections),
    }

    let message = if wizard.creating {
        Span::styled("Creating brain...", Style::default().fg(Color::Yellow))
    } else if let Some(brain) = &wizard.created {
        Span::styled(
            format!("Brain \"{}\" created. Press Enter.", brain.name),
            Style::default().fg(Color::Green),
        )
    } else if let Some(error) = &wizard.error {
        Span::styled(error.clone(), Style::default().fg(Color::Red))
    } else {
        Span::raw("")
    };
    f.render_widget(Paragraph::new(Line::from(message)), chunks[2]);
}

fn render_steps(f: &mut Frame, area: Rect, current: WizardStep) {
    let steps = [WizardStep::Details, WizardStep::Knowledge, WizardStep::Recap];
    let spans: Vec<Span> = steps
        .iter()
        .flat_map(|step| {
            let style = if *step == current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if step.index() < current.index() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [
                Span::styled(format!(" {}. {} ", step.index() + 1, step.title()), style),
                Span::raw(" "),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn input<'a>(label: &'a str, value: &'a str, active: bool) -> Paragraph<'a> {
    let border = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text = if active {
        format!("{}_", value)
    } else {
        value.to_string()
    };
    Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", label)),
    )
}

fn render_details(f: &mut Frame, area: Rect, wizard: &BrainWizardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    f.render_widget(
        input("Name", &wizard.name, wizard.field == WizardField::Name),
        chunks[0],
    );
    f.render_widget(
        input(
            "Description",
            &wizard.description,
            wizard.field == WizardField::Description,
        ),
        chunks[1],
    );
}

fn render_knowledge(f: &mut Frame, area: Rect, wizard: &BrainWizardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    f.render_widget(input("File path or URL", &wizard.entry, true), chunks[0]);

    let items: Vec<ListItem> = wizard
        .knowledge_to_feed
        .iter()
        .map(|knowledge| ListItem::new(format!(" {}", knowledge.label())))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" To feed ({}) ", wizard.knowledge_to_feed.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut list_state = ListState::default();
    if !wizard.knowledge_to_feed.is_empty() {
        list_state.select(Some(wizard.focused_entry));
    }
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn render_recap(
    f: &mut Frame,
    area: Rect,
    wizard: &BrainWizardState,
    connections: &ConnectionsState,
) {
    let counts = recap_counts(&wizard.knowledge_to_feed, &connections.selected_files);
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let text = vec![
        Line::from(vec![
            Span::styled("Name: ", label),
            Span::styled(wizard.name.clone(), value),
        ]),
        Line::from(vec![
            Span::styled("Description: ", label),
            Span::raw(wizard.description.clone()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Connections: ", label),
            Span::styled(counts.connections.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Websites: ", label),
            Span::styled(counts.websites.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Documents: ", label),
            Span::styled(counts.documents.to_string(), value),
        ]),
    ];

    f.render_widget(
        Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(" Recap "))
            .wrap(Wrap { trim: true }),
        area,
    );
}
