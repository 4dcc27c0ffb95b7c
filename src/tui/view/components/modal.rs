use crate::tui::state::{DeleteProgress, DeleteResultDisplay};
use crate::tui::view::components::centered_rect;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_confirm_delete_modal(f: &mut Frame, selected_count: usize, brain_name: &str) {
    let area = centered_rect(60, 35, f.area());

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(
                format!("{} knowledge items", selected_count),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" from "),
            Span::styled(brain_name.to_string(), Style::default().fg(Color::Cyan)),
            Span::raw("?"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y/Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Confirm     "),
            Span::styled("[n/Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().title(" Confirm Delete ").borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

/// Owners delete the brain for everyone; other members only leave it.
pub fn render_confirm_brain_removal_modal(f: &mut Frame, brain_name: &str, owned: bool) {
    let area = centered_rect(60, 35, f.area());
    let (title, verb, warning) = if owned {
        (
            " Delete Brain ",
            "Delete ",
            "The brain and all its knowledge will be removed.",
        )
    } else {
        (
            " Unsubscribe ",
            "Unsubscribe from ",
            "You will lose access to this brain.",
        )
    };

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(verb),
            Span::styled(
                brain_name.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("?"),
        ]),
        Line::from(""),
        Line::from(Span::styled(warning, Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y/Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Confirm     "),
            Span::styled("[n/Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().title(title).borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

pub fn render_deleting_modal(f: &mut Frame, progress: &DeleteProgress) {
    let area = centered_rect(50, 20, f.area());
    let ratio = if progress.total == 0 {
        0.0
    } else {
        progress.done as f64 / progress.total as f64
    };

    let gauge = Gauge::default()
        .block(Block::default().title(" Deleting ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}/{}", progress.done, progress.total));

    f.render_widget(Clear, area);
    f.render_widget(gauge, area);
}

pub fn render_delete_result_modal(f: &mut Frame, result: Option<&DeleteResultDisplay>) {
    let area = centered_rect(60, 45, f.area());

    let text = if let Some(r) = result {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Delete Complete",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Deleted: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{} items", r.success_count),
                    Style::default().fg(Color::Green),
                ),
            ]),
            Line::from(vec![
                Span::styled("Failed: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{} items", r.failed_count),
                    Style::default().fg(if r.failed_count > 0 {
                        Color::Red
                    } else {
                        Color::Green
                    }),
                ),
            ]),
            Line::from(vec![
                Span::styled("Duration: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{:.2}s", r.duration.as_secs_f64()),
                    Style::default().fg(Color::Gray),
                ),
            ]),
        ];
        for error in r.errors.iter().take(3) {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Enter to continue",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    } else {
        vec![Line::from("No result")]
    };

    let paragraph = Paragraph::new(text)
        .block(Block::default().title(" Result ").borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(Color::Cyan)),
        Span::raw(description.to_string()),
    ])
}

pub fn render_help_modal(f: &mut Frame) {
    let area = centered_rect(65, 75, f.area());

    let help_text = vec![
        Line::from(Span::styled(
            "brainboard Help",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Screens"),
        key_line("F1-F5", "Knowledge, Connections, New Brain, Settings, Ask"),
        key_line("Ctrl+C", "Quit from anywhere"),
        Line::from(""),
        section("Knowledge"),
        key_line("/", "Search by name"),
        key_line("n / t", "Sort by name / status, again to reverse"),
        key_line("Space", "Toggle selection"),
        key_line("Shift+Space", "Select range from last click (also v)"),
        key_line("a", "Select all / none"),
        key_line("d", "Delete selected"),
        key_line("e", "Edit description"),
        key_line("+", "Add a file or URL to the brain"),
        key_line("X", "Delete or leave the brain"),
        key_line("Tab", "Next brain"),
        key_line("r", "Reload"),
        Line::from(""),
        section("Connections"),
        key_line("Enter", "Open connection or folder"),
        key_line("Esc / ⌫", "Parent folder"),
        key_line("Space", "Pick for the next brain"),
        Line::from(""),
        Line::from(Span::styled(
            "Press q, Esc, or ? to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph =
        Paragraph::new(help_text).block(Block::default().title(" Help ").borders(Borders::ALL));

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
