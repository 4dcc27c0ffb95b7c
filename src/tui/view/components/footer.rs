use crate::tui::state::WizardStep;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

fn render_hints(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(key.to_string(), Style::default().fg(Color::Cyan)),
                Span::raw(format!(" {}  ", label)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}

pub fn render_knowledge_footer(f: &mut Frame, area: Rect, editing: bool) {
    if editing {
        render_hints(f, area, &[("Enter/Esc", "Done"), ("⌫", "Erase")]);
        return;
    }
    render_hints(
        f,
        area,
        &[
            ("↑↓", "Nav"),
            ("/", "Search"),
            ("n/t", "Sort"),
            ("Space", "Select"),
            ("v", "Range"),
            ("a", "All"),
            ("d", "Delete"),
            ("e", "Describe"),
            ("+", "Add"),
            ("Tab", "Brain"),
            ("?", "Help"),
        ],
    );
}

pub fn render_connections_footer(f: &mut Frame, area: Rect, browsing: bool) {
    if browsing {
        render_hints(
            f,
            area,
            &[
                ("↑↓", "Nav"),
                ("Enter", "Open"),
                ("Esc/⌫", "Back"),
                ("Space", "Pick"),
                ("q", "Quit"),
            ],
        );
    } else {
        render_hints(
            f,
            area,
            &[("↑↓", "Nav"), ("Enter", "Browse"), ("r", "Refresh"), ("q", "Quit")],
        );
    }
}

pub fn render_wizard_footer(f: &mut Frame, area: Rect, step: WizardStep) {
    match step {
        WizardStep::Details => {
            render_hints(f, area, &[("Tab", "Field"), ("Enter", "Next")]);
        }
        WizardStep::Knowledge => render_hints(
            f,
            area,
            &[
                ("Enter", "Add / Next"),
                ("↑↓", "Nav"),
                ("Del", "Remove"),
                ("Esc", "Previous"),
            ],
        ),
        WizardStep::Recap => render_hints(f, area, &[("Enter", "Create"), ("Esc", "Previous")]),
    }
}

pub fn render_settings_footer(f: &mut Frame, area: Rect) {
    render_hints(
        f,
        area,
        &[("k", "Show key"), ("r", "Refresh"), ("?", "Help"), ("q", "Quit")],
    );
}

pub fn render_search_footer(f: &mut Frame, area: Rect) {
    render_hints(
        f,
        area,
        &[("Enter", "Ask"), ("Tab", "Brain"), ("Esc", "History"), ("Ctrl+C", "Quit")],
    );
}
