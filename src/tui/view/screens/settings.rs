use crate::config::Config;
use crate::tui::state::SettingsState;
use crate::utils::mask_secret;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:<18}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

pub fn render_settings(f: &mut Frame, area: Rect, settings: &SettingsState, config: &Config) {
    let key = match config.api.api_key.as_deref() {
        Some(key) if settings.reveal_key => key.to_string(),
        Some(key) => mask_secret(key),
        None => "not set".to_string(),
    };

    let mut lines = vec![
        Line::from(""),
        field("Email", settings.email().to_string()),
        field("Username", settings.username().to_string()),
    ];
    if config.ui.show_tokens {
        let credits = settings
            .remaining_credits()
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        lines.push(field("Remaining credits", credits));
    }
    if settings.is_premium() {
        lines.push(field("Plan", "premium".to_string()));
    }
    lines.push(Line::from(""));
    lines.push(field("API key", key));
    lines.push(field("Backend", config.api.base_url.clone()));
    lines.push(field("Config file", Config::config_path().display().to_string()));
    if settings.loading {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Loading...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Settings ")),
        area,
    );
}
