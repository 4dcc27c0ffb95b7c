use crate::tui::controller::common::open_help;
use crate::tui::service::{requests, Fetcher};
use crate::tui::state::{AppMode, SettingsState};
use anyhow::Result;
use crossterm::event::KeyCode;

pub struct SettingsContext<'a> {
    pub settings: &'a mut SettingsState,
    pub fetcher: &'a mut Fetcher,
    pub mode: &'a mut AppMode,
    pub prev_mode: &'a mut Option<AppMode>,
    pub should_quit: &'a mut bool,
}

pub fn handle_settings_key(ctx: &mut SettingsContext, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') => *ctx.should_quit = true,
        KeyCode::Char('k') => ctx.settings.reveal_key = !ctx.settings.reveal_key,
        KeyCode::Char('r') => {
            ctx.settings.loading = true;
            requests::load_user(ctx.fetcher);
        }
        KeyCode::Char('?') => open_help(ctx.mode, ctx.prev_mode),
        _ => {}
    }
    Ok(())
}
