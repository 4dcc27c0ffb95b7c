use crate::tui::controller::common::open_help;
use crate::tui::logic::{navigate_down, navigate_up};
use crate::tui::service::{requests, Fetcher};
use crate::tui::state::{AppMode, ConnectionsState, FolderMove};
use anyhow::Result;
use crossterm::event::KeyCode;

pub struct ConnectionsContext<'a> {
    pub connections: &'a mut ConnectionsState,
    pub fetcher: &'a mut Fetcher,
    pub is_premium: bool,
    pub mode: &'a mut AppMode,
    pub prev_mode: &'a mut Option<AppMode>,
    pub should_quit: &'a mut bool,
    pub status: &'a mut Option<String>,
}

pub fn handle_connections_key(ctx: &mut ConnectionsContext, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') => *ctx.should_quit = true,
        KeyCode::Char('?') => open_help(ctx.mode, ctx.prev_mode),
        _ if ctx.connections.current_sync.is_none() => handle_sync_list_key(ctx, code),
        _ => handle_browser_key(ctx, code),
    }
    Ok(())
}

fn handle_sync_list_key(ctx: &mut ConnectionsContext, code: KeyCode) {
    let state = &mut *ctx.connections;
    match code {
        KeyCode::Up | KeyCode::Char('k') => navigate_up(&mut state.list_state),
        KeyCode::Down | KeyCode::Char('j') => navigate_down(&mut state.list_state, state.syncs.len()),
        KeyCode::Enter | KeyCode::Right => {
            let Some(index) = state.list_state.selected() else {
                return;
            };
            let Some(sync_id) = state.syncs.get(index).map(|s| s.id) else {
                return;
            };
            state.current_sync = Some(index);
            state.folder_stack.clear();
            state.clear_elements();
            state.loading_first_list = true;
            requests::load_sync_files(ctx.fetcher, sync_id, None);
        }
        KeyCode::Char('r') => {
            state.loading = true;
            requests::load_syncs(ctx.fetcher);
        }
        _ => {}
    }
}

fn handle_browser_key(ctx: &mut ConnectionsContext, code: KeyCode) {
    let state = &mut *ctx.connections;
    if state.loading || state.loading_first_list {
        if matches!(code, KeyCode::Esc) {
            state.leave_connection();
        }
        return;
    }
    let Some(sync_id) = state.current().map(|s| s.id) else {
        return;
    };

    match code {
        KeyCode::Up | KeyCode::Char('k') => navigate_up(&mut state.list_state),
        KeyCode::Down | KeyCode::Char('j') => {
            let rows = state.row_count();
            navigate_down(&mut state.list_state, rows)
        }
        KeyCode::Enter | KeyCode::Right => {
            let Some(element) = state.list_state.selected().and_then(|i| state.row(i)) else {
                return;
            };
            if !element.is_folder {
                return;
            }
            let folder_id = element.id.clone();
            state.pending_move = Some(FolderMove::Open(folder_id.clone()));
            state.loading = true;
            requests::load_sync_files(ctx.fetcher, sync_id, Some(folder_id));
        }
        KeyCode::Backspace | KeyCode::Left | KeyCode::Esc => match state.folder_stack.parent() {
            Some(parent) => {
                state.pending_move = Some(FolderMove::Back);
                state.loading = true;
                requests::load_sync_files(ctx.fetcher, sync_id, parent);
            }
            None => state.leave_connection(),
        },
        KeyCode::Char(' ') => {
            let Some(element) = state.list_state.selected().and_then(|i| state.row(i)) else {
                return;
            };
            if state.is_selectable(element, ctx.is_premium) {
                let id = element.id.clone();
                state.toggle_pick(&id);
            } else {
                *ctx.status = Some("Folders can only be added on a premium plan".to_string());
            }
        }
        _ => {}
    }
}
