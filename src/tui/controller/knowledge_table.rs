use crate::tui::controller::common::open_help;
use crate::tui::logic::{classify_entry, navigate_down, navigate_up, SortKey};
use crate::tui::service::{requests, Fetcher};
use crate::tui::state::{AppMode, BrainPicker, KnowledgeTableState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct KnowledgeTableContext<'a> {
    pub table: &'a mut KnowledgeTableState,
    pub brains: &'a mut BrainPicker,
    pub fetcher: &'a mut Fetcher,
    pub mode: &'a mut AppMode,
    pub prev_mode: &'a mut Option<AppMode>,
    pub should_quit: &'a mut bool,
    pub status: &'a mut Option<String>,
}

pub fn reload(ctx: &mut KnowledgeTableContext) {
    match ctx.brains.current_id() {
        Some(brain_id) => {
            ctx.table.loading = true;
            requests::load_knowledge(ctx.fetcher, brain_id);
        }
        None => *ctx.status = Some("No brain selected".to_string()),
    }
}

pub fn handle_knowledge_table_key(
    ctx: &mut KnowledgeTableContext,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Result<()> {
    if ctx.table.editing_query {
        handle_query_key(ctx.table, code);
        return Ok(());
    }
    if ctx.table.description_draft.is_some() {
        handle_description_key(ctx, code);
        return Ok(());
    }
    if ctx.table.add_draft.is_some() {
        handle_add_key(ctx, code);
        return Ok(());
    }

    match code {
        KeyCode::Char('q') => *ctx.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => navigate_up(&mut ctx.table.list_state),
        KeyCode::Down | KeyCode::Char('j') => {
            navigate_down(&mut ctx.table.list_state, ctx.table.filtered.len())
        }
        KeyCode::Char('/') => ctx.table.editing_query = true,
        KeyCode::Char('n') => ctx.table.sort_by(SortKey::Name),
        KeyCode::Char('t') => ctx.table.sort_by(SortKey::Status),
        KeyCode::Char(' ') => {
            if let Some(index) = ctx.table.list_state.selected() {
                ctx.table.click(index, modifiers.contains(KeyModifiers::SHIFT));
            }
        }
        KeyCode::Char('v') => {
            if let Some(index) = ctx.table.list_state.selected() {
                ctx.table.click(index, true);
            }
        }
        KeyCode::Char('a') => ctx.table.toggle_all(),
        KeyCode::Char('d') => {
            if ctx.table.selection.is_empty() {
                *ctx.status = Some("Nothing selected".to_string());
            } else {
                *ctx.mode = AppMode::ConfirmDelete;
            }
        }
        KeyCode::Char('e') => {
            let draft = ctx
                .table
                .focused()
                .map(|item| item.description.clone().unwrap_or_default());
            if draft.is_some() {
                ctx.table.description_draft = draft;
            }
        }
        KeyCode::Char('+') => match ctx.brains.current() {
            Some(brain) if brain.accepts_knowledge() => ctx.table.add_draft = Some(String::new()),
            Some(brain) => {
                *ctx.status = Some(format!("{} does not accept new knowledge", brain.name))
            }
            None => *ctx.status = Some("No brain selected".to_string()),
        },
        KeyCode::Char('X') => {
            if ctx.brains.current().is_some() {
                *ctx.mode = AppMode::ConfirmBrainRemoval;
            }
        }
        KeyCode::Char('r') => reload(ctx),
        KeyCode::Tab => {
            ctx.brains.cycle();
            ctx.table.set_items(Vec::new());
            reload(ctx);
        }
        KeyCode::Char('?') => open_help(ctx.mode, ctx.prev_mode),
        _ => {}
    }
    Ok(())
}

/// Left click on a row; shift extends from the anchor.
pub fn handle_knowledge_table_click(
    ctx: &mut KnowledgeTableContext,
    column: u16,
    row: u16,
    modifiers: KeyModifiers,
) {
    if ctx.table.is_editing() {
        return;
    }
    if let Some(index) = ctx.table.row_at(column, row) {
        ctx.table.click(index, modifiers.contains(KeyModifiers::SHIFT));
    }
}

fn handle_query_key(table: &mut KnowledgeTableState, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Enter => table.editing_query = false,
        KeyCode::Backspace => {
            let mut query = table.query.clone();
            query.pop();
            table.set_query(query);
        }
        KeyCode::Char(c) => {
            let query = format!("{}{}", table.query, c);
            table.set_query(query);
        }
        _ => {}
    }
}

fn handle_description_key(ctx: &mut KnowledgeTableContext, code: KeyCode) {
    let Some(draft) = ctx.table.description_draft.as_mut() else {
        return;
    };
    match code {
        KeyCode::Esc => ctx.table.description_draft = None,
        KeyCode::Backspace => {
            draft.pop();
        }
        KeyCode::Char(c) => draft.push(c),
        KeyCode::Enter => {
            let draft = ctx.table.description_draft.take().unwrap_or_default();
            if let Some(item) = ctx.table.focused() {
                let description = Some(draft.trim().to_string()).filter(|d| !d.is_empty());
                requests::update_description(ctx.fetcher, &item.id, description);
            }
        }
        _ => {}
    }
}

/// Enter submits one path or URL; an empty line just closes the input.
fn handle_add_key(ctx: &mut KnowledgeTableContext, code: KeyCode) {
    let Some(draft) = ctx.table.add_draft.as_mut() else {
        return;
    };
    match code {
        KeyCode::Esc => ctx.table.add_draft = None,
        KeyCode::Backspace => {
            draft.pop();
        }
        KeyCode::Char(c) => draft.push(c),
        KeyCode::Enter => {
            let draft = ctx.table.add_draft.take().unwrap_or_default();
            let Some(entry) = classify_entry(&draft) else {
                return;
            };
            if let Some(brain) = ctx.brains.current().cloned() {
                *ctx.status = Some(format!("Adding {}", entry.label()));
                requests::add_to_brain(ctx.fetcher, brain, vec![entry]);
            }
        }
        _ => {}
    }
}
