use crate::knowledge::Knowledge;
use crate::tui::logic::selected_visible;
use crate::tui::service::{requests, start_delete, DeleteMessage, Fetcher};
use crate::tui::state::{AppMode, BrainPicker, DeleteProgress, DeleteResultDisplay, KnowledgeTableState};
use anyhow::Result;
use crossterm::event::KeyCode;
use std::sync::mpsc::Receiver;
use std::time::Instant;
use tracing::info;

pub struct ConfirmDeleteContext<'a> {
    pub table: &'a KnowledgeTableState,
    pub brains: &'a BrainPicker,
    pub fetcher: &'a Fetcher,
    pub mode: &'a mut AppMode,
    pub delete_receiver: &'a mut Option<Receiver<DeleteMessage>>,
    pub delete_progress: &'a mut DeleteProgress,
    pub delete_started: &'a mut Option<Instant>,
    pub delete_result: &'a mut Option<DeleteResultDisplay>,
}

/// Only items that are both selected and still visible are deleted.
pub fn items_to_delete(table: &KnowledgeTableState) -> Vec<Knowledge> {
    selected_visible(&table.selection, &table.filtered)
        .into_iter()
        .cloned()
        .collect()
}

pub fn handle_confirm_delete_key(ctx: &mut ConfirmDeleteContext, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('y') | KeyCode::Enter => {
            let items = items_to_delete(ctx.table);
            let Some(brain_id) = ctx.brains.current_id() else {
                *ctx.mode = AppMode::KnowledgeTable;
                return Ok(());
            };
            if items.is_empty() {
                *ctx.mode = AppMode::KnowledgeTable;
                return Ok(());
            }
            info!(brain_id, count = items.len(), "deleting knowledge");
            *ctx.delete_progress = DeleteProgress {
                total: items.len(),
                done: 0,
            };
            *ctx.delete_result = Some(DeleteResultDisplay::default());
            *ctx.delete_started = Some(Instant::now());
            *ctx.delete_receiver = Some(start_delete(
                ctx.fetcher.backend(),
                brain_id.to_string(),
                items,
            ));
            *ctx.mode = AppMode::Deleting;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            *ctx.mode = AppMode::KnowledgeTable;
        }
        _ => {}
    }
    Ok(())
}

pub struct ConfirmBrainRemovalContext<'a> {
    pub brains: &'a BrainPicker,
    pub fetcher: &'a mut Fetcher,
    pub mode: &'a mut AppMode,
    pub status: &'a mut Option<String>,
}

pub fn handle_confirm_brain_removal_key(
    ctx: &mut ConfirmBrainRemovalContext,
    code: KeyCode,
) -> Result<()> {
    match code {
        KeyCode::Char('y') | KeyCode::Enter => {
            if let Some(brain) = ctx.brains.current().cloned() {
                info!(brain_id = %brain.id, owned = brain.is_owned(), "removing brain");
                *ctx.status = Some(format!("Removing {}", brain.name));
                requests::delete_or_leave_brain(ctx.fetcher, brain);
            }
            *ctx.mode = AppMode::KnowledgeTable;
        }
        KeyCode::Char('n') | KeyCode::Esc => *ctx.mode = AppMode::KnowledgeTable,
        _ => {}
    }
    Ok(())
}

pub struct ResultContext<'a> {
    pub mode: &'a mut AppMode,
}

pub fn handle_result_key(ctx: &mut ResultContext, code: KeyCode) -> Result<()> {
    if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
        *ctx.mode = AppMode::KnowledgeTable;
    }
    Ok(())
}

pub struct HelpContext<'a> {
    pub mode: &'a mut AppMode,
    pub prev_mode: &'a mut Option<AppMode>,
}

pub fn open_help(mode: &mut AppMode, prev_mode: &mut Option<AppMode>) {
    *prev_mode = Some(*mode);
    *mode = AppMode::Help;
}

pub fn handle_help_key(ctx: &mut HelpContext, code: KeyCode) -> Result<()> {
    if matches!(code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?')) {
        *ctx.mode = ctx.prev_mode.unwrap_or(AppMode::KnowledgeTable);
        *ctx.prev_mode = None;
    }
    Ok(())
}
