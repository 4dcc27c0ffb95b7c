use crate::tui::service::{requests, Fetcher};
use crate::tui::state::{BrainPicker, ChatLine, ChatRole, SearchBarState};
use anyhow::Result;
use crossterm::event::KeyCode;

pub struct SearchContext<'a> {
    pub search: &'a mut SearchBarState,
    pub brains: &'a mut BrainPicker,
    pub remaining_credits: Option<i64>,
    pub fetcher: &'a mut Fetcher,
    pub status: &'a mut Option<String>,
}

pub fn handle_search_key(ctx: &mut SearchContext, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Enter => submit(ctx),
        KeyCode::Tab => ctx.brains.cycle(),
        KeyCode::Esc => {
            ctx.search.show_history = !ctx.search.show_history;
            if ctx.search.show_history {
                requests::load_chats(ctx.fetcher);
            }
        }
        KeyCode::Backspace => {
            ctx.search.message.pop();
        }
        KeyCode::Char(c) => ctx.search.message.push(c),
        _ => {}
    }
    Ok(())
}

fn submit(ctx: &mut SearchContext) {
    let brain_id = ctx.brains.current_id();
    if !ctx.search.can_submit(ctx.remaining_credits, brain_id.is_some()) {
        if ctx.remaining_credits.is_some_and(|c| c <= 0) {
            *ctx.status = Some("No credits left".to_string());
        }
        return;
    }
    let Some(brain_id) = brain_id else {
        return;
    };

    let question = std::mem::take(&mut ctx.search.message);
    ctx.search.messages.clear();
    ctx.search.messages.push(ChatLine::new(ChatRole::User, question.trim()));
    ctx.search.searching = true;
    ctx.search.show_history = false;
    requests::ask_question(ctx.fetcher, brain_id, &question);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::api::Brain;
    use crate::tui::service::FetchKind;
    use std::sync::Arc;

    fn picker() -> BrainPicker {
        let mut brains = BrainPicker::default();
        brains.set_brains(vec![Brain {
            id: "b1".to_string(),
            name: "Legal".to_string(),
            description: None,
            status: None,
            max_files: None,
            rights: None,
        }]);
        brains
    }

    #[test]
    fn test_submit_sends_question_and_clears_input() {
        let mut search = SearchBarState {
            message: "who signed?".to_string(),
            messages: vec![ChatLine::new(ChatRole::Assistant, "old answer")],
            ..Default::default()
        };
        let mut brains = picker();
        let mut fetcher = Fetcher::new(Arc::new(FakeBackend::default()));
        let mut status = None;
        let mut ctx = SearchContext {
            search: &mut search,
            brains: &mut brains,
            remaining_credits: Some(3),
            fetcher: &mut fetcher,
            status: &mut status,
        };
        handle_search_key(&mut ctx, KeyCode::Enter).unwrap();

        assert!(search.searching);
        assert!(search.message.is_empty());
        assert_eq!(search.messages.len(), 1);
        assert_eq!(search.messages[0].role, ChatRole::User);
        assert!(fetcher.is_pending(FetchKind::Question));
    }

    #[test]
    fn test_no_credits_blocks_submit() {
        let mut search = SearchBarState {
            message: "who signed?".to_string(),
            ..Default::default()
        };
        let mut brains = picker();
        let mut fetcher = Fetcher::new(Arc::new(FakeBackend::default()));
        let mut status = None;
        let mut ctx = SearchContext {
            search: &mut search,
            brains: &mut brains,
            remaining_credits: Some(0),
            fetcher: &mut fetcher,
            status: &mut status,
        };
        handle_search_key(&mut ctx, KeyCode::Enter).unwrap();

        assert!(!search.searching);
        assert_eq!(search.message, "who signed?");
        assert_eq!(status.as_deref(), Some("No credits left"));
        assert!(!fetcher.is_pending(FetchKind::Question));
    }
}
