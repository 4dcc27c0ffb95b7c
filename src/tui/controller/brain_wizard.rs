use crate::tui::logic::{classify_entry, navigate_down, navigate_up, next_step, previous_step};
use crate::tui::service::{requests, BrainCreation, Fetcher};
use crate::tui::state::{AppMode, BrainWizardState, ConnectionsState, WizardField, WizardStep};
use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;

pub struct BrainWizardContext<'a> {
    pub wizard: &'a mut BrainWizardState,
    pub connections: &'a ConnectionsState,
    pub fetcher: &'a mut Fetcher,
    pub mode: &'a mut AppMode,
}

pub fn handle_brain_wizard_key(ctx: &mut BrainWizardContext, code: KeyCode) -> Result<()> {
    if ctx.wizard.creating {
        return Ok(());
    }
    if ctx.wizard.created.is_some() {
        if matches!(code, KeyCode::Enter | KeyCode::Esc) {
            ctx.wizard.reset();
            *ctx.mode = AppMode::KnowledgeTable;
        }
        return Ok(());
    }

    match ctx.wizard.step {
        WizardStep::Details => handle_details_key(ctx.wizard, code),
        WizardStep::Knowledge => handle_knowledge_key(ctx.wizard, code),
        WizardStep::Recap => match code {
            KeyCode::Enter => submit(ctx),
            KeyCode::Esc => ctx.wizard.step = previous_step(ctx.wizard.step),
            _ => {}
        },
    }
    Ok(())
}

fn handle_details_key(wizard: &mut BrainWizardState, code: KeyCode) {
    match code {
        KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
            wizard.field = match wizard.field {
                WizardField::Name => WizardField::Description,
                WizardField::Description => WizardField::Name,
            };
        }
        KeyCode::Enter => {
            wizard.step = next_step(wizard.step, &wizard.name);
            wizard.error = (wizard.step == WizardStep::Details)
                .then(|| "A brain needs a name".to_string());
        }
        KeyCode::Backspace => {
            wizard.active_input().pop();
        }
        KeyCode::Char(c) => wizard.active_input().push(c),
        _ => {}
    }
}

fn handle_knowledge_key(wizard: &mut BrainWizardState, code: KeyCode) {
    match code {
        KeyCode::Enter => match classify_entry(&wizard.entry) {
            Some(knowledge) => {
                wizard.knowledge_to_feed.push(knowledge);
                wizard.entry.clear();
            }
            None => wizard.step = next_step(wizard.step, &wizard.name),
        },
        KeyCode::Esc => wizard.step = previous_step(wizard.step),
        KeyCode::Up => {
            let mut list_state = ListState::default().with_selected(Some(wizard.focused_entry));
            navigate_up(&mut list_state);
            wizard.focused_entry = list_state.selected().unwrap_or(0);
        }
        KeyCode::Down => {
            let mut list_state = ListState::default().with_selected(Some(wizard.focused_entry));
            navigate_down(&mut list_state, wizard.knowledge_to_feed.len());
            wizard.focused_entry = list_state.selected().unwrap_or(0);
        }
        KeyCode::Delete => {
            if wizard.focused_entry < wizard.knowledge_to_feed.len() {
                wizard.knowledge_to_feed.remove(wizard.focused_entry);
                wizard.focused_entry = wizard
                    .focused_entry
                    .min(wizard.knowledge_to_feed.len().saturating_sub(1));
            }
        }
        KeyCode::Backspace => {
            wizard.entry.pop();
        }
        KeyCode::Char(c) => wizard.entry.push(c),
        _ => {}
    }
}

fn submit(ctx: &mut BrainWizardContext) {
    let request = BrainCreation {
        name: ctx.wizard.name.clone(),
        description: ctx.wizard.description.clone(),
        feed: ctx.wizard.knowledge_to_feed.clone(),
        connections: ctx
            .connections
            .selected_files
            .iter()
            .map(|(sync_id, files)| (*sync_id, files.iter().cloned().collect()))
            .collect(),
    };
    ctx.wizard.creating = true;
    ctx.wizard.error = None;
    requests::create_brain(ctx.fetcher, request);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::tui::service::FetchKind;
    use crate::tui::state::KnowledgeToFeed;
    use std::sync::Arc;

    struct Fixture {
        wizard: BrainWizardState,
        connections: ConnectionsState,
        fetcher: Fetcher,
        mode: AppMode,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                wizard: BrainWizardState::default(),
                connections: ConnectionsState::default(),
                fetcher: Fetcher::new(Arc::new(FakeBackend::default())),
                mode: AppMode::BrainWizard,
            }
        }

        fn key(&mut self, code: KeyCode) {
            let mut ctx = BrainWizardContext {
                wizard: &mut self.wizard,
                connections: &self.connections,
                fetcher: &mut self.fetcher,
                mode: &mut self.mode,
            };
            handle_brain_wizard_key(&mut ctx, code).unwrap();
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.key(KeyCode::Char(c));
            }
        }
    }

    #[test]
    fn test_name_is_required() {
        let mut f = Fixture::new();
        f.key(KeyCode::Enter);
        assert_eq!(f.wizard.step, WizardStep::Details);
        assert!(f.wizard.error.is_some());

        f.type_text("Legal");
        f.key(KeyCode::Tab);
        f.type_text("contracts");
        f.key(KeyCode::Enter);
        assert_eq!(f.wizard.step, WizardStep::Knowledge);
        assert_eq!(f.wizard.name, "Legal");
        assert_eq!(f.wizard.description, "contracts");
        assert!(f.wizard.error.is_none());
    }

    #[test]
    fn test_entries_are_classified_and_removable() {
        let mut f = Fixture::new();
        f.type_text("Legal");
        f.key(KeyCode::Enter);

        f.type_text("https://example.com");
        f.key(KeyCode::Enter);
        f.type_text("nda.pdf");
        f.key(KeyCode::Enter);
        assert_eq!(f.wizard.knowledge_to_feed.len(), 2);
        assert!(matches!(
            f.wizard.knowledge_to_feed[0],
            KnowledgeToFeed::Crawl { .. }
        ));

        f.key(KeyCode::Down);
        f.key(KeyCode::Delete);
        assert_eq!(f.wizard.knowledge_to_feed.len(), 1);
        assert_eq!(f.wizard.focused_entry, 0);

        f.key(KeyCode::Enter);
        assert_eq!(f.wizard.step, WizardStep::Recap);
        f.key(KeyCode::Esc);
        assert_eq!(f.wizard.step, WizardStep::Knowledge);
    }

    #[test]
    fn test_recap_enter_starts_creation() {
        let mut f = Fixture::new();
        f.type_text("Legal");
        f.key(KeyCode::Enter);
        f.key(KeyCode::Enter);
        f.key(KeyCode::Enter);
        assert!(f.wizard.creating);
        assert!(f.fetcher.is_pending(FetchKind::BrainCreation));

        f.key(KeyCode::Esc);
        assert_eq!(f.wizard.step, WizardStep::Recap);
    }
}
