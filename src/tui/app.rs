use crate::tui::state::App;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::Backend, Frame, Terminal};
use std::sync::mpsc::TryRecvError;
use std::time::Duration;
use tracing::{info, warn};

use crate::api::{ApiError, ApiResult};
use crate::tui::controller::brain_wizard::BrainWizardContext;
use crate::tui::controller::common::{
    self, items_to_delete, ConfirmBrainRemovalContext, ConfirmDeleteContext,
};
use crate::tui::controller::connections::ConnectionsContext;
use crate::tui::controller::knowledge_table::KnowledgeTableContext;
use crate::tui::controller::search::SearchContext;
use crate::tui::controller::settings::SettingsContext;
use crate::tui::controller::{
    handle_brain_wizard_key, handle_confirm_brain_removal_key, handle_confirm_delete_key,
    handle_connections_key, handle_help_key,
    handle_knowledge_table_click, handle_knowledge_table_key, handle_result_key,
    handle_search_key, handle_settings_key,
};
use crate::tui::logic::{clamp_focus, navigate_down, navigate_up};
use crate::tui::service::{requests, BrainRemoval, DeleteMessage, FetchKind, FetchOutcome};
use crate::tui::state::{AppMode, ChatLine, ChatRole};
use crate::tui::view::components::footer::{
    render_connections_footer, render_knowledge_footer, render_search_footer,
    render_settings_footer, render_wizard_footer,
};
use crate::tui::view::components::modal::{
    render_confirm_brain_removal_modal, render_confirm_delete_modal, render_delete_result_modal,
    render_deleting_modal, render_help_modal,
};
use crate::tui::view::components::{render_tab_bar, screen_layout, TabBarData};
use crate::tui::view::{
    render_brain_wizard, render_connections, render_knowledge_table, render_search,
    render_settings,
};

impl App {
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        self.start();

        while !self.should_quit {
            self.poll_fetches();
            self.poll_deletes();

            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        self.handle_key(key.code, key.modifiers)?;
                    }
                    Event::Mouse(mouse) if self.config.ui.mouse => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// First requests of a session. Credits and the premium flag gate parts
    /// of the UI, so the user is loaded up front.
    pub fn start(&mut self) {
        requests::load_brains(&mut self.fetcher);
        requests::load_user(&mut self.fetcher);
        self.connections.loading = true;
        requests::load_syncs(&mut self.fetcher);
        self.table.loading = true;
    }

    pub fn poll_fetches(&mut self) {
        for (kind, result) in self.fetcher.poll() {
            self.apply_fetch(kind, result);
        }
    }

    fn apply_fetch(&mut self, kind: FetchKind, result: ApiResult<FetchOutcome>) {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                self.fetch_failed(kind, &e);
                return;
            }
        };

        match outcome {
            FetchOutcome::Brains(brains) => {
                let previous = self.brains.current_id().map(str::to_string);
                self.brains.set_brains(brains);
                if self.brains.current_id() != previous.as_deref() {
                    self.table.set_items(Vec::new());
                    self.reload_knowledge();
                } else if self.brains.current_id().is_none() {
                    self.table.loading = false;
                }
            }
            FetchOutcome::Knowledge { brain_id, items } => {
                if self.brains.current_id() == Some(brain_id.as_str()) {
                    self.table.set_items(items);
                }
            }
            FetchOutcome::KnowledgeUpdated(knowledge) => {
                self.table.replace_item(knowledge);
                self.status = Some("Description saved".to_string());
            }
            FetchOutcome::Syncs(syncs) => {
                self.connections.syncs = syncs;
                self.connections.loading = false;
                if self.connections.current_sync.is_none() {
                    clamp_focus(&mut self.connections.list_state, self.connections.syncs.len());
                }
            }
            FetchOutcome::SyncFiles(elements) => {
                if self.connections.current_sync.is_some() {
                    self.connections.apply_listing(elements);
                }
            }
            FetchOutcome::User { identity, data } => {
                self.settings.identity = Some(identity);
                self.settings.user_data = Some(data);
                self.settings.loading = false;
            }
            FetchOutcome::Chats(chats) => self.search.chats = chats,
            FetchOutcome::Answer { chat, answer } => {
                self.search.searching = false;
                self.search
                    .messages
                    .push(ChatLine::new(ChatRole::Assistant, answer.assistant));
                self.search.chats.insert(0, chat);
            }
            FetchOutcome::BrainCreated(report) => {
                info!(brain_id = %report.brain.id, failed = report.failed.len(), "brain fed");
                self.wizard.creating = false;
                if !report.failed.is_empty() {
                    self.wizard.error =
                        Some(format!("{} item(s) could not be added", report.failed.len()));
                }
                self.brains.brains.push(report.brain.clone());
                self.brains.select_id(&report.brain.id);
                self.wizard.created = Some(report.brain);
                self.connections.selected_files.clear();
                self.table.set_items(Vec::new());
                self.reload_knowledge();
                requests::load_brains(&mut self.fetcher);
            }
            FetchOutcome::KnowledgeAdded(report) => {
                self.status = Some(if report.failed.is_empty() {
                    format!("Added {} item(s) to {}", report.added(), report.brain.name)
                } else {
                    format!("Could not add: {}", report.failed.join("; "))
                });
                if self.brains.current_id() == Some(report.brain.id.as_str()) {
                    self.reload_knowledge();
                }
            }
            FetchOutcome::BrainRemoved { brain_id, removal } => {
                let name = self
                    .brains
                    .brains
                    .iter()
                    .find(|b| b.id == brain_id)
                    .map(|b| b.name.clone())
                    .unwrap_or_else(|| brain_id.clone());
                let was_current = self.brains.current_id() == Some(brain_id.as_str());
                self.brains.remove(&brain_id);
                if was_current {
                    self.table.set_items(Vec::new());
                    self.reload_knowledge();
                }
                self.status = Some(match removal {
                    BrainRemoval::Deleted => format!("Deleted {}", name),
                    BrainRemoval::Unsubscribed => format!("Left {}", name),
                });
            }
        }
    }

    /// The view keeps what it showed before; only the loading flags reset.
    fn fetch_failed(&mut self, kind: FetchKind, error: &ApiError) {
        match kind {
            FetchKind::Brains | FetchKind::Knowledge => self.table.loading = false,
            FetchKind::Syncs => self.connections.loading = false,
            FetchKind::SyncFiles => self.connections.listing_failed(),
            FetchKind::User => self.settings.loading = false,
            FetchKind::Question => {
                self.search.searching = false;
                self.search
                    .messages
                    .push(ChatLine::new(ChatRole::System, error.to_string()));
            }
            FetchKind::BrainCreation => {
                self.wizard.creating = false;
                self.wizard.error = Some(error.to_string());
            }
            FetchKind::KnowledgeUpdate
            | FetchKind::KnowledgeAdd
            | FetchKind::BrainRemoval
            | FetchKind::Chats => {}
        }
        self.status = Some(if error.is_auth() {
            "Not authorized: check the API key".to_string()
        } else {
            error.to_string()
        });
    }

    fn reload_knowledge(&mut self) {
        if let Some(brain_id) = self.brains.current_id() {
            self.table.loading = true;
            requests::load_knowledge(&mut self.fetcher, brain_id);
        }
    }

    pub fn poll_deletes(&mut self) {
        let Some(rx) = self.delete_receiver.as_ref() else {
            return;
        };

        let mut finished = false;
        loop {
            match rx.try_recv() {
                Ok(DeleteMessage::Deleted { knowledge }) => {
                    self.delete_progress.done += 1;
                    if let Some(result) = self.delete_result.as_mut() {
                        result.success_count += 1;
                    }
                    if self.config.history.log_deletions {
                        let brain_id = knowledge
                            .brain_id
                            .as_deref()
                            .or(self.brains.current_id())
                            .unwrap_or("-");
                        if let Err(e) = self.history.log_delete(brain_id, &knowledge) {
                            warn!("failed to write history: {}", e);
                        }
                    }
                }
                Ok(DeleteMessage::Failed { knowledge, error }) => {
                    self.delete_progress.done += 1;
                    if let Some(result) = self.delete_result.as_mut() {
                        result.failed_count += 1;
                        result
                            .errors
                            .push(format!("{}: {}", knowledge.display_name(), error));
                    }
                }
                Ok(DeleteMessage::Done) | Err(TryRecvError::Disconnected) => {
                    finished = true;
                    break;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if finished {
            self.delete_receiver = None;
            if let (Some(result), Some(started)) =
                (self.delete_result.as_mut(), self.delete_started.take())
            {
                result.duration = started.elapsed();
            }
            self.table.selection.clear();
            self.table.all_checked = false;
            self.reload_knowledge();
            self.mode = AppMode::DeleteResult;
        }
    }

    fn switch_to(&mut self, mode: AppMode) {
        match mode {
            AppMode::Connections
                if self.connections.syncs.is_empty() && !self.fetcher.is_pending(FetchKind::Syncs) =>
            {
                self.connections.loading = true;
                requests::load_syncs(&mut self.fetcher);
            }
            AppMode::Settings => {
                self.settings.loading = true;
                requests::load_user(&mut self.fetcher);
            }
            _ => {}
        }
        self.mode = mode;
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }
        if let KeyCode::F(n) = code {
            if self.mode.is_screen() {
                if let Some(mode) = AppMode::from_function_key(n) {
                    self.switch_to(mode);
                }
            }
            return Ok(());
        }
        self.status = None;

        match self.mode {
            AppMode::KnowledgeTable => {
                let mut ctx = KnowledgeTableContext {
                    table: &mut self.table,
                    brains: &mut self.brains,
                    fetcher: &mut self.fetcher,
                    mode: &mut self.mode,
                    prev_mode: &mut self.prev_mode,
                    should_quit: &mut self.should_quit,
                    status: &mut self.status,
                };
                handle_knowledge_table_key(&mut ctx, code, modifiers)
            }
            AppMode::Connections => {
                let mut ctx = ConnectionsContext {
                    connections: &mut self.connections,
                    fetcher: &mut self.fetcher,
                    is_premium: self.settings.is_premium(),
                    mode: &mut self.mode,
                    prev_mode: &mut self.prev_mode,
                    should_quit: &mut self.should_quit,
                    status: &mut self.status,
                };
                handle_connections_key(&mut ctx, code)
            }
            AppMode::BrainWizard => {
                let mut ctx = BrainWizardContext {
                    wizard: &mut self.wizard,
                    connections: &self.connections,
                    fetcher: &mut self.fetcher,
                    mode: &mut self.mode,
                };
                handle_brain_wizard_key(&mut ctx, code)
            }
            AppMode::Settings => {
                let mut ctx = SettingsContext {
                    settings: &mut self.settings,
                    fetcher: &mut self.fetcher,
                    mode: &mut self.mode,
                    prev_mode: &mut self.prev_mode,
                    should_quit: &mut self.should_quit,
                };
                handle_settings_key(&mut ctx, code)
            }
            AppMode::Search => {
                let mut ctx = SearchContext {
                    search: &mut self.search,
                    brains: &mut self.brains,
                    remaining_credits: self.settings.remaining_credits(),
                    fetcher: &mut self.fetcher,
                    status: &mut self.status,
                };
                handle_search_key(&mut ctx, code)
            }
            AppMode::ConfirmDelete => {
                let mut ctx = ConfirmDeleteContext {
                    table: &self.table,
                    brains: &self.brains,
                    fetcher: &self.fetcher,
                    mode: &mut self.mode,
                    delete_receiver: &mut self.delete_receiver,
                    delete_progress: &mut self.delete_progress,
                    delete_started: &mut self.delete_started,
                    delete_result: &mut self.delete_result,
                };
                handle_confirm_delete_key(&mut ctx, code)
            }
            AppMode::ConfirmBrainRemoval => {
                let mut ctx = ConfirmBrainRemovalContext {
                    brains: &self.brains,
                    fetcher: &mut self.fetcher,
                    mode: &mut self.mode,
                    status: &mut self.status,
                };
                handle_confirm_brain_removal_key(&mut ctx, code)
            }
            AppMode::Deleting => Ok(()),
            AppMode::DeleteResult => {
                let mut ctx = common::ResultContext {
                    mode: &mut self.mode,
                };
                handle_result_key(&mut ctx, code)
            }
            AppMode::Help => {
                let mut ctx = common::HelpContext {
                    mode: &mut self.mode,
                    prev_mode: &mut self.prev_mode,
                };
                handle_help_key(&mut ctx, code)
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match (self.mode, mouse.kind) {
            (AppMode::KnowledgeTable, MouseEventKind::Down(MouseButton::Left)) => {
                let mut ctx = KnowledgeTableContext {
                    table: &mut self.table,
                    brains: &mut self.brains,
                    fetcher: &mut self.fetcher,
                    mode: &mut self.mode,
                    prev_mode: &mut self.prev_mode,
                    should_quit: &mut self.should_quit,
                    status: &mut self.status,
                };
                handle_knowledge_table_click(&mut ctx, mouse.column, mouse.row, mouse.modifiers);
            }
            (AppMode::KnowledgeTable, MouseEventKind::ScrollUp) => {
                navigate_up(&mut self.table.list_state)
            }
            (AppMode::KnowledgeTable, MouseEventKind::ScrollDown) => {
                navigate_down(&mut self.table.list_state, self.table.filtered.len())
            }
            _ => {}
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let [tabs, body, footer] = screen_layout(f.area());
        let brain_name = self.brains.current().map(|b| b.name.clone());
        render_tab_bar(
            f,
            tabs,
            &TabBarData {
                mode: self.mode,
                brain_name: brain_name.as_deref(),
                status: self.status.as_deref(),
            },
        );

        let screen = match self.mode {
            AppMode::Help => self
                .prev_mode
                .unwrap_or(AppMode::KnowledgeTable)
                .base_screen(),
            mode => mode.base_screen(),
        };
        match screen {
            AppMode::KnowledgeTable => {
                render_knowledge_table(
                    f,
                    body,
                    &mut self.table,
                    self.config.ui.show_sizes_in_bytes,
                );
                render_knowledge_footer(f, footer, self.table.is_editing());
            }
            AppMode::Connections => {
                render_connections(f, body, &mut self.connections, self.settings.is_premium());
                render_connections_footer(f, footer, self.connections.current_sync.is_some());
            }
            AppMode::BrainWizard => {
                render_brain_wizard(f, body, &self.wizard, &self.connections);
                render_wizard_footer(f, footer, self.wizard.step);
            }
            AppMode::Settings => {
                render_settings(f, body, &self.settings, &self.config);
                render_settings_footer(f, footer);
            }
            AppMode::Search => {
                render_search(
                    f,
                    body,
                    &self.search,
                    &self.brains,
                    self.settings.remaining_credits(),
                );
                render_search_footer(f, footer);
            }
            AppMode::ConfirmDelete
            | AppMode::ConfirmBrainRemoval
            | AppMode::Deleting
            | AppMode::DeleteResult
            | AppMode::Help => {}
        }

        match self.mode {
            AppMode::ConfirmDelete => {
                render_confirm_delete_modal(
                    f,
                    items_to_delete(&self.table).len(),
                    brain_name.as_deref().unwrap_or("this brain"),
                );
            }
            AppMode::ConfirmBrainRemoval => {
                if let Some(brain) = self.brains.current() {
                    render_confirm_brain_removal_modal(f, &brain.name, brain.is_owned());
                }
            }
            AppMode::Deleting => render_deleting_modal(f, &self.delete_progress),
            AppMode::DeleteResult => render_delete_result_modal(f, self.delete_result.as_ref()),
            AppMode::Help => render_help_modal(f),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::api::{Brain, UserData};
    use crate::config::Config;
    use crate::history::HistoryLogger;
    use crate::knowledge::uploaded;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    fn backend() -> FakeBackend {
        let backend = FakeBackend {
            user: UserData {
                email: Some("me@example.com".to_string()),
                remaining_credits: Some(5),
                is_premium: false,
            },
            ..Default::default()
        };
        *backend.brains.lock().unwrap() = vec![Brain {
            id: "brain-1".to_string(),
            name: "Legal".to_string(),
            description: None,
            status: None,
            max_files: Some(10),
            rights: Some("Owner".to_string()),
        }];
        *backend.knowledge.lock().unwrap() = vec![
            uploaded("1", "a.pdf", "UPLOADED"),
            uploaded("2", "b.pdf", "UPLOADED"),
            uploaded("3", "report.pdf", "ERROR"),
        ];
        backend
    }

    fn app(backend: FakeBackend, name: &str) -> (App, std::path::PathBuf) {
        let history_path = std::env::temp_dir().join(format!(
            "brainboard-{}-{}.log",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&history_path);
        let app = App::with_history(
            Config::default(),
            Arc::new(backend),
            HistoryLogger::at(history_path.clone()),
        );
        (app, history_path)
    }

    fn settle(app: &mut App, done: impl Fn(&App) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(app) && Instant::now() < deadline {
            app.poll_fetches();
            app.poll_deletes();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_startup_loads_first_brain_knowledge() {
        let (mut app, _) = app(backend(), "startup");
        app.start();
        settle(&mut app, |app| app.table.items.len() == 3 && app.settings.user_data.is_some());

        assert_eq!(app.brains.current_id(), Some("brain-1"));
        assert_eq!(app.table.filtered.len(), 3);
        assert!(!app.table.loading);
        assert_eq!(app.settings.remaining_credits(), Some(5));
    }

    #[test]
    fn test_delete_flow_reports_partial_failure() {
        let mut backend = backend();
        backend.failing_deletes.insert("2".to_string());
        let (mut app, history_path) = app(backend, "delete");
        app.start();
        settle(&mut app, |app| app.table.items.len() == 3);

        app.handle_key(KeyCode::Char('a'), KeyModifiers::NONE).unwrap();
        app.handle_key(KeyCode::Char('d'), KeyModifiers::NONE).unwrap();
        assert_eq!(app.mode, AppMode::ConfirmDelete);
        app.handle_key(KeyCode::Char('y'), KeyModifiers::NONE).unwrap();
        assert_eq!(app.mode, AppMode::Deleting);

        settle(&mut app, |app| app.mode == AppMode::DeleteResult);
        let result = app.delete_result.clone().unwrap();
        assert_eq!(result.success_count, 2);
        assert_eq!(result.failed_count, 1);
        assert!(app.table.selection.is_empty());

        settle(&mut app, |app| app.table.items.len() == 1);
        assert_eq!(app.table.items[0].id, "2");

        let history = app.history.read_history(None).unwrap();
        assert_eq!(history.len(), 2);
        let _ = std::fs::remove_file(history_path);
    }

    #[test]
    fn test_function_keys_switch_screens_but_not_modals() {
        let (mut app, _) = app(backend(), "fkeys");
        app.handle_key(KeyCode::F(2), KeyModifiers::NONE).unwrap();
        assert_eq!(app.mode, AppMode::Connections);
        assert!(app.fetcher.is_pending(FetchKind::Syncs));

        app.mode = AppMode::ConfirmDelete;
        app.handle_key(KeyCode::F(1), KeyModifiers::NONE).unwrap();
        assert_eq!(app.mode, AppMode::ConfirmDelete);
    }

    #[test]
    fn test_ctrl_c_quits_while_typing() {
        let (mut app, _) = app(backend(), "quit");
        app.mode = AppMode::Search;
        app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE).unwrap();
        assert!(!app.should_quit);
        assert_eq!(app.search.message, "q");
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_unauthorized_fetch_sets_status() {
        let (mut app, _) = app(backend(), "auth");
        app.apply_fetch(FetchKind::Knowledge, Err(ApiError::Unauthorized));
        assert_eq!(
            app.status.as_deref(),
            Some("Not authorized: check the API key")
        );
        assert!(!app.table.loading);
    }

    #[test]
    fn test_failed_brain_list_stops_loading() {
        let (mut app, _) = app(backend(), "brains-failed");
        app.start();
        app.apply_fetch(FetchKind::Brains, Err(ApiError::Unauthorized));
        assert!(!app.table.loading);
        assert_eq!(
            app.status.as_deref(),
            Some("Not authorized: check the API key")
        );
    }

    #[test]
    fn test_added_knowledge_shows_up_after_reload() {
        let (mut app, _) = app(backend(), "add");
        app.start();
        settle(&mut app, |app| app.table.items.len() == 3);

        app.handle_key(KeyCode::Char('+'), KeyModifiers::NONE).unwrap();
        for c in "https://example.com".chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE).unwrap();
        }
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

        settle(&mut app, |app| {
            app.status.as_deref().is_some_and(|s| s.starts_with("Added"))
        });
        assert_eq!(app.status.as_deref(), Some("Added 1 item(s) to Legal"));
    }

    #[test]
    fn test_deleting_current_brain_clears_table() {
        let (mut app, _) = app(backend(), "remove-brain");
        app.start();
        settle(&mut app, |app| app.table.items.len() == 3);

        app.handle_key(KeyCode::Char('X'), KeyModifiers::NONE).unwrap();
        assert_eq!(app.mode, AppMode::ConfirmBrainRemoval);
        app.handle_key(KeyCode::Char('y'), KeyModifiers::NONE).unwrap();
        assert_eq!(app.mode, AppMode::KnowledgeTable);

        settle(&mut app, |app| app.brains.brains.is_empty());
        assert_eq!(app.brains.current_id(), None);
        assert!(app.table.items.is_empty());
        assert_eq!(app.status.as_deref(), Some("Deleted Legal"));
    }
}
