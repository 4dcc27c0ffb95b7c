use crate::api::Backend;
use crate::config::Config;
use crate::history::HistoryLogger;
use crate::tui::service::{DeleteMessage, Fetcher};
use crate::tui::state::{
    AppMode, BrainPicker, BrainWizardState, ConnectionsState, DeleteProgress, DeleteResultDisplay,
    KnowledgeTableState, SearchBarState, SettingsState,
};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;

pub struct App {
    pub config: Config,
    pub fetcher: Fetcher,
    pub history: HistoryLogger,
    pub mode: AppMode,
    pub prev_mode: Option<AppMode>,
    pub should_quit: bool,
    pub brains: BrainPicker,
    pub table: KnowledgeTableState,
    pub connections: ConnectionsState,
    pub wizard: BrainWizardState,
    pub settings: SettingsState,
    pub search: SearchBarState,
    pub delete_receiver: Option<Receiver<DeleteMessage>>,
    pub delete_started: Option<Instant>,
    pub delete_progress: DeleteProgress,
    pub delete_result: Option<DeleteResultDisplay>,
    /// Last error or notice, shown under the tab bar.
    pub status: Option<String>,
}

impl App {
    pub fn new(config: Config, backend: Arc<dyn Backend>) -> Self {
        Self::with_history(config, backend, HistoryLogger::new())
    }

    pub fn with_history(config: Config, backend: Arc<dyn Backend>, history: HistoryLogger) -> Self {
        Self {
            config,
            fetcher: Fetcher::new(backend),
            history,
            mode: AppMode::KnowledgeTable,
            prev_mode: None,
            should_quit: false,
            brains: BrainPicker::default(),
            table: KnowledgeTableState::default(),
            connections: ConnectionsState::default(),
            wizard: BrainWizardState::default(),
            settings: SettingsState::default(),
            search: SearchBarState::default(),
            delete_receiver: None,
            delete_started: None,
            delete_progress: DeleteProgress::default(),
            delete_result: None,
            status: None,
        }
    }
}
