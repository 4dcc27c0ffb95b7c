pub mod app_state;
pub mod brains;
pub mod connections;
pub mod knowledge;
pub mod modes;
pub mod search;
pub mod settings;
pub mod wizard;

pub use app_state::App;
pub use brains::BrainPicker;
pub use connections::{ConnectionsState, FolderMove};
pub use knowledge::{DeleteProgress, DeleteResultDisplay, KnowledgeTableState};
pub use modes::AppMode;
pub use search::{ChatLine, ChatRole, SearchBarState};
pub use settings::SettingsState;
pub use wizard::{BrainWizardState, KnowledgeToFeed, WizardField, WizardStep};
