pub mod navigation;
pub mod projection;
pub mod selection;
pub mod wizard;

pub use navigation::{clamp_focus, navigate_down, navigate_up, FolderStack};
pub use projection::{project, SortDirection, SortDirective, SortKey};
pub use selection::{select_all, selected_visible, update as update_selection, Click, SelectionState};
pub use wizard::{classify_entry, next_step, previous_step, recap_counts};
