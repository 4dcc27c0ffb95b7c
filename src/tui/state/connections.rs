use crate::api::{SyncElement, SyncElements, UserSync};
use crate::tui::logic::{clamp_focus, FolderStack};
use ratatui::widgets::ListState;
use std::collections::{HashMap, HashSet};

/// A folder move that only takes effect once its listing arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderMove {
    Open(String),
    Back,
}

pub struct ConnectionsState {
    pub syncs: Vec<UserSync>,
    /// Index into `syncs` of the connection being browsed.
    pub current_sync: Option<usize>,
    pub folder_stack: FolderStack,
    pub pending_move: Option<FolderMove>,
    pub folders: Vec<SyncElement>,
    pub files: Vec<SyncElement>,
    pub loading: bool,
    pub loading_first_list: bool,
    /// Files picked per connection, fed to the brain wizard.
    pub selected_files: HashMap<i64, HashSet<String>>,
    pub list_state: ListState,
}

impl Default for ConnectionsState {
    fn default() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            syncs: Vec::new(),
            current_sync: None,
            folder_stack: FolderStack::default(),
            pending_move: None,
            folders: Vec::new(),
            files: Vec::new(),
            loading: false,
            loading_first_list: false,
            selected_files: HashMap::new(),
            list_state,
        }
    }
}

impl ConnectionsState {
    pub fn current(&self) -> Option<&UserSync> {
        self.syncs.get(self.current_sync?)
    }

    pub fn set_elements(&mut self, elements: SyncElements) {
        self.folders = elements.folders();
        self.files = elements.documents();
        self.loading = false;
        self.loading_first_list = false;
        self.list_state.select(Some(0));
        let rows = self.row_count();
        clamp_focus(&mut self.list_state, rows);
    }

    /// A listing arrived: the pending move is committed with it.
    pub fn apply_listing(&mut self, elements: SyncElements) {
        match self.pending_move.take() {
            Some(FolderMove::Open(folder_id)) => self.folder_stack.push(folder_id),
            Some(FolderMove::Back) => {
                self.folder_stack.back();
            }
            None => {}
        }
        self.set_elements(elements);
    }

    /// The current listing stays on screen. A connection whose first
    /// listing never arrived has nothing to show, so it is left.
    pub fn listing_failed(&mut self) {
        self.pending_move = None;
        self.loading = false;
        if self.loading_first_list {
            self.leave_connection();
        }
    }

    pub fn clear_elements(&mut self) {
        self.folders.clear();
        self.files.clear();
    }

    pub fn leave_connection(&mut self) {
        self.current_sync = None;
        self.folder_stack.clear();
        self.pending_move = None;
        self.clear_elements();
        self.loading = false;
        self.loading_first_list = false;
        self.list_state.select(Some(0));
    }

    /// Rows while browsing: folders first, then files.
    pub fn row_count(&self) -> usize {
        if self.current_sync.is_some() {
            self.folders.len() + self.files.len()
        } else {
            self.syncs.len()
        }
    }

    pub fn row(&self, index: usize) -> Option<&SyncElement> {
        if index < self.folders.len() {
            self.folders.get(index)
        } else {
            self.files.get(index - self.folders.len())
        }
    }

    pub fn is_empty_folder(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty() && !self.loading && !self.loading_first_list
    }

    /// Folders are importable on premium accounts, and always for Notion
    /// where a page is both a folder and a document.
    pub fn is_selectable(&self, element: &SyncElement, is_premium: bool) -> bool {
        if !element.is_folder {
            return true;
        }
        is_premium || self.current().is_some_and(|sync| sync.provider == "Notion")
    }

    pub fn is_picked(&self, element_id: &str) -> bool {
        self.current()
            .and_then(|sync| self.selected_files.get(&sync.id))
            .is_some_and(|files| files.contains(element_id))
    }

    pub fn toggle_pick(&mut self, element_id: &str) {
        let Some(sync_id) = self.current().map(|sync| sync.id) else {
            return;
        };
        let files = self.selected_files.entry(sync_id).or_default();
        if !files.remove(element_id) {
            files.insert(element_id.to_string());
        }
    }

    pub fn picked_count(&self) -> usize {
        self.selected_files.values().map(HashSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(id: &str, is_folder: bool) -> SyncElement {
        SyncElement {
            id: id.to_string(),
            name: Some(format!("{}-name", id)),
            is_folder,
            icon: None,
            mime_type: None,
            last_modified: None,
        }
    }

    fn browsing(provider: &str) -> ConnectionsState {
        let mut state = ConnectionsState::default();
        state.syncs.push(UserSync {
            id: 7,
            name: "Drive".to_string(),
            provider: provider.to_string(),
            email: None,
        });
        state.current_sync = Some(0);
        state.set_elements(SyncElements {
            files: vec![element("f1", false), element("d1", true), element("f2", false)],
        });
        state
    }

    #[test]
    fn test_folders_listed_before_files() {
        let state = browsing("Google");
        assert_eq!(state.row_count(), 3);
        assert_eq!(state.row(0).map(|e| e.id.as_str()), Some("d1"));
        assert_eq!(state.row(1).map(|e| e.id.as_str()), Some("f1"));
        assert_eq!(state.row(3), None);
    }

    #[test]
    fn test_folder_selectability() {
        let state = browsing("Google");
        let folder = element("d1", true);
        assert!(!state.is_selectable(&folder, false));
        assert!(state.is_selectable(&folder, true));
        assert!(browsing("Notion").is_selectable(&folder, false));
        assert!(state.is_selectable(&element("f1", false), false));
    }

    #[test]
    fn test_pick_toggles_per_connection() {
        let mut state = browsing("Google");
        state.toggle_pick("f1");
        assert!(state.is_picked("f1"));
        assert_eq!(state.picked_count(), 1);
        state.toggle_pick("f1");
        assert!(!state.is_picked("f1"));
    }

    #[test]
    fn test_failed_listing_keeps_previous_rows() {
        let mut state = browsing("Google");
        state.pending_move = Some(FolderMove::Open("d1".to_string()));
        state.loading = true;

        state.listing_failed();
        assert_eq!(state.row_count(), 3);
        assert_eq!(state.folder_stack.depth(), 0);
        assert!(!state.is_empty_folder());
        assert_eq!(state.current_sync, Some(0));
    }

    #[test]
    fn test_failed_first_listing_leaves_connection() {
        let mut state = browsing("Google");
        state.leave_connection();
        state.current_sync = Some(0);
        state.loading_first_list = true;

        state.listing_failed();
        assert_eq!(state.current_sync, None);
    }

    #[test]
    fn test_empty_folder() {
        let mut state = browsing("Google");
        state.set_elements(SyncElements::default());
        assert!(state.is_empty_folder());
        state.loading = true;
        assert!(!state.is_empty_folder());
    }
}
