use crate::knowledge::Knowledge;
use crate::tui::logic::{
    clamp_focus, project, select_all, update_selection, Click, SelectionState, SortDirective,
    SortKey,
};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::time::Duration;

/// Container state for the knowledge table: raw list, the query and sort
/// directive the user chose, and the projection derived from them.
pub struct KnowledgeTableState {
    pub items: Vec<Knowledge>,
    pub filtered: Vec<Knowledge>,
    pub query: String,
    pub sort: SortDirective,
    pub selection: SelectionState,
    pub all_checked: bool,
    pub list_state: ListState,
    pub editing_query: bool,
    pub description_draft: Option<String>,
    /// Path or URL being typed to add to the current brain.
    pub add_draft: Option<String>,
    pub loading: bool,
    /// Rows area of the last frame, used to hit-test mouse clicks.
    pub list_area: Option<Rect>,
}

impl Default for KnowledgeTableState {
    fn default() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            items: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            sort: SortDirective::default(),
            selection: SelectionState::default(),
            all_checked: false,
            list_state,
            editing_query: false,
            description_draft: None,
            add_draft: None,
            loading: false,
            list_area: None,
        }
    }
}

impl KnowledgeTableState {
    /// A fresh list from the backend invalidates the whole selection.
    pub fn set_items(&mut self, items: Vec<Knowledge>) {
        self.items = items;
        self.selection.clear();
        self.all_checked = false;
        self.loading = false;
        self.refresh();
    }

    /// Re-derives the projection. The selected set survives a query or sort
    /// change but the range anchor does not, since its index referred to the
    /// previous projection.
    pub fn refresh(&mut self) {
        self.filtered = project(&self.items, &self.query, self.sort);
        self.selection.last_selected_index = None;
        clamp_focus(&mut self.list_state, self.filtered.len());
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.refresh();
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.sort = self.sort.toggled(key);
        self.refresh();
    }

    pub fn click(&mut self, index: usize, range: bool) {
        let Some(item) = self.filtered.get(index) else {
            return;
        };
        let click = Click {
            item_id: &item.id,
            index,
            range,
        };
        self.selection = update_selection(click, &self.selection, &self.filtered);
        self.list_state.select(Some(index));
    }

    pub fn toggle_all(&mut self) {
        self.all_checked = !self.all_checked;
        self.selection = select_all(&self.filtered, self.all_checked);
    }

    /// True while a text input owns the keyboard.
    pub fn is_editing(&self) -> bool {
        self.editing_query || self.description_draft.is_some() || self.add_draft.is_some()
    }

    pub fn focused(&self) -> Option<&Knowledge> {
        self.filtered.get(self.list_state.selected()?)
    }

    /// Maps a terminal row to an index in the filtered list.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area?;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let index = self.list_state.offset() + usize::from(row - area.y);
        (index < self.filtered.len()).then_some(index)
    }

    pub fn replace_item(&mut self, updated: Knowledge) {
        if let Some(item) = self.items.iter_mut().find(|k| k.id == updated.id) {
            *item = updated.clone();
        }
        if let Some(item) = self.filtered.iter_mut().find(|k| k.id == updated.id) {
            *item = updated;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteResultDisplay {
    pub success_count: usize,
    pub failed_count: usize,
    pub errors: Vec<String>,
    pub duration: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteProgress {
    pub total: usize,
    pub done: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::uploaded;

    fn table() -> KnowledgeTableState {
        let mut table = KnowledgeTableState::default();
        table.set_items(vec![
            uploaded("1", "b.pdf", "UPLOADED"),
            uploaded("2", "a.pdf", "ERROR"),
            uploaded("3", "c.md", "UPLOADED"),
        ]);
        table
    }

    #[test]
    fn test_query_and_sort_rederive_projection() {
        let mut table = table();
        table.sort_by(SortKey::Name);
        let names: Vec<&str> = table.filtered.iter().map(|k| k.display_name()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf", "c.md"]);

        table.set_query("pdf".to_string());
        assert_eq!(table.filtered.len(), 2);
        assert_eq!(table.items.len(), 3);
    }

    #[test]
    fn test_reload_clears_selection() {
        let mut table = table();
        table.click(0, false);
        assert_eq!(table.selection.len(), 1);

        table.set_items(vec![uploaded("9", "z.pdf", "UPLOADED")]);
        assert!(table.selection.is_empty());
        assert_eq!(table.selection.last_selected_index, None);
    }

    #[test]
    fn test_query_change_keeps_selection_but_drops_anchor() {
        let mut table = table();
        table.click(2, false);
        table.set_query("c".to_string());
        assert!(table.selection.is_selected("3"));
        assert_eq!(table.selection.last_selected_index, None);
        assert_eq!(table.list_state.selected(), Some(0));
    }

    #[test]
    fn test_toggle_all() {
        let mut table = table();
        table.toggle_all();
        assert_eq!(table.selection.len(), 3);
        table.toggle_all();
        assert!(table.selection.is_empty());
    }

    #[test]
    fn test_row_hit_testing() {
        let mut table = table();
        table.list_area = Some(Rect::new(0, 4, 40, 10));
        assert_eq!(table.row_at(3, 4), Some(0));
        assert_eq!(table.row_at(3, 6), Some(2));
        assert_eq!(table.row_at(3, 7), None);
        assert_eq!(table.row_at(3, 2), None);
        assert_eq!(table.row_at(45, 5), None);
    }
}
