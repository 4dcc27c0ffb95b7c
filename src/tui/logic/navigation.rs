use ratatui::widgets::ListState;

pub fn navigate_up(list_state: &mut ListState) {
    if let Some(current) = list_state.selected() {
        if current > 0 {
            list_state.select(Some(current - 1));
        }
    }
}

pub fn navigate_down(list_state: &mut ListState, max_items: usize) {
    let max = max_items.saturating_sub(1);
    if let Some(current) = list_state.selected() {
        if current < max {
            list_state.select(Some(current + 1));
        }
    } else if max_items > 0 {
        list_state.select(Some(0));
    }
}

/// Keeps the focused row inside a list that may have shrunk.
pub fn clamp_focus(list_state: &mut ListState, len: usize) {
    match (list_state.selected(), len) {
        (_, 0) => list_state.select(None),
        (Some(current), _) if current >= len => list_state.select(Some(len - 1)),
        (None, _) => list_state.select(Some(0)),
        _ => {}
    }
}

/// Folder ids opened below a connection's root, innermost last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderStack {
    folders: Vec<String>,
}

impl FolderStack {
    pub fn push(&mut self, folder_id: impl Into<String>) {
        self.folders.push(folder_id.into());
    }

    /// Steps back one level. Returns the folder to list next (`None` meaning
    /// the connection root), or `None` overall when already at the root.
    pub fn back(&mut self) -> Option<Option<String>> {
        self.folders.pop()?;
        Some(self.current().map(str::to_string))
    }

    /// Where `back` would go, without moving.
    pub fn parent(&self) -> Option<Option<String>> {
        let (_, above) = self.folders.split_last()?;
        Some(above.last().cloned())
    }

    pub fn current(&self) -> Option<&str> {
        self.folders.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.folders.len()
    }

    pub fn clear(&mut self) {
        self.folders.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_bounds() {
        let mut state = ListState::default();
        state.select(Some(0));
        navigate_up(&mut state);
        assert_eq!(state.selected(), Some(0));
        navigate_down(&mut state, 2);
        navigate_down(&mut state, 2);
        assert_eq!(state.selected(), Some(1));
    }

    #[test]
    fn test_clamp_focus() {
        let mut state = ListState::default();
        state.select(Some(5));
        clamp_focus(&mut state, 3);
        assert_eq!(state.selected(), Some(2));
        clamp_focus(&mut state, 0);
        assert_eq!(state.selected(), None);
        clamp_focus(&mut state, 4);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_folder_stack_back_to_root() {
        let mut stack = FolderStack::default();
        stack.push("docs");
        stack.push("2024");
        assert_eq!(stack.current(), Some("2024"));
        assert_eq!(stack.parent(), Some(Some("docs".to_string())));
        assert_eq!(stack.depth(), 2);

        assert_eq!(stack.back(), Some(Some("docs".to_string())));
        assert_eq!(stack.parent(), Some(None));
        assert_eq!(stack.back(), Some(None));
        assert_eq!(stack.parent(), None);
        assert_eq!(stack.back(), None);
        assert_eq!(stack.depth(), 0);
    }
}
