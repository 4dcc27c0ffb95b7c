use crate::knowledge::Knowledge;
use std::collections::HashSet;

/// Selected item ids plus the anchor for range selection.
///
/// `last_selected_index` indexes into the filtered list the last click was
/// made on. It is `None` before any click and after a reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: HashSet<String>,
    pub last_selected_index: Option<usize>,
}

impl SelectionState {
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.last_selected_index = None;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Click<'a> {
    pub item_id: &'a str,
    pub index: usize,
    /// Shift held: extend from the anchor instead of toggling.
    pub range: bool,
}

fn toggle_selection(selected: &mut HashSet<String>, id: &str) {
    if !selected.remove(id) {
        selected.insert(id.to_string());
    }
}

pub fn update(click: Click, current: &SelectionState, filtered: &[Knowledge]) -> SelectionState {
    let mut next = current.clone();

    match (click.range, current.last_selected_index) {
        (true, Some(anchor)) => {
            let (start, end) = if anchor <= click.index {
                (anchor, click.index)
            } else {
                (click.index, anchor)
            };
            for item in filtered.iter().take(end + 1).skip(start) {
                next.selected.insert(item.id.clone());
            }
        }
        _ => toggle_selection(&mut next.selected, click.item_id),
    }

    next.last_selected_index = Some(click.index);
    next
}

pub fn select_all(filtered: &[Knowledge], checked: bool) -> SelectionState {
    let selected = if checked {
        filtered.iter().map(|item| item.id.clone()).collect()
    } else {
        HashSet::new()
    };

    SelectionState {
        selected,
        last_selected_index: None,
    }
}

/// Selected items that are still visible, in display order.
pub fn selected_visible<'a>(
    selection: &SelectionState,
    filtered: &'a [Knowledge],
) -> Vec<&'a Knowledge> {
    filtered
        .iter()
        .filter(|item| selection.is_selected(&item.id))
        .collect()
}
