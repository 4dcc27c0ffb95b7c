use crate::knowledge::Knowledge;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Keep the order the backend returned.
    #[default]
    None,
    Name,
    Status,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::None => "",
            SortKey::Name => "name",
            SortKey::Status => "status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortDirective {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Column header click: the same column flips from ascending to
    /// descending, anything else starts ascending on `key`.
    pub fn toggled(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self { key, direction }
    }

    pub fn label(self) -> &'static str {
        match (self.key, self.direction) {
            (SortKey::None, _) => "Unsorted",
            (SortKey::Name, SortDirection::Ascending) => "Name A-Z",
            (SortKey::Name, SortDirection::Descending) => "Name Z-A",
            (SortKey::Status, SortDirection::Ascending) => "Status ↑",
            (SortKey::Status, SortDirection::Descending) => "Status ↓",
        }
    }
}

fn comparable_value(item: &Knowledge, key: SortKey) -> &str {
    match key {
        SortKey::Name => item.display_name(),
        SortKey::Status => &item.status,
        SortKey::None => "",
    }
}

/// Case-insensitive substring match on the display name.
pub fn matches_query(item: &Knowledge, query: &str) -> bool {
    item.display_name()
        .to_lowercase()
        .contains(&query.to_lowercase())
}

/// Filters `items` by `query` and orders the result by `sort`.
///
/// The input slice is never reordered. Sorting is stable in both directions:
/// descending inverts the comparison, not the output, so entries with equal
/// keys keep their relative order.
pub fn project(items: &[Knowledge], query: &str, sort: SortDirective) -> Vec<Knowledge> {
    let mut filtered: Vec<Knowledge> = items
        .iter()
        .filter(|item| matches_query(item, query))
        .cloned()
        .collect();

    if sort.key != SortKey::None {
        filtered.sort_by(|a, b| compare(a, b, sort));
    }

    filtered
}

pub fn compare(a: &Knowledge, b: &Knowledge, sort: SortDirective) -> Ordering {
    let ordering = comparable_value(a, sort.key).cmp(comparable_value(b, sort.key));
    match sort.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}
