#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    KnowledgeTable,
    Connections,
    BrainWizard,
    Settings,
    Search,
    ConfirmDelete,
    ConfirmBrainRemoval,
    Deleting,
    DeleteResult,
    Help,
}

impl AppMode {
    /// Screens reachable from the tab bar, in tab order.
    pub const SCREENS: [AppMode; 5] = [
        AppMode::KnowledgeTable,
        AppMode::Connections,
        AppMode::BrainWizard,
        AppMode::Settings,
        AppMode::Search,
    ];

    pub fn title(self) -> &'static str {
        match self {
            AppMode::KnowledgeTable => "Knowledge",
            AppMode::Connections => "Connections",
            AppMode::BrainWizard => "New Brain",
            AppMode::Settings => "Settings",
            AppMode::Search => "Ask",
            AppMode::ConfirmDelete
            | AppMode::ConfirmBrainRemoval
            | AppMode::Deleting
            | AppMode::DeleteResult => "Knowledge",
            AppMode::Help => "Help",
        }
    }

    pub fn is_screen(self) -> bool {
        Self::SCREENS.contains(&self)
    }

    /// Overlays draw on top of the knowledge table.
    pub fn base_screen(self) -> AppMode {
        match self {
            AppMode::ConfirmDelete
            | AppMode::ConfirmBrainRemoval
            | AppMode::Deleting
            | AppMode::DeleteResult => AppMode::KnowledgeTable,
            other => other,
        }
    }

    pub fn from_function_key(n: u8) -> Option<AppMode> {
        Self::SCREENS.get(usize::from(n).checked_sub(1)?).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_keys_map_to_screens() {
        assert_eq!(AppMode::from_function_key(1), Some(AppMode::KnowledgeTable));
        assert_eq!(AppMode::from_function_key(5), Some(AppMode::Search));
        assert_eq!(AppMode::from_function_key(0), None);
        assert_eq!(AppMode::from_function_key(6), None);
    }
}
