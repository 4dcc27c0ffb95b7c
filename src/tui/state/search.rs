use crate::api::Chat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone)]
pub struct ChatLine {
    pub role: ChatRole,
    pub content: String,
}

impl ChatLine {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchBarState {
    pub message: String,
    pub searching: bool,
    pub messages: Vec<ChatLine>,
    pub chats: Vec<Chat>,
    pub show_history: bool,
}

impl SearchBarState {
    pub fn placeholder(&self, has_brain: bool) -> &'static str {
        if has_brain {
            "Ask a question..."
        } else {
            "Select a brain first (Tab)"
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.message.trim().is_empty()
    }

    /// A question goes out only with text, credits left, a brain selected
    /// and nothing already in flight. Unknown credits count as none.
    pub fn can_submit(&self, remaining_credits: Option<i64>, has_brain: bool) -> bool {
        !self.is_disabled()
            && remaining_credits.is_some_and(|c| c > 0)
            && has_brain
            && !self.searching
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_gating() {
        let mut state = SearchBarState::default();
        assert!(!state.can_submit(Some(10), true));

        state.message = "What is in the contract?".to_string();
        assert!(state.can_submit(Some(10), true));
        assert!(!state.can_submit(Some(0), true));
        assert!(!state.can_submit(None, true));
        assert!(!state.can_submit(Some(10), false));

        state.searching = true;
        assert!(!state.can_submit(Some(10), true));
    }

    #[test]
    fn test_placeholder_depends_on_brain() {
        let state = SearchBarState::default();
        assert_ne!(state.placeholder(true), state.placeholder(false));
    }
}
