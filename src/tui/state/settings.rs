use crate::api::{UserData, UserIdentity};

#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    pub identity: Option<UserIdentity>,
    pub user_data: Option<UserData>,
    pub loading: bool,
    pub reveal_key: bool,
}

impl SettingsState {
    pub fn email(&self) -> &str {
        self.identity
            .as_ref()
            .and_then(|i| i.email.as_deref())
            .or_else(|| self.user_data.as_ref().and_then(|d| d.email.as_deref()))
            .unwrap_or("-")
    }

    pub fn username(&self) -> &str {
        self.identity
            .as_ref()
            .and_then(|i| i.username.as_deref())
            .unwrap_or("-")
    }

    pub fn remaining_credits(&self) -> Option<i64> {
        self.user_data.as_ref()?.remaining_credits
    }

    pub fn is_premium(&self) -> bool {
        self.user_data.as_ref().is_some_and(|d| d.is_premium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_falls_back_to_user_data() {
        let state = SettingsState {
            identity: Some(UserIdentity {
                id: "u1".to_string(),
                ..Default::default()
            }),
            user_data: Some(UserData {
                email: Some("me@example.com".to_string()),
                remaining_credits: Some(12),
                is_premium: false,
            }),
            ..Default::default()
        };
        assert_eq!(state.email(), "me@example.com");
        assert_eq!(state.username(), "-");
        assert_eq!(state.remaining_credits(), Some(12));
    }
}
