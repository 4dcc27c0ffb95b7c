use crate::knowledge::RawKnowledge;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brain {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub max_files: Option<u32>,
    /// The user's role on this brain ("Owner", "Viewer", ...).
    #[serde(default)]
    pub rights: Option<String>,
}

impl Brain {
    pub fn is_owned(&self) -> bool {
        self.rights
            .as_deref()
            .is_some_and(|rights| rights.eq_ignore_ascii_case("owner"))
    }

    /// Only owners of a brain with an upload quota may add knowledge to it.
    pub fn accepts_knowledge(&self) -> bool {
        self.is_owned() && self.max_files.is_some_and(|max| max > 0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewBrain {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BrainList {
    #[serde(default)]
    pub brains: Vec<Brain>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KnowledgeList {
    #[serde(default)]
    pub knowledges: Vec<RawKnowledge>,
}

#[derive(Debug, Serialize)]
pub(crate) struct KnowledgeUpdate<'a> {
    pub description: Option<&'a str>,
}

/// A connected external account (Google Drive, Notion, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSync {
    pub id: i64,
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncElement {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_folder: bool,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
}

impl SyncElement {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncElements {
    #[serde(default)]
    pub files: Vec<SyncElement>,
}

impl SyncElements {
    pub fn folders(&self) -> Vec<SyncElement> {
        self.files.iter().filter(|e| e.is_folder).cloned().collect()
    }

    pub fn documents(&self) -> Vec<SyncElement> {
        self.files.iter().filter(|e| !e.is_folder).cloned().collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncFilesRequest {
    pub brain_id: String,
    pub syncs_user_id: i64,
    pub files: Vec<String>,
    pub folders: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub chat_id: String,
    pub chat_name: String,
    #[serde(default)]
    pub creation_time: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatList {
    #[serde(default)]
    pub chats: Vec<Chat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatAnswer {
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub user_message: Option<String>,
    pub assistant: String,
    #[serde(default)]
    pub brain_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub onboarded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserIdentityUpdate {
    pub username: String,
    pub onboarded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub remaining_credits: Option<i64>,
    #[serde(default)]
    pub is_premium: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_elements_split() {
        let elements: SyncElements = serde_json::from_str(
            r#"{"files":[{"id":"1","name":"Docs","is_folder":true},{"id":"2","name":"a.pdf","is_folder":false},{"id":"3","name":"b.pdf"}]}"#,
        )
        .unwrap();
        assert_eq!(elements.folders().len(), 1);
        assert_eq!(elements.documents().len(), 2);
    }

    #[test]
    fn test_only_owned_brains_with_quota_accept_knowledge() {
        let mut brain: Brain =
            serde_json::from_str(r#"{"id":"b1","name":"Legal","rights":"Owner","max_files":10}"#)
                .unwrap();
        assert!(brain.is_owned());
        assert!(brain.accepts_knowledge());

        brain.max_files = Some(0);
        assert!(!brain.accepts_knowledge());

        brain.max_files = Some(10);
        brain.rights = Some("Viewer".to_string());
        assert!(!brain.is_owned());
        assert!(!brain.accepts_knowledge());

        let bare: Brain = serde_json::from_str(r#"{"id":"b2","name":"Sales"}"#).unwrap();
        assert!(!bare.accepts_knowledge());
    }

    #[test]
    fn test_sync_element_without_name() {
        let element: SyncElement = serde_json::from_str(r#"{"id":"9"}"#).unwrap();
        assert_eq!(element.display_name(), "");
        assert!(!element.is_folder);
    }
}
