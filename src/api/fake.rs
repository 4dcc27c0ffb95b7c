//! In-memory backend used by unit tests.

use super::error::{ApiError, ApiResult};
use super::traits::Backend;
use super::types::{
    Brain, Chat, ChatAnswer, NewBrain, SyncElement, SyncElements, SyncFilesRequest, UserData,
    UserIdentity, UserIdentityUpdate, UserSync,
};
use crate::knowledge::Knowledge;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeBackend {
    pub brains: Mutex<Vec<Brain>>,
    pub knowledge: Mutex<Vec<Knowledge>>,
    pub failing_deletes: HashSet<String>,
    pub deleted: Mutex<Vec<String>>,
    pub syncs: Vec<UserSync>,
    pub folders: HashMap<Option<String>, Vec<SyncElement>>,
    pub uploaded: Mutex<Vec<PathBuf>>,
    pub crawled: Mutex<Vec<String>>,
    pub sync_requests: Mutex<Vec<SyncFilesRequest>>,
    pub identity: Mutex<UserIdentity>,
    pub identity_updates: Mutex<Vec<UserIdentityUpdate>>,
    pub user: UserData,
    pub chats: Mutex<Vec<Chat>>,
    pub questions: Mutex<Vec<(String, String)>>,
    pub unsubscribed: Mutex<Vec<String>>,
}

impl Backend for FakeBackend {
    fn list_brains(&self) -> ApiResult<Vec<Brain>> {
        Ok(self.brains.lock().unwrap().clone())
    }

    fn create_brain(&self, brain: &NewBrain) -> ApiResult<Brain> {
        let mut brains = self.brains.lock().unwrap();
        let created = Brain {
            id: format!("brain-{}", brains.len() + 1),
            name: brain.name.clone(),
            description: Some(brain.description.clone()),
            status: Some("private".to_string()),
            max_files: Some(50),
            rights: Some("Owner".to_string()),
        };
        brains.push(created.clone());
        Ok(created)
    }

    fn delete_brain(&self, brain_id: &str) -> ApiResult<()> {
        let mut brains = self.brains.lock().unwrap();
        let before = brains.len();
        brains.retain(|b| b.id != brain_id);
        if brains.len() == before {
            return Err(ApiError::NotFound(brain_id.to_string()));
        }
        Ok(())
    }

    fn unsubscribe_brain(&self, brain_id: &str) -> ApiResult<()> {
        self.brains.lock().unwrap().retain(|b| b.id != brain_id);
        self.unsubscribed.lock().unwrap().push(brain_id.to_string());
        Ok(())
    }

    fn list_knowledge(&self, brain_id: &str) -> ApiResult<Vec<Knowledge>> {
        Ok(self
            .knowledge
            .lock()
            .unwrap()
            .iter()
            .filter(|k| k.brain_id.as_deref() == Some(brain_id))
            .cloned()
            .collect())
    }

    fn delete_knowledge(&self, _brain_id: &str, knowledge_id: &str) -> ApiResult<()> {
        if self.failing_deletes.contains(knowledge_id) {
            return Err(ApiError::Status {
                status: 500,
                reason: "delete failed".to_string(),
            });
        }
        self.knowledge
            .lock()
            .unwrap()
            .retain(|k| k.id != knowledge_id);
        self.deleted.lock().unwrap().push(knowledge_id.to_string());
        Ok(())
    }

    fn update_knowledge(
        &self,
        knowledge_id: &str,
        description: Option<&str>,
    ) -> ApiResult<Knowledge> {
        let mut knowledge = self.knowledge.lock().unwrap();
        let item = knowledge
            .iter_mut()
            .find(|k| k.id == knowledge_id)
            .ok_or(ApiError::NothingUpdated)?;
        item.description = description.map(str::to_string);
        Ok(item.clone())
    }

    fn upload_document(&self, _brain_id: &str, path: &Path) -> ApiResult<()> {
        self.uploaded.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn crawl_url(&self, _brain_id: &str, url: &str) -> ApiResult<()> {
        self.crawled.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn list_syncs(&self) -> ApiResult<Vec<UserSync>> {
        Ok(self.syncs.clone())
    }

    fn list_sync_files(
        &self,
        _user_sync_id: i64,
        folder_id: Option<&str>,
    ) -> ApiResult<SyncElements> {
        let files = self
            .folders
            .get(&folder_id.map(str::to_string))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(folder_id.unwrap_or("root").to_string()))?;
        Ok(SyncElements { files })
    }

    fn add_sync_files(&self, request: &SyncFilesRequest) -> ApiResult<()> {
        self.sync_requests.lock().unwrap().push(request.clone());
        Ok(())
    }

    fn user_identity(&self) -> ApiResult<UserIdentity> {
        Ok(self.identity.lock().unwrap().clone())
    }

    fn update_user_identity(&self, update: &UserIdentityUpdate) -> ApiResult<UserIdentity> {
        self.identity_updates.lock().unwrap().push(update.clone());
        let mut identity = self.identity.lock().unwrap();
        identity.username = Some(update.username.clone());
        identity.onboarded = update.onboarded;
        Ok(identity.clone())
    }

    fn user_data(&self) -> ApiResult<UserData> {
        Ok(self.user.clone())
    }

    fn list_chats(&self) -> ApiResult<Vec<Chat>> {
        Ok(self.chats.lock().unwrap().clone())
    }

    fn create_chat(&self, name: &str) -> ApiResult<Chat> {
        let mut chats = self.chats.lock().unwrap();
        let chat = Chat {
            chat_id: format!("chat-{}", chats.len() + 1),
            chat_name: name.to_string(),
            creation_time: None,
            user_id: None,
        };
        chats.push(chat.clone());
        Ok(chat)
    }

    fn ask_question(&self, chat_id: &str, _brain_id: &str, question: &str) -> ApiResult<ChatAnswer> {
        self.questions
            .lock()
            .unwrap()
            .push((chat_id.to_string(), question.to_string()));
        Ok(ChatAnswer {
            chat_id: Some(chat_id.to_string()),
            user_message: Some(question.to_string()),
            assistant: format!("answer to: {}", question),
            brain_name: None,
        })
    }
}
