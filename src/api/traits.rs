use super::error::ApiResult;
use super::types::{
    Brain, Chat, ChatAnswer, NewBrain, SyncElements, SyncFilesRequest, UserData, UserIdentity,
    UserIdentityUpdate, UserSync,
};
use crate::knowledge::Knowledge;
use std::path::Path;

/// Everything the client asks of the brain backend.
///
/// Implementations are shared with background worker threads, hence the
/// `Send + Sync` bound. Calls are blocking.
pub trait Backend: Send + Sync {
    fn list_brains(&self) -> ApiResult<Vec<Brain>>;
    fn create_brain(&self, brain: &NewBrain) -> ApiResult<Brain>;
    fn delete_brain(&self, brain_id: &str) -> ApiResult<()>;
    /// Drops the user's access to a brain someone else owns.
    fn unsubscribe_brain(&self, brain_id: &str) -> ApiResult<()>;

    /// Malformed records are dropped rather than failing the whole listing.
    fn list_knowledge(&self, brain_id: &str) -> ApiResult<Vec<Knowledge>>;
    fn delete_knowledge(&self, brain_id: &str, knowledge_id: &str) -> ApiResult<()>;
    fn update_knowledge(&self, knowledge_id: &str, description: Option<&str>)
        -> ApiResult<Knowledge>;

    fn upload_document(&self, brain_id: &str, path: &Path) -> ApiResult<()>;
    fn crawl_url(&self, brain_id: &str, url: &str) -> ApiResult<()>;

    fn list_syncs(&self) -> ApiResult<Vec<UserSync>>;
    fn list_sync_files(&self, user_sync_id: i64, folder_id: Option<&str>)
        -> ApiResult<SyncElements>;
    fn add_sync_files(&self, request: &SyncFilesRequest) -> ApiResult<()>;

    fn user_identity(&self) -> ApiResult<UserIdentity>;
    fn update_user_identity(&self, update: &UserIdentityUpdate) -> ApiResult<UserIdentity>;
    fn user_data(&self) -> ApiResult<UserData>;

    fn list_chats(&self) -> ApiResult<Vec<Chat>>;
    fn create_chat(&self, name: &str) -> ApiResult<Chat>;
    fn ask_question(&self, chat_id: &str, brain_id: &str, question: &str)
        -> ApiResult<ChatAnswer>;
}
