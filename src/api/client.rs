use super::error::{ApiError, ApiResult};
use super::traits::Backend;
use super::types::{
    Brain, BrainList, Chat, ChatAnswer, ChatList, KnowledgeList, KnowledgeUpdate, NewBrain,
    SyncElements, SyncFilesRequest, UserData, UserIdentity, UserIdentityUpdate, UserSync,
};
use crate::config::ApiConfig;
use crate::knowledge::{Knowledge, RawKnowledge};
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Blocking HTTP client for the brain backend's REST API.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpBackend {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ApiError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, build_url(&self.base_url, path))
            .bearer_auth(&self.api_key)
    }

    fn send(&self, req: RequestBuilder, what: &str) -> ApiResult<Response> {
        let response = req.send()?;
        let status = response.status();
        debug!(what, status = status.as_u16(), "backend response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(status_error(status, what, &body))
    }

    fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> ApiResult<T> {
        let body = self.send(req, what)?.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Backend for HttpBackend {
    fn list_brains(&self) -> ApiResult<Vec<Brain>> {
        let list: BrainList = self.send_json(self.request(Method::GET, "brains/"), "brains")?;
        Ok(list.brains)
    }

    fn create_brain(&self, brain: &NewBrain) -> ApiResult<Brain> {
        self.send_json(
            self.request(Method::POST, "brains/").json(brain),
            "create brain",
        )
    }

    fn delete_brain(&self, brain_id: &str) -> ApiResult<()> {
        self.send(
            self.request(Method::DELETE, &format!("brains/{}", brain_id)),
            "delete brain",
        )?;
        Ok(())
    }

    fn unsubscribe_brain(&self, brain_id: &str) -> ApiResult<()> {
        self.send(
            self.request(Method::DELETE, &format!("brains/{}/subscription", brain_id)),
            "unsubscribe brain",
        )?;
        Ok(())
    }

    fn list_knowledge(&self, brain_id: &str) -> ApiResult<Vec<Knowledge>> {
        let list: KnowledgeList = self.send_json(
            self.request(Method::GET, "knowledge")
                .query(&[("brain_id", brain_id)]),
            "knowledge",
        )?;
        Ok(decode_knowledge(list.knowledges))
    }

    fn delete_knowledge(&self, brain_id: &str, knowledge_id: &str) -> ApiResult<()> {
        self.send(
            self.request(Method::DELETE, &format!("knowledge/{}", knowledge_id))
                .query(&[("brain_id", brain_id)]),
            knowledge_id,
        )?;
        Ok(())
    }

    fn update_knowledge(
        &self,
        knowledge_id: &str,
        description: Option<&str>,
    ) -> ApiResult<Knowledge> {
        let updated: Option<RawKnowledge> = self.send_json(
            self.request(Method::PUT, &format!("knowledge/{}", knowledge_id))
                .json(&KnowledgeUpdate { description }),
            knowledge_id,
        )?;
        updated.ok_or(ApiError::NothingUpdated)?.try_into()
    }

    fn upload_document(&self, brain_id: &str, path: &Path) -> ApiResult<()> {
        let form = multipart::Form::new()
            .file("uploadFile", path)
            .map_err(|source| ApiError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        self.send(
            self.request(Method::POST, "upload")
                .query(&[("brain_id", brain_id)])
                .multipart(form),
            "upload",
        )?;
        Ok(())
    }

    fn crawl_url(&self, brain_id: &str, url: &str) -> ApiResult<()> {
        let body = json!({
            "url": url,
            "js": false,
            "depth": 1,
            "max_pages": 100,
            "max_time": 60,
        });
        self.send(
            self.request(Method::POST, "crawl")
                .query(&[("brain_id", brain_id)])
                .json(&body),
            "crawl",
        )?;
        Ok(())
    }

    fn list_syncs(&self) -> ApiResult<Vec<UserSync>> {
        self.send_json(self.request(Method::GET, "sync/active"), "syncs")
    }

    fn list_sync_files(
        &self,
        user_sync_id: i64,
        folder_id: Option<&str>,
    ) -> ApiResult<SyncElements> {
        let mut req = self
            .request(Method::GET, &format!("sync/{}/files", user_sync_id))
            .query(&[("user_sync_id", user_sync_id.to_string())]);
        if let Some(folder_id) = folder_id {
            req = req.query(&[("folder_id", folder_id)]);
        }
        self.send_json(req, "sync files")
    }

    fn add_sync_files(&self, request: &SyncFilesRequest) -> ApiResult<()> {
        self.send(
            self.request(Method::POST, "sync/files").json(request),
            "add sync files",
        )?;
        Ok(())
    }

    fn user_identity(&self) -> ApiResult<UserIdentity> {
        self.send_json(self.request(Method::GET, "user/identity"), "user identity")
    }

    fn update_user_identity(&self, update: &UserIdentityUpdate) -> ApiResult<UserIdentity> {
        self.send_json(
            self.request(Method::PUT, "user/identity").json(update),
            "user identity",
        )
    }

    fn user_data(&self) -> ApiResult<UserData> {
        self.send_json(self.request(Method::GET, "user"), "user")
    }

    fn list_chats(&self) -> ApiResult<Vec<Chat>> {
        let list: ChatList = self.send_json(self.request(Method::GET, "chat"), "chats")?;
        Ok(list.chats)
    }

    fn create_chat(&self, name: &str) -> ApiResult<Chat> {
        self.send_json(
            self.request(Method::POST, "chat").json(&json!({ "name": name })),
            "create chat",
        )
    }

    fn ask_question(&self, chat_id: &str, brain_id: &str, question: &str) -> ApiResult<ChatAnswer> {
        self.send_json(
            self.request(Method::POST, &format!("chat/{}/question", chat_id))
                .query(&[("brain_id", brain_id)])
                .json(&json!({ "question": question })),
            "question",
        )
    }
}

fn build_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

fn status_error(status: StatusCode, what: &str, body: &str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound(what.to_string()),
        _ => ApiError::Status {
            status: status.as_u16(),
            reason: extract_error_reason(body),
        },
    }
}

/// Pulls a readable reason out of a FastAPI style `{"detail": ...}` body.
fn extract_error_reason(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(serde_json::Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if !messages.is_empty() {
                    return messages.join("; ");
                }
            }
            _ => {}
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no details".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

fn decode_knowledge(raw: Vec<RawKnowledge>) -> Vec<Knowledge> {
    raw.into_iter()
        .filter_map(|record| match Knowledge::try_from(record) {
            Ok(knowledge) => Some(knowledge),
            Err(e) => {
                warn!("skipping knowledge record: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        assert_eq!(
            build_url("http://localhost:5050/", "/knowledge"),
            "http://localhost:5050/knowledge"
        );
        assert_eq!(build_url("http://api", ""), "http://api/");
    }

    #[test]
    fn test_extract_error_reason() {
        assert_eq!(
            extract_error_reason(r#"{"detail":"Brain not found"}"#),
            "Brain not found"
        );
        assert_eq!(
            extract_error_reason(r#"{"detail":[{"msg":"field required"},{"msg":"bad id"}]}"#),
            "field required; bad id"
        );
        assert_eq!(extract_error_reason(""), "no details");
        assert_eq!(extract_error_reason("Internal Server Error"), "Internal Server Error");
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, "x", ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "k1", ""),
            ApiError::NotFound(ref what) if what == "k1"
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "x", ""),
            ApiError::Status { status: 502, .. }
        ));
    }

    #[test]
    fn test_decode_knowledge_skips_malformed() {
        let list: KnowledgeList = serde_json::from_str(
            r#"{"knowledges":[{"id":"1","file_name":"a.pdf"},{"id":"2"},{"id":"3","url":"https://x.dev"}]}"#,
        )
        .unwrap();
        let decoded = decode_knowledge(list.knowledges);
        let ids: Vec<&str> = decoded.iter().map(|k| k.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = ApiConfig {
            api_key: None,
            ..ApiConfig::default()
        };
        assert!(matches!(
            HttpBackend::new(&config),
            Err(ApiError::MissingApiKey)
        ));
    }
}
