use crate::api::ApiError;
use serde::{Deserialize, Serialize};

/// Where a knowledge item's content came from. The display name of an item
/// depends on this: uploaded files are named by their file name, remote
/// sources by their URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KnowledgeSource {
    Uploaded { file_name: String },
    Remote { url: String },
}

impl KnowledgeSource {
    pub fn display_name(&self) -> &str {
        match self {
            KnowledgeSource::Uploaded { file_name } => file_name,
            KnowledgeSource::Remote { url } => url,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KnowledgeSource::Uploaded { .. } => "file",
            KnowledgeSource::Remote { .. } => "url",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Knowledge {
    pub id: String,
    pub brain_id: Option<String>,
    pub status: String,
    pub source: KnowledgeSource,
    pub extension: Option<String>,
    pub file_size: Option<u64>,
    pub description: Option<String>,
}

impl Knowledge {
    pub fn display_name(&self) -> &str {
        self.source.display_name()
    }
}

/// Knowledge record as the backend sends it: both `file_name` and `url` are
/// optional and at most one of them is expected to be set.
#[derive(Debug, Clone, Deserialize)]
pub struct RawKnowledge {
    pub id: String,
    #[serde(default)]
    pub brain_id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<RawKnowledge> for Knowledge {
    type Error = ApiError;

    fn try_from(raw: RawKnowledge) -> Result<Self, Self::Error> {
        let source = match (raw.file_name, raw.url) {
            (Some(file_name), _) if !file_name.is_empty() => KnowledgeSource::Uploaded { file_name },
            (_, Some(url)) if !url.is_empty() => KnowledgeSource::Remote { url },
            _ => {
                return Err(ApiError::Malformed(format!(
                    "knowledge {} has neither a file name nor a url",
                    raw.id
                )))
            }
        };

        Ok(Knowledge {
            id: raw.id,
            brain_id: raw.brain_id,
            status: raw.status.unwrap_or_default(),
            source,
            extension: raw.extension,
            file_size: raw.file_size,
            description: raw.description,
        })
    }
}

#[cfg(test)]
pub fn uploaded(id: &str, file_name: &str, status: &str) -> Knowledge {
    Knowledge {
        id: id.to_string(),
        brain_id: Some("brain-1".to_string()),
        status: status.to_string(),
        source: KnowledgeSource::Uploaded {
            file_name: file_name.to_string(),
        },
        extension: file_name.rsplit_once('.').map(|(_, ext)| format!(".{}", ext)),
        file_size: Some(1024),
        description: None,
    }
}

#[cfg(test)]
pub fn remote(id: &str, url: &str, status: &str) -> Knowledge {
    Knowledge {
        id: id.to_string(),
        brain_id: Some("brain-1".to_string()),
        status: status.to_string(),
        source: KnowledgeSource::Remote {
            url: url.to_string(),
        },
        extension: None,
        file_size: None,
        description: None,
    }
}
