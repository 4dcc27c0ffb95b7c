use crate::knowledge::Knowledge;
use chrono::{DateTime, Utc};
use serde::Serialize;

const SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeListing {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub brain_id: String,
    pub query: String,
    pub sort: String,
    pub total_count: usize,
    pub shown_count: usize,
    pub items: Vec<Knowledge>,
}

impl KnowledgeListing {
    pub fn new(brain_id: &str, query: &str, sort: &str, total_count: usize, items: Vec<Knowledge>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            timestamp: Utc::now(),
            brain_id: brain_id.to_string(),
            query: query.to_string(),
            sort: sort.to_string(),
            total_count,
            shown_count: items.len(),
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedItem {
    pub id: String,
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Success,
    Partial,
    Failed,
}

impl ExecutionStatus {
    pub fn from_counts(succeeded: usize, failed: usize) -> Self {
        match (succeeded, failed) {
            (_, 0) => ExecutionStatus::Success,
            (0, _) => ExecutionStatus::Failed,
            _ => ExecutionStatus::Partial,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub brain_id: String,
    pub status: ExecutionStatus,
    pub deleted: Vec<String>,
    pub failed_items: Vec<FailedItem>,
    pub duration_ms: u64,
}

impl DeleteResult {
    pub fn new(brain_id: &str, deleted: Vec<String>, failed_items: Vec<FailedItem>, duration_ms: u64) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            timestamp: Utc::now(),
            brain_id: brain_id.to_string(),
            status: ExecutionStatus::from_counts(deleted.len(), failed_items.len()),
            deleted,
            failed_items,
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{remote, uploaded};

    #[test]
    fn test_status_from_counts() {
        assert_eq!(ExecutionStatus::from_counts(3, 0), ExecutionStatus::Success);
        assert_eq!(ExecutionStatus::from_counts(0, 0), ExecutionStatus::Success);
        assert_eq!(ExecutionStatus::from_counts(2, 1), ExecutionStatus::Partial);
        assert_eq!(ExecutionStatus::from_counts(0, 2), ExecutionStatus::Failed);
    }

    #[test]
    fn test_listing_json_shape() {
        let listing = KnowledgeListing::new(
            "brain-1",
            "a",
            "name",
            3,
            vec![
                uploaded("1", "a.pdf", "UPLOADED"),
                remote("2", "https://a.dev", "ERROR"),
            ],
        );
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["shown_count"], 2);
        assert_eq!(json["total_count"], 3);
        assert_eq!(json["items"][0]["source"]["kind"], "uploaded");
        assert_eq!(json["items"][1]["source"]["url"], "https://a.dev");
    }
}
