use crate::api::{
    ApiError, ApiResult, Backend, Brain, NewBrain, SyncFilesRequest, UserIdentityUpdate,
};
use crate::tui::state::KnowledgeToFeed;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

/// Everything the wizard collected, detached from UI state so it can move
/// onto a worker thread.
#[derive(Debug, Clone, Default)]
pub struct BrainCreation {
    pub name: String,
    pub description: String,
    pub feed: Vec<KnowledgeToFeed>,
    /// Picked element ids per connection.
    pub connections: BTreeMap<i64, BTreeSet<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedReport {
    pub brain: Brain,
    pub uploaded: usize,
    pub crawled: usize,
    pub synced: usize,
    pub failed: Vec<String>,
}

impl FeedReport {
    fn new(brain: Brain) -> Self {
        Self {
            brain,
            uploaded: 0,
            crawled: 0,
            synced: 0,
            failed: Vec::new(),
        }
    }

    pub fn added(&self) -> usize {
        self.uploaded + self.crawled + self.synced
    }
}

/// Creates the brain, then feeds it. The user is marked onboarded first if
/// needed. Only a failure to create the brain itself is an error; feeding
/// failures are collected in the report.
pub fn create_and_feed(backend: &dyn Backend, request: &BrainCreation) -> ApiResult<FeedReport> {
    let identity = backend.user_identity()?;
    if !identity.onboarded {
        backend.update_user_identity(&UserIdentityUpdate {
            username: identity.username.clone().unwrap_or_default(),
            onboarded: true,
        })?;
    }

    let brain = backend.create_brain(&NewBrain {
        name: request.name.trim().to_string(),
        description: request.description.trim().to_string(),
    })?;
    info!(brain_id = %brain.id, name = %brain.name, "brain created");

    let mut report = FeedReport::new(brain);
    feed(backend, &mut report, &request.feed, &request.connections);
    Ok(report)
}

/// Feeds an existing brain. Refused up front for brains the user does not
/// own or that have no upload quota.
pub fn add_knowledge(
    backend: &dyn Backend,
    brain: &Brain,
    knowledge: &[KnowledgeToFeed],
) -> ApiResult<FeedReport> {
    if !brain.accepts_knowledge() {
        return Err(ApiError::ReadOnlyBrain(brain.name.clone()));
    }
    let mut report = FeedReport::new(brain.clone());
    feed(backend, &mut report, knowledge, &BTreeMap::new());
    info!(
        brain_id = %brain.id,
        uploaded = report.uploaded,
        crawled = report.crawled,
        failed = report.failed.len(),
        "knowledge added"
    );
    Ok(report)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrainRemoval {
    Deleted,
    Unsubscribed,
}

/// Owners delete the brain; anyone else only leaves it.
pub fn remove_brain(backend: &dyn Backend, brain: &Brain) -> ApiResult<BrainRemoval> {
    let removal = if brain.is_owned() {
        backend.delete_brain(&brain.id)?;
        BrainRemoval::Deleted
    } else {
        backend.unsubscribe_brain(&brain.id)?;
        BrainRemoval::Unsubscribed
    };
    info!(brain_id = %brain.id, ?removal, "brain removed");
    Ok(removal)
}

fn feed(
    backend: &dyn Backend,
    report: &mut FeedReport,
    knowledge: &[KnowledgeToFeed],
    connections: &BTreeMap<i64, BTreeSet<String>>,
) {
    for item in knowledge {
        let result = match item {
            KnowledgeToFeed::Upload { path } => backend
                .upload_document(&report.brain.id, path)
                .map(|()| report.uploaded += 1),
            KnowledgeToFeed::Crawl { url } => backend
                .crawl_url(&report.brain.id, url)
                .map(|()| report.crawled += 1),
        };
        if let Err(e) = result {
            warn!("failed to feed {}: {}", item.label(), e);
            report.failed.push(format!("{}: {}", item.label(), e));
        }
    }

    for (sync_id, files) in connections.iter().filter(|(_, f)| !f.is_empty()) {
        let sync_request = SyncFilesRequest {
            brain_id: report.brain.id.clone(),
            syncs_user_id: *sync_id,
            files: files.iter().cloned().collect(),
            folders: Vec::new(),
        };
        match backend.add_sync_files(&sync_request) {
            Ok(()) => report.synced += files.len(),
            Err(e) => {
                warn!(sync_id, "failed to add connection files: {}", e);
                report.failed.push(format!("connection {}: {}", sync_id, e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::api::UserIdentity;
    use std::path::PathBuf;

    fn request() -> BrainCreation {
        let mut connections = BTreeMap::new();
        connections.insert(3, BTreeSet::from(["f1".to_string(), "f2".to_string()]));
        connections.insert(4, BTreeSet::new());
        BrainCreation {
            name: "  Legal  ".to_string(),
            description: "contracts".to_string(),
            feed: vec![
                KnowledgeToFeed::Upload {
                    path: PathBuf::from("nda.pdf"),
                },
                KnowledgeToFeed::Crawl {
                    url: "https://example.com".to_string(),
                },
            ],
            connections,
        }
    }

    #[test]
    fn test_onboards_then_creates_and_feeds() {
        let backend = FakeBackend::default();
        *backend.identity.lock().unwrap() = UserIdentity {
            id: "u1".to_string(),
            username: Some("sam".to_string()),
            ..Default::default()
        };

        let report = create_and_feed(&backend, &request()).unwrap();

        let updates = backend.identity_updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].username, "sam");
        assert!(updates[0].onboarded);

        assert_eq!(report.brain.name, "Legal");
        assert_eq!(report.uploaded, 1);
        assert_eq!(report.crawled, 1);
        assert_eq!(report.synced, 2);
        assert!(report.failed.is_empty());

        let syncs = backend.sync_requests.lock().unwrap();
        assert_eq!(syncs.len(), 1);
        assert_eq!(syncs[0].syncs_user_id, 3);
        assert_eq!(syncs[0].brain_id, report.brain.id);
    }

    #[test]
    fn test_onboarded_user_is_not_updated() {
        let backend = FakeBackend::default();
        backend.identity.lock().unwrap().onboarded = true;

        create_and_feed(&backend, &BrainCreation {
            name: "Empty".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert!(backend.identity_updates.lock().unwrap().is_empty());
        assert_eq!(backend.brains.lock().unwrap().len(), 1);
    }

    fn brain(rights: &str, max_files: Option<u32>) -> Brain {
        Brain {
            id: "b1".to_string(),
            name: "Legal".to_string(),
            description: None,
            status: None,
            max_files,
            rights: Some(rights.to_string()),
        }
    }

    #[test]
    fn test_add_knowledge_to_owned_brain() {
        let backend = FakeBackend::default();
        let feed = vec![
            KnowledgeToFeed::Upload {
                path: PathBuf::from("nda.pdf"),
            },
            KnowledgeToFeed::Crawl {
                url: "https://example.com".to_string(),
            },
        ];

        let report = add_knowledge(&backend, &brain("Owner", Some(10)), &feed).unwrap();
        assert_eq!(report.added(), 2);
        assert_eq!(backend.uploaded.lock().unwrap().len(), 1);
        assert_eq!(backend.crawled.lock().unwrap().as_slice(), ["https://example.com"]);
        assert!(backend.brains.lock().unwrap().is_empty());
    }

    #[test]
    fn test_add_knowledge_refused_without_quota_or_ownership() {
        let backend = FakeBackend::default();
        let feed = vec![KnowledgeToFeed::Crawl {
            url: "https://example.com".to_string(),
        }];

        for target in [brain("Owner", None), brain("Viewer", Some(10))] {
            let result = add_knowledge(&backend, &target, &feed);
            assert!(matches!(result, Err(ApiError::ReadOnlyBrain(_))));
        }
        assert!(backend.crawled.lock().unwrap().is_empty());
    }

    #[test]
    fn test_owner_deletes_viewer_unsubscribes() {
        let backend = FakeBackend::default();
        *backend.brains.lock().unwrap() = vec![brain("Owner", None)];
        assert_eq!(
            remove_brain(&backend, &brain("Owner", None)).unwrap(),
            BrainRemoval::Deleted
        );
        assert!(backend.brains.lock().unwrap().is_empty());
        assert!(backend.unsubscribed.lock().unwrap().is_empty());

        assert_eq!(
            remove_brain(&backend, &brain("Viewer", None)).unwrap(),
            BrainRemoval::Unsubscribed
        );
        assert_eq!(backend.unsubscribed.lock().unwrap().as_slice(), ["b1"]);
    }
}
