use crate::api::{
    ApiResult, Backend, Brain, Chat, ChatAnswer, SyncElements, UserData, UserIdentity, UserSync,
};
use crate::knowledge::Knowledge;
use crate::tui::service::brains::{BrainRemoval, FeedReport};
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

pub type RequestId = u64;

/// Requests of the same kind supersede each other: only the most recently
/// issued one may update the UI. Kinds whose requests each target a
/// different record are exempt, see [`FetchKind::supersedes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    Brains,
    Knowledge,
    KnowledgeUpdate,
    KnowledgeAdd,
    Syncs,
    SyncFiles,
    User,
    Chats,
    Question,
    BrainCreation,
    BrainRemoval,
}

impl FetchKind {
    /// Description saves for two items are both real writes; each result
    /// has to reach the table.
    pub fn supersedes(self) -> bool {
        !matches!(self, FetchKind::KnowledgeUpdate)
    }
}

#[derive(Debug)]
pub enum FetchOutcome {
    Brains(Vec<Brain>),
    Knowledge {
        brain_id: String,
        items: Vec<Knowledge>,
    },
    KnowledgeUpdated(Knowledge),
    Syncs(Vec<UserSync>),
    SyncFiles(SyncElements),
    User {
        identity: UserIdentity,
        data: UserData,
    },
    Chats(Vec<Chat>),
    Answer {
        chat: Chat,
        answer: ChatAnswer,
    },
    BrainCreated(FeedReport),
    KnowledgeAdded(FeedReport),
    BrainRemoved {
        brain_id: String,
        removal: BrainRemoval,
    },
}

pub struct FetchMessage {
    pub id: RequestId,
    pub kind: FetchKind,
    pub result: ApiResult<FetchOutcome>,
}

pub struct Fetcher {
    backend: Arc<dyn Backend>,
    sender: Sender<FetchMessage>,
    receiver: Receiver<FetchMessage>,
    next_id: RequestId,
    latest: HashMap<FetchKind, RequestId>,
    /// In-flight requests of kinds that do not supersede each other.
    independent: HashMap<RequestId, FetchKind>,
}

impl Fetcher {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (sender, receiver) = channel();
        Self {
            backend,
            sender,
            receiver,
            next_id: 1,
            latest: HashMap::new(),
            independent: HashMap::new(),
        }
    }

    pub fn backend(&self) -> Arc<dyn Backend> {
        Arc::clone(&self.backend)
    }

    /// Runs `job` on a worker thread. Any earlier request of the same kind
    /// that has not completed yet becomes stale.
    pub fn spawn<F>(&mut self, kind: FetchKind, job: F) -> RequestId
    where
        F: FnOnce(&dyn Backend) -> ApiResult<FetchOutcome> + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        if kind.supersedes() {
            self.latest.insert(kind, id);
        } else {
            self.independent.insert(id, kind);
        }
        debug!(?kind, id, "fetch started");

        let backend = Arc::clone(&self.backend);
        let tx = self.sender.clone();
        thread::spawn(move || {
            let result = job(backend.as_ref());
            let _ = tx.send(FetchMessage { id, kind, result });
        });

        id
    }

    pub fn is_pending(&self, kind: FetchKind) -> bool {
        if kind.supersedes() {
            self.latest.contains_key(&kind)
        } else {
            self.independent.values().any(|pending| *pending == kind)
        }
    }

    /// Drains finished requests, dropping any that were superseded.
    pub fn poll(&mut self) -> Vec<(FetchKind, ApiResult<FetchOutcome>)> {
        let mut ready = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(message) => {
                    let current = if message.kind.supersedes() {
                        let latest = self.latest.get(&message.kind) == Some(&message.id);
                        if latest {
                            self.latest.remove(&message.kind);
                        }
                        latest
                    } else {
                        self.independent.remove(&message.id).is_some()
                    };
                    if !current {
                        debug!(kind = ?message.kind, id = message.id, "dropping stale response");
                        continue;
                    }
                    if let Err(e) = &message.result {
                        warn!(kind = ?message.kind, "request failed: {}", e);
                    }
                    ready.push((message.kind, message.result));
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        ready
    }
}
