//! One function per backend call the TUI makes, each run through the
//! [`Fetcher`] so that only the newest result of a kind is applied.

use crate::api::Brain;
use crate::tui::service::brains::{add_knowledge, create_and_feed, remove_brain, BrainCreation};
use crate::tui::service::fetch::{FetchKind, FetchOutcome, Fetcher, RequestId};
use crate::tui::state::KnowledgeToFeed;

pub fn load_brains(fetcher: &mut Fetcher) -> RequestId {
    fetcher.spawn(FetchKind::Brains, |backend| {
        backend.list_brains().map(FetchOutcome::Brains)
    })
}

pub fn load_knowledge(fetcher: &mut Fetcher, brain_id: &str) -> RequestId {
    let brain_id = brain_id.to_string();
    fetcher.spawn(FetchKind::Knowledge, move |backend| {
        let items = backend.list_knowledge(&brain_id)?;
        Ok(FetchOutcome::Knowledge { brain_id, items })
    })
}

pub fn update_description(
    fetcher: &mut Fetcher,
    knowledge_id: &str,
    description: Option<String>,
) -> RequestId {
    let knowledge_id = knowledge_id.to_string();
    fetcher.spawn(FetchKind::KnowledgeUpdate, move |backend| {
        backend
            .update_knowledge(&knowledge_id, description.as_deref())
            .map(FetchOutcome::KnowledgeUpdated)
    })
}

pub fn load_syncs(fetcher: &mut Fetcher) -> RequestId {
    fetcher.spawn(FetchKind::Syncs, |backend| {
        backend.list_syncs().map(FetchOutcome::Syncs)
    })
}

pub fn load_sync_files(fetcher: &mut Fetcher, sync_id: i64, folder_id: Option<String>) -> RequestId {
    fetcher.spawn(FetchKind::SyncFiles, move |backend| {
        backend
            .list_sync_files(sync_id, folder_id.as_deref())
            .map(FetchOutcome::SyncFiles)
    })
}

pub fn load_user(fetcher: &mut Fetcher) -> RequestId {
    fetcher.spawn(FetchKind::User, |backend| {
        let identity = backend.user_identity()?;
        let data = backend.user_data()?;
        Ok(FetchOutcome::User { identity, data })
    })
}

pub fn load_chats(fetcher: &mut Fetcher) -> RequestId {
    fetcher.spawn(FetchKind::Chats, |backend| {
        backend.list_chats().map(FetchOutcome::Chats)
    })
}

/// Opens a new chat named after the question, then asks it.
pub fn ask_question(fetcher: &mut Fetcher, brain_id: &str, question: &str) -> RequestId {
    let brain_id = brain_id.to_string();
    let question = question.trim().to_string();
    fetcher.spawn(FetchKind::Question, move |backend| {
        let chat = backend.create_chat(&chat_name(&question))?;
        let answer = backend.ask_question(&chat.chat_id, &brain_id, &question)?;
        Ok(FetchOutcome::Answer { chat, answer })
    })
}

pub fn create_brain(fetcher: &mut Fetcher, request: BrainCreation) -> RequestId {
    fetcher.spawn(FetchKind::BrainCreation, move |backend| {
        create_and_feed(backend, &request).map(FetchOutcome::BrainCreated)
    })
}

pub fn add_to_brain(fetcher: &mut Fetcher, brain: Brain, knowledge: Vec<KnowledgeToFeed>) -> RequestId {
    fetcher.spawn(FetchKind::KnowledgeAdd, move |backend| {
        add_knowledge(backend, &brain, &knowledge).map(FetchOutcome::KnowledgeAdded)
    })
}

pub fn delete_or_leave_brain(fetcher: &mut Fetcher, brain: Brain) -> RequestId {
    fetcher.spawn(FetchKind::BrainRemoval, move |backend| {
        let removal = remove_brain(backend, &brain)?;
        Ok(FetchOutcome::BrainRemoved {
            brain_id: brain.id,
            removal,
        })
    })
}

pub fn chat_name(question: &str) -> String {
    const MAX_CHARS: usize = 40;
    let mut name: String = question.chars().take(MAX_CHARS).collect();
    if question.chars().count() > MAX_CHARS {
        name.push_str("...");
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_chat_name_is_shortened() {
        assert_eq!(chat_name("short"), "short");
        let long = "x".repeat(50);
        assert_eq!(chat_name(&long), format!("{}...", "x".repeat(40)));
    }

    #[test]
    fn test_ask_question_creates_chat_first() {
        let backend = Arc::new(FakeBackend::default());
        let mut fetcher = Fetcher::new(backend.clone());
        ask_question(&mut fetcher, "brain-1", "  what is due?  ");

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut ready = Vec::new();
        while ready.is_empty() && Instant::now() < deadline {
            ready = fetcher.poll();
            thread::sleep(Duration::from_millis(5));
        }

        match ready.pop() {
            Some((FetchKind::Question, Ok(FetchOutcome::Answer { chat, answer }))) => {
                assert_eq!(chat.chat_name, "what is due?");
                assert_eq!(answer.assistant, "answer to: what is due?");
            }
            _ => panic!("expected an answer"),
        }
        assert_eq!(backend.chats.lock().unwrap().len(), 1);
    }
}
