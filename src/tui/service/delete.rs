use crate::api::Backend;
use crate::knowledge::Knowledge;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

pub enum DeleteMessage {
    Deleted { knowledge: Knowledge },
    Failed { knowledge: Knowledge, error: String },
    Done,
}

/// Deletes each item with its own request, one after another. A failure
/// does not stop the batch and nothing is rolled back.
pub fn start_delete(
    backend: Arc<dyn Backend>,
    brain_id: String,
    items: Vec<Knowledge>,
) -> Receiver<DeleteMessage> {
    let (tx, rx) = channel();

    thread::spawn(move || {
        for knowledge in items {
            let message = match backend.delete_knowledge(&brain_id, &knowledge.id) {
                Ok(()) => {
                    info!(brain_id = %brain_id, id = %knowledge.id, "knowledge deleted");
                    DeleteMessage::Deleted { knowledge }
                }
                Err(e) => {
                    warn!(id = %knowledge.id, "delete failed: {}", e);
                    DeleteMessage::Failed {
                        knowledge,
                        error: e.to_string(),
                    }
                }
            };
            if tx.send(message).is_err() {
                return;
            }
        }
        let _ = tx.send(DeleteMessage::Done);
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::knowledge::uploaded;
    use std::time::Duration;

    #[test]
    fn test_partial_failure_keeps_going() {
        let mut backend = FakeBackend::default();
        backend.failing_deletes.insert("2".to_string());
        *backend.knowledge.lock().unwrap() = vec![
            uploaded("1", "a.pdf", "UPLOADED"),
            uploaded("2", "b.pdf", "UPLOADED"),
            uploaded("3", "c.pdf", "UPLOADED"),
        ];
        let backend = Arc::new(backend);
        let items = backend.knowledge.lock().unwrap().clone();

        let rx = start_delete(backend.clone(), "brain-1".to_string(), items);

        let mut deleted = Vec::new();
        let mut failed = Vec::new();
        loop {
            match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                DeleteMessage::Deleted { knowledge } => deleted.push(knowledge.id),
                DeleteMessage::Failed { knowledge, .. } => failed.push(knowledge.id),
                DeleteMessage::Done => break,
            }
        }

        assert_eq!(deleted, vec!["1", "3"]);
        assert_eq!(failed, vec!["2"]);
        assert_eq!(backend.knowledge.lock().unwrap().len(), 1);
    }
}
