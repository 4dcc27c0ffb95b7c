use crate::tui::state::{KnowledgeToFeed, WizardStep};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecapCounts {
    pub connections: usize,
    pub websites: usize,
    pub documents: usize,
}

pub fn recap_counts(
    feed: &[KnowledgeToFeed],
    opened_connections: &HashMap<i64, HashSet<String>>,
) -> RecapCounts {
    RecapCounts {
        connections: opened_connections
            .values()
            .filter(|files| !files.is_empty())
            .count(),
        websites: feed
            .iter()
            .filter(|k| matches!(k, KnowledgeToFeed::Crawl { .. }))
            .count(),
        documents: feed
            .iter()
            .filter(|k| matches!(k, KnowledgeToFeed::Upload { .. }))
            .count(),
    }
}

/// Anything that looks like a web address is crawled, the rest is a file
/// to upload. Blank input yields nothing.
pub fn classify_entry(input: &str) -> Option<KnowledgeToFeed> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let lower = input.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(KnowledgeToFeed::Crawl {
            url: input.to_string(),
        })
    } else {
        Some(KnowledgeToFeed::Upload {
            path: PathBuf::from(input),
        })
    }
}

pub fn next_step(step: WizardStep, name: &str) -> WizardStep {
    match step {
        WizardStep::Details if name.trim().is_empty() => WizardStep::Details,
        WizardStep::Details => WizardStep::Knowledge,
        WizardStep::Knowledge | WizardStep::Recap => WizardStep::Recap,
    }
}

pub fn previous_step(step: WizardStep) -> WizardStep {
    match step {
        WizardStep::Details | WizardStep::Knowledge => WizardStep::Details,
        WizardStep::Recap => WizardStep::Knowledge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recap_counts() {
        let feed = vec![
            KnowledgeToFeed::Upload {
                path: PathBuf::from("a.pdf"),
            },
            KnowledgeToFeed::Crawl {
                url: "https://quivr.app".to_string(),
            },
            KnowledgeToFeed::Upload {
                path: PathBuf::from("b.md"),
            },
        ];
        let mut opened = HashMap::new();
        opened.insert(1, HashSet::from(["f1".to_string()]));
        opened.insert(2, HashSet::new());

        let counts = recap_counts(&feed, &opened);
        assert_eq!(
            counts,
            RecapCounts {
                connections: 1,
                websites: 1,
                documents: 2,
            }
        );
    }

    #[test]
    fn test_classify_entry() {
        assert_eq!(
            classify_entry("  HTTPS://example.com  "),
            Some(KnowledgeToFeed::Crawl {
                url: "HTTPS://example.com".to_string()
            })
        );
        assert_eq!(
            classify_entry("~/notes.txt"),
            Some(KnowledgeToFeed::Upload {
                path: PathBuf::from("~/notes.txt")
            })
        );
        assert_eq!(classify_entry("   "), None);
    }

    #[test]
    fn test_step_transitions() {
        assert_eq!(next_step(WizardStep::Details, ""), WizardStep::Details);
        assert_eq!(next_step(WizardStep::Details, "Legal"), WizardStep::Knowledge);
        assert_eq!(next_step(WizardStep::Knowledge, "Legal"), WizardStep::Recap);
        assert_eq!(previous_step(WizardStep::Recap), WizardStep::Knowledge);
        assert_eq!(previous_step(WizardStep::Details), WizardStep::Details);
    }
}
