use crate::api::Brain;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Details,
    Knowledge,
    Recap,
}

impl WizardStep {
    pub fn index(self) -> usize {
        match self {
            WizardStep::Details => 0,
            WizardStep::Knowledge => 1,
            WizardStep::Recap => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Details => "Brain details",
            WizardStep::Knowledge => "Knowledge to feed",
            WizardStep::Recap => "Brain recap",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum KnowledgeToFeed {
    Upload { path: PathBuf },
    Crawl { url: String },
}

impl KnowledgeToFeed {
    pub fn label(&self) -> String {
        match self {
            KnowledgeToFeed::Upload { path } => path.display().to_string(),
            KnowledgeToFeed::Crawl { url } => url.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardField {
    #[default]
    Name,
    Description,
}

#[derive(Debug, Clone, Default)]
pub struct BrainWizardState {
    pub step: WizardStep,
    pub name: String,
    pub description: String,
    pub field: WizardField,
    pub knowledge_to_feed: Vec<KnowledgeToFeed>,
    /// Path or URL being typed on the knowledge step.
    pub entry: String,
    pub focused_entry: usize,
    pub creating: bool,
    pub created: Option<Brain>,
    pub error: Option<String>,
}

impl BrainWizardState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn active_input(&mut self) -> &mut String {
        match (self.step, self.field) {
            (WizardStep::Details, WizardField::Name) => &mut self.name,
            (WizardStep::Details, WizardField::Description) => &mut self.description,
            _ => &mut self.entry,
        }
    }
}
