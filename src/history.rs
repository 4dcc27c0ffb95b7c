use crate::config::Config;
use crate::knowledge::Knowledge;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub brain_id: String,
    pub knowledge_id: String,
    pub name: Option<String>,
}

impl HistoryEntry {
    pub fn new(
        action: impl Into<String>,
        brain_id: impl Into<String>,
        knowledge_id: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.into(),
            brain_id: brain_id.into(),
            knowledge_id: knowledge_id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn to_log_line(&self) -> String {
        let name_str = self
            .name
            .as_ref()
            .map(|n| format!(" {}", n.replace('\n', " ")))
            .unwrap_or_default();
        format!(
            "{} {} {} {}{}\n",
            self.timestamp.to_rfc3339(),
            self.action,
            self.brain_id,
            self.knowledge_id,
            name_str
        )
    }
}

pub struct HistoryLogger {
    log_path: PathBuf,
}

impl HistoryLogger {
    pub fn new() -> Self {
        Self::at(Config::data_dir().join("history.log"))
    }

    pub fn at(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn log(&self, entry: &HistoryEntry) -> Result<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        write!(file, "{}", entry.to_log_line())?;
        Ok(())
    }

    pub fn log_delete(&self, brain_id: &str, knowledge: &Knowledge) -> Result<()> {
        let entry = HistoryEntry::new("DELETE", brain_id, knowledge.id.as_str())
            .with_name(knowledge.display_name());
        self.log(&entry)
    }

    /// Most recent entries first when a limit is given.
    pub fn read_history(&self, limit: Option<usize>) -> Result<Vec<HistoryEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path)?;
        let entries: Vec<HistoryEntry> = content.lines().filter_map(parse_line).collect();

        let result = if let Some(n) = limit {
            entries.into_iter().rev().take(n).collect()
        } else {
            entries
        };

        Ok(result)
    }
}

impl Default for HistoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_line(line: &str) -> Option<HistoryEntry> {
    let parts: Vec<&str> = line.splitn(5, ' ').collect();
    if parts.len() < 4 {
        return None;
    }

    let timestamp = DateTime::parse_from_rfc3339(parts[0])
        .ok()?
        .with_timezone(&Utc);

    Some(HistoryEntry {
        timestamp,
        action: parts[1].to_string(),
        brain_id: parts[2].to_string(),
        knowledge_id: parts[3].to_string(),
        name: parts.get(4).map(|s| s.to_string()),
    })
}
