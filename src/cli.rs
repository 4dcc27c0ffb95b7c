use clap::{Parser, Subcommand, ValueEnum};

use crate::tui::logic::{SortDirection, SortDirective, SortKey};

#[derive(Parser)]
#[command(name = "brainboard")]
#[command(about = "Browse and manage the knowledge of your brains from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortArg {
    Name,
    Status,
}

impl SortArg {
    pub fn directive(sort: Option<SortArg>, descending: bool) -> SortDirective {
        let key = match sort {
            None => SortKey::None,
            Some(SortArg::Name) => SortKey::Name,
            Some(SortArg::Status) => SortKey::Status,
        };
        let direction = if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        SortDirective::new(key, direction)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List, add, delete or describe knowledge")]
    Knowledge {
        #[command(subcommand)]
        action: KnowledgeActions,
    },
    #[command(about = "List, create or delete brains")]
    Brains {
        #[command(subcommand)]
        action: BrainActions,
    },
    #[command(about = "Browse connected accounts")]
    Connections {
        #[command(subcommand)]
        action: ConnectionActions,
    },
    #[command(about = "List your chats")]
    Chats {
        #[arg(short = 'F', long, default_value = "human")]
        format: OutputFormat,
    },
    #[command(about = "Ask a brain a question")]
    Ask {
        #[arg(short, long, help = "Brain id or name (defaults to the first brain)")]
        brain: Option<String>,
        question: String,
    },
    #[command(about = "Manage configuration")]
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },
    #[command(about = "View deletion history")]
    History {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum KnowledgeActions {
    #[command(about = "List the knowledge of a brain")]
    List {
        #[arg(short, long, help = "Brain id or name (defaults to the first brain)")]
        brain: Option<String>,
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(short, long)]
        sort: Option<SortArg>,
        #[arg(long)]
        desc: bool,
        #[arg(short = 'F', long, default_value = "human")]
        format: OutputFormat,
    },
    #[command(about = "Delete knowledge by id or by search")]
    Delete {
        #[arg(short, long, help = "Brain id or name (defaults to the first brain)")]
        brain: Option<String>,
        #[arg(short, long = "id")]
        ids: Vec<String>,
        #[arg(short, long, help = "Delete every item whose name matches")]
        query: Option<String>,
        #[arg(long)]
        yes: bool,
        #[arg(short = 'F', long, default_value = "human")]
        format: OutputFormat,
    },
    #[command(about = "Add files or URLs to an existing brain")]
    Add {
        #[arg(short, long, help = "Brain id or name (defaults to the first brain)")]
        brain: Option<String>,
        #[arg(required = true, help = "File paths or URLs")]
        entries: Vec<String>,
    },
    #[command(about = "Set or clear the description of a knowledge item")]
    Describe {
        #[arg(short, long)]
        id: String,
        #[arg(short, long, help = "Omit to clear the description")]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum BrainActions {
    #[command(about = "List brains")]
    List {
        #[arg(short = 'F', long, default_value = "human")]
        format: OutputFormat,
    },
    #[command(about = "Create a brain and feed it files or URLs")]
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, help = "File path or URL, repeatable")]
        feed: Vec<String>,
    },
    #[command(about = "Delete a brain you own, or leave a shared one")]
    Delete {
        #[arg(help = "Brain id or name")]
        brain: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConnectionActions {
    #[command(about = "List connected accounts")]
    List {
        #[arg(short = 'F', long, default_value = "human")]
        format: OutputFormat,
    },
    #[command(about = "List files of a connection folder")]
    Browse {
        #[arg(short, long)]
        sync: i64,
        #[arg(long)]
        folder: Option<String>,
        #[arg(short = 'F', long, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
pub enum ConfigActions {
    #[command(about = "Show current configuration")]
    Show,
    #[command(about = "Set a configuration value")]
    Set {
        #[arg(short, long)]
        key: String,
        #[arg(short, long)]
        value: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["brainboard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_knowledge_list_args() {
        let cli = Cli::try_parse_from([
            "brainboard", "knowledge", "list", "-q", "pdf", "-s", "name", "--desc", "-F", "json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Knowledge {
                action:
                    KnowledgeActions::List {
                        query,
                        sort,
                        desc,
                        format,
                        ..
                    },
            }) => {
                assert_eq!(query, "pdf");
                assert!(matches!(format, OutputFormat::Json));
                let directive = SortArg::directive(sort, desc);
                assert_eq!(directive.key, SortKey::Name);
                assert_eq!(directive.direction, SortDirection::Descending);
            }
            _ => panic!("expected knowledge list"),
        }
    }

    #[test]
    fn test_repeated_ids() {
        let cli =
            Cli::try_parse_from(["brainboard", "knowledge", "delete", "-i", "1", "-i", "2"])
                .unwrap();
        match cli.command {
            Some(Commands::Knowledge {
                action: KnowledgeActions::Delete { ids, yes, .. },
            }) => {
                assert_eq!(ids, vec!["1", "2"]);
                assert!(!yes);
            }
            _ => panic!("expected knowledge delete"),
        }
    }

    #[test]
    fn test_knowledge_add_needs_entries() {
        assert!(Cli::try_parse_from(["brainboard", "knowledge", "add"]).is_err());

        let cli = Cli::try_parse_from([
            "brainboard", "knowledge", "add", "-b", "Legal", "a.pdf", "https://x.io",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Knowledge {
                action: KnowledgeActions::Add { brain, entries },
            }) => {
                assert_eq!(brain.as_deref(), Some("Legal"));
                assert_eq!(entries, vec!["a.pdf", "https://x.io"]);
            }
            _ => panic!("expected knowledge add"),
        }
    }

    #[test]
    fn test_brains_delete_defaults_to_dry_run() {
        let cli = Cli::try_parse_from(["brainboard", "brains", "delete", "Legal"]).unwrap();
        match cli.command {
            Some(Commands::Brains {
                action: BrainActions::Delete { brain, yes },
            }) => {
                assert_eq!(brain, "Legal");
                assert!(!yes);
            }
            _ => panic!("expected brains delete"),
        }
        assert!(Cli::try_parse_from(["brainboard", "brains", "delete"]).is_err());
    }
}
