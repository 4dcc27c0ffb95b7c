mod api;
mod cli;
mod config;
mod history;
mod knowledge;
mod logging;
mod output;
mod tui;
mod utils;

use anyhow::{bail, Result};
use api::{Backend, Brain, HttpBackend};
use cli::{
    BrainActions, Cli, Commands, ConfigActions, ConnectionActions, KnowledgeActions, OutputFormat,
    SortArg,
};
use config::Config;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use history::HistoryLogger;
use knowledge::Knowledge;
use output::{DeleteResult, FailedItem, KnowledgeListing};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use tui::logic::{classify_entry, project, SortDirective};
use tui::service::requests::chat_name;
use tui::service::brains::FeedReport;
use tui::service::{add_knowledge, create_and_feed, remove_brain, BrainCreation, BrainRemoval};
use tui::App;
use utils::{format_size_with, mask_secret, truncate_middle};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(e) = logging::init(&Config::data_dir().join("brainboard.log")) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = match Config::load() {
        Ok(config) => run(cli, config),
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli, config: Config) -> Result<ExitCode> {
    match cli.command {
        None => run_tui(config)?,
        Some(Commands::Knowledge { action }) => {
            let backend = connect(&config)?;
            match action {
                KnowledgeActions::List {
                    brain,
                    query,
                    sort,
                    desc,
                    format,
                } => run_knowledge_list(
                    &backend,
                    &config,
                    brain.as_deref(),
                    &query,
                    SortArg::directive(sort, desc),
                    format,
                )?,
                KnowledgeActions::Delete {
                    brain,
                    ids,
                    query,
                    yes,
                    format,
                } => {
                    let result = run_knowledge_delete(
                        &backend,
                        &config,
                        brain.as_deref(),
                        &ids,
                        query.as_deref(),
                        yes,
                        format,
                    )?;
                    if result.is_some_and(|r| !r.failed_items.is_empty()) {
                        return Ok(ExitCode::from(2));
                    }
                }
                KnowledgeActions::Add { brain, entries } => {
                    run_knowledge_add(&backend, brain.as_deref(), &entries)?
                }
                KnowledgeActions::Describe { id, description } => {
                    run_knowledge_describe(&backend, &id, description.as_deref())?
                }
            }
        }
        Some(Commands::Brains { action }) => {
            let backend = connect(&config)?;
            match action {
                BrainActions::List { format } => run_brains_list(&backend, format)?,
                BrainActions::Create {
                    name,
                    description,
                    feed,
                } => run_brains_create(&backend, name, description, &feed)?,
                BrainActions::Delete { brain, yes } => {
                    run_brains_delete(&backend, &brain, yes)?;
                }
            }
        }
        Some(Commands::Connections { action }) => {
            let backend = connect(&config)?;
            match action {
                ConnectionActions::List { format } => run_connections_list(&backend, format)?,
                ConnectionActions::Browse {
                    sync,
                    folder,
                    format,
                } => run_connections_browse(&backend, sync, folder.as_deref(), format)?,
            }
        }
        Some(Commands::Chats { format }) => run_chats(&connect(&config)?, format)?,
        Some(Commands::Ask { brain, question }) => {
            run_ask(&connect(&config)?, brain.as_deref(), &question)?
        }
        Some(Commands::Config { action }) => run_config(action, config)?,
        Some(Commands::History { limit }) => run_history(limit)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn connect(config: &Config) -> Result<HttpBackend> {
    Ok(HttpBackend::new(&config.api)?)
}

fn run_tui(config: Config) -> Result<()> {
    let backend: Arc<dyn Backend> = Arc::new(connect(&config)?);
    let mouse = config.ui.mouse;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }

    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    info!("starting TUI");
    let mut app = App::new(config, backend);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Finds a brain by id, then by case-insensitive name. Without a selector
/// the first brain is used.
fn resolve_brain(backend: &dyn Backend, selector: Option<&str>) -> Result<Brain> {
    let brains = backend.list_brains()?;
    let found = match selector {
        None => brains.into_iter().next(),
        Some(selector) => {
            let by_id = brains.iter().position(|b| b.id == selector);
            let index = by_id.or_else(|| {
                brains
                    .iter()
                    .position(|b| b.name.eq_ignore_ascii_case(selector))
            });
            index.map(|i| brains[i].clone())
        }
    };
    match (found, selector) {
        (Some(brain), _) => Ok(brain),
        (None, Some(selector)) => bail!("No brain matches '{}'", selector),
        (None, None) => bail!("You have no brain yet. Create one with 'brainboard brains create'"),
    }
}

fn print_knowledge(items: &[Knowledge], sizes_in_bytes: bool) {
    for item in items {
        let size = item
            .file_size
            .map(|bytes| format_size_with(bytes, sizes_in_bytes))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<4} {:<38} {:<12} {:>10}  {}",
            item.source.label(),
            truncate_middle(item.display_name(), 38),
            item.status,
            size,
            item.id
        );
    }
}

fn run_knowledge_list(
    backend: &dyn Backend,
    config: &Config,
    brain: Option<&str>,
    query: &str,
    sort: SortDirective,
    format: OutputFormat,
) -> Result<()> {
    let brain = resolve_brain(backend, brain)?;
    let items = backend.list_knowledge(&brain.id)?;
    let shown = project(&items, query, sort);

    match format {
        OutputFormat::Json => {
            let listing =
                KnowledgeListing::new(&brain.id, query, sort.key.as_str(), items.len(), shown);
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        OutputFormat::Human => {
            println!("{} ({}):", brain.name, sort.label());
            print_knowledge(&shown, config.ui.show_sizes_in_bytes);
            println!();
            println!("{} of {} shown", shown.len(), items.len());
        }
    }

    Ok(())
}

/// Items named by id, or else the ones the query matches. Ids that do not
/// exist in the brain are reported, not silently ignored.
fn pick_for_delete(items: &[Knowledge], ids: &[String], query: Option<&str>) -> Result<Vec<Knowledge>> {
    if !ids.is_empty() {
        let missing: Vec<&str> = ids
            .iter()
            .filter(|id| !items.iter().any(|k| &k.id == *id))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            bail!("Unknown knowledge id(s): {}", missing.join(", "));
        }
        return Ok(items
            .iter()
            .filter(|k| ids.contains(&k.id))
            .cloned()
            .collect());
    }
    match query {
        Some(query) if !query.is_empty() => Ok(project(items, query, SortDirective::default())),
        _ => bail!("Nothing to delete: pass --id or --query"),
    }
}

fn run_knowledge_delete(
    backend: &dyn Backend,
    config: &Config,
    brain: Option<&str>,
    ids: &[String],
    query: Option<&str>,
    yes: bool,
    format: OutputFormat,
) -> Result<Option<DeleteResult>> {
    let start = Instant::now();
    let brain = resolve_brain(backend, brain)?;
    let items = backend.list_knowledge(&brain.id)?;
    let targets = pick_for_delete(&items, ids, query)?;

    if !yes {
        println!("Would delete {} item(s) from {}:", targets.len(), brain.name);
        print_knowledge(&targets, config.ui.show_sizes_in_bytes);
        println!("Use --yes to execute");
        return Ok(None);
    }

    let history = HistoryLogger::new();
    let mut deleted = Vec::new();
    let mut failed_items = Vec::new();
    for item in &targets {
        match backend.delete_knowledge(&brain.id, &item.id) {
            Ok(()) => {
                info!(brain_id = %brain.id, id = %item.id, "knowledge deleted");
                if config.history.log_deletions {
                    if let Err(e) = history.log_delete(&brain.id, item) {
                        eprintln!("Warning: failed to write history: {}", e);
                    }
                }
                deleted.push(item.id.clone());
            }
            Err(e) => failed_items.push(FailedItem {
                id: item.id.clone(),
                name: item.display_name().to_string(),
                error: e.to_string(),
            }),
        }
    }

    let result = DeleteResult::new(
        &brain.id,
        deleted,
        failed_items,
        start.elapsed().as_millis() as u64,
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Human => {
            println!("Results:");
            println!("  Deleted: {} items", result.deleted.len());
            println!("  Failed: {} items", result.failed_items.len());
            println!("  Duration: {}ms", result.duration_ms);
            if !result.failed_items.is_empty() {
                println!("\nFailed items:");
                for item in &result.failed_items {
                    println!("  - {} ({}): {}", item.name, item.id, item.error);
                }
            }
        }
    }

    Ok(Some(result))
}

fn run_knowledge_add(backend: &dyn Backend, brain: Option<&str>, entries: &[String]) -> Result<()> {
    let brain = resolve_brain(backend, brain)?;
    let feed: Vec<_> = entries.iter().filter_map(|entry| classify_entry(entry)).collect();
    if feed.is_empty() {
        bail!("Nothing to add: pass file paths or URLs");
    }
    let report = add_knowledge(backend, &brain, &feed)?;

    println!("Added to {} ({})", report.brain.name, report.brain.id);
    print_feed_report(&report);
    Ok(())
}

fn run_knowledge_describe(backend: &dyn Backend, id: &str, description: Option<&str>) -> Result<()> {
    let description = description.map(str::trim).filter(|d| !d.is_empty());
    let updated = backend.update_knowledge(id, description)?;
    match &updated.description {
        Some(text) => println!("{}: {}", updated.display_name(), text),
        None => println!("{}: description cleared", updated.display_name()),
    }
    Ok(())
}

fn run_brains_list(backend: &dyn Backend, format: OutputFormat) -> Result<()> {
    let brains = backend.list_brains()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&brains)?),
        OutputFormat::Human => {
            if brains.is_empty() {
                println!("No brain found.");
            }
            for brain in &brains {
                println!(
                    "  {:<30} {:<10} {}",
                    brain.name,
                    brain.status.as_deref().unwrap_or("-"),
                    brain.id
                );
            }
        }
    }
    Ok(())
}

fn run_brains_create(
    backend: &dyn Backend,
    name: String,
    description: String,
    feed: &[String],
) -> Result<()> {
    if name.trim().is_empty() {
        bail!("A brain needs a name");
    }
    let request = BrainCreation {
        name,
        description,
        feed: feed.iter().filter_map(|entry| classify_entry(entry)).collect(),
        ..Default::default()
    };
    let report = create_and_feed(backend, &request)?;

    println!("Created brain {} ({})", report.brain.name, report.brain.id);
    print_feed_report(&report);
    Ok(())
}

fn print_feed_report(report: &FeedReport) {
    println!("  Uploaded: {}", report.uploaded);
    println!("  Crawled: {}", report.crawled);
    if !report.failed.is_empty() {
        println!("\nFailed:");
        for failure in &report.failed {
            println!("  - {}", failure);
        }
    }
}

/// Without `yes` only reports what would happen.
fn run_brains_delete(
    backend: &dyn Backend,
    selector: &str,
    yes: bool,
) -> Result<Option<BrainRemoval>> {
    let brain = resolve_brain(backend, Some(selector))?;
    let verb = if brain.is_owned() { "delete" } else { "leave" };

    if !yes {
        println!("Would {} brain {} ({})", verb, brain.name, brain.id);
        println!("Use --yes to execute");
        return Ok(None);
    }

    let removal = remove_brain(backend, &brain)?;
    match removal {
        BrainRemoval::Deleted => println!("Deleted {}", brain.name),
        BrainRemoval::Unsubscribed => println!("Left {}", brain.name),
    }
    Ok(Some(removal))
}

fn run_connections_list(backend: &dyn Backend, format: OutputFormat) -> Result<()> {
    let syncs = backend.list_syncs()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&syncs)?),
        OutputFormat::Human => {
            if syncs.is_empty() {
                println!("No connection found.");
            }
            for sync in &syncs {
                println!(
                    "  {:>6}  {:<12} {} {}",
                    sync.id,
                    sync.provider,
                    sync.name,
                    sync.email.as_deref().unwrap_or("")
                );
            }
        }
    }
    Ok(())
}

fn run_connections_browse(
    backend: &dyn Backend,
    sync_id: i64,
    folder: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let elements = backend.list_sync_files(sync_id, folder)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&elements)?),
        OutputFormat::Human => {
            let folders = elements.folders();
            let documents = elements.documents();
            if folders.is_empty() && documents.is_empty() {
                println!("Empty folder");
            }
            for element in folders.iter().chain(documents.iter()) {
                let marker = if element.is_folder { "▸" } else { " " };
                println!("  {} {:<40} {}", marker, element.display_name(), element.id);
            }
        }
    }
    Ok(())
}

fn run_chats(backend: &dyn Backend, format: OutputFormat) -> Result<()> {
    let chats = backend.list_chats()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&chats)?),
        OutputFormat::Human => {
            for chat in &chats {
                println!(
                    "  {:<26} {}",
                    chat.creation_time.as_deref().unwrap_or(""),
                    chat.chat_name
                );
            }
        }
    }
    Ok(())
}

fn run_ask(backend: &dyn Backend, brain: Option<&str>, question: &str) -> Result<()> {
    if question.trim().is_empty() {
        bail!("The question is empty");
    }
    let brain = resolve_brain(backend, brain)?;
    if let Some(credits) = backend.user_data()?.remaining_credits {
        if credits <= 0 {
            bail!("No credits left");
        }
    }
    let chat = backend.create_chat(&chat_name(question.trim()))?;
    let answer = backend.ask_question(&chat.chat_id, &brain.id, question.trim())?;
    println!("{}", answer.assistant);
    Ok(())
}

fn run_config(action: ConfigActions, mut config: Config) -> Result<()> {
    match action {
        ConfigActions::Show => {
            println!("Current configuration ({}):", Config::config_path().display());
            println!("  API url: {}", config.api.base_url);
            println!(
                "  API key: {}",
                config
                    .api
                    .api_key
                    .as_deref()
                    .map(mask_secret)
                    .unwrap_or_else(|| "not set".to_string())
            );
            println!("  Timeout: {}s", config.api.timeout_secs);
            println!("  Show tokens: {}", config.ui.show_tokens);
            println!("  Sizes in bytes: {}", config.ui.show_sizes_in_bytes);
            println!("  Mouse: {}", config.ui.mouse);
            println!("  Log deletions: {}", config.history.log_deletions);
        }
        ConfigActions::Set { key, value } => {
            config.set_value(&key, &value)?;
            config.save()?;
            println!("Set {} to {}", key, if key == "api_key" { mask_secret(&value) } else { value });
        }
    }

    Ok(())
}

fn run_history(limit: usize) -> Result<()> {
    let logger = HistoryLogger::new();
    let entries = logger.read_history(Some(limit))?;

    if entries.is_empty() {
        println!("No history found.");
        return Ok(());
    }

    println!("Last {} deletion(s):\n", entries.len());

    for entry in entries {
        println!(
            "{} {} {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.action,
            entry.knowledge_id,
            entry.name.as_deref().unwrap_or("")
        );
        println!("    Brain: {}", entry.brain_id);
    }

    Ok(())
}
