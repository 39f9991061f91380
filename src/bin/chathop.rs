//! ChatHop CLI — prompt detection and bookmarks for saved chat pages.
//!
//! Usage:
//!   chathop sites
//!   chathop detect --url <url> <file> [--json]
//!   chathop watch --url <url> <file>
//!   chathop bookmark <subcommand> [--db path]
//!   chathop messages [--db path]

use chathop::bookmark::{filter_bookmarks, relative_date};
use chathop::session::{DocumentSource, FileSource};
use chathop::{
    AdapterFactory, BookmarkStore, Config, Location, MessageRouter, NewBookmark, OpenBookmarkStore,
    Page, PageEvent, PromptSession, SessionState, SiteAdapter, SqliteBookmarkStore,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::mpsc;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "chathop",
    version,
    about = "Navigate and bookmark the prompts of AI chat pages"
)]
struct Cli {
    /// Path to config file (default: <config_dir>/chathop/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported sites and their host rules
    Sites,
    /// Detect prompts in an HTML snapshot
    Detect {
        /// URL the snapshot was taken from
        #[arg(long)]
        url: String,
        /// HTML file
        file: PathBuf,
        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },
    /// Print the chat id for a URL
    ChatId {
        #[arg(long)]
        url: String,
    },
    /// Re-detect prompts whenever the snapshot file changes
    Watch {
        #[arg(long)]
        url: String,
        file: PathBuf,
    },
    /// Manage saved prompts
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
        /// Path to SQLite database file
        #[arg(long, global = true)]
        db: Option<PathBuf>,
    },
    /// Answer JSON requests from stdin, one per line
    Messages {
        /// Path to SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum BookmarkAction {
    /// Save one detected prompt
    Save {
        #[arg(long)]
        url: String,
        file: PathBuf,
        /// Prompt index as shown by `detect`
        #[arg(long)]
        index: usize,
        /// Title (default: "Prompt #N")
        #[arg(long)]
        title: Option<String>,
    },
    /// List saved prompts, newest first
    List {
        /// Only show prompts whose title, text or site contains this
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete a saved prompt by id
    Delete { id: String },
    /// Delete all saved prompts
    Clear,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(config: &Config, db: Option<PathBuf>) -> Result<SqliteBookmarkStore, String> {
    let db_path = db.unwrap_or_else(|| config.db_path());
    SqliteBookmarkStore::open(&db_path).map_err(|e| format!("Failed to open database: {}", e))
}

fn build_factory(config: &Config) -> Result<AdapterFactory, String> {
    config.factory().map_err(|e| format!("Invalid site profile: {}", e))
}

/// Parse the URL, pick the adapter and load the snapshot.
fn load_page(
    factory: &AdapterFactory,
    url: &str,
    file: &Path,
) -> Result<(Arc<dyn SiteAdapter>, Page), String> {
    let location = Location::parse(url).map_err(|e| e.to_string())?;
    let adapter = factory
        .select_location(&location)
        .ok_or_else(|| format!("unsupported site '{}'", location.hostname))?;
    let page = FileSource::new(file)
        .snapshot(&location)
        .map_err(|e| format!("cannot read '{}': {}", file.display(), e))?;
    Ok((adapter, page))
}

fn cmd_sites(factory: &AdapterFactory) -> i32 {
    println!("{:<12}  {}", "SITE", "HOSTS");
    println!("{}", "-".repeat(56));
    for (name, rules) in factory.sites() {
        let hosts: Vec<String> = rules.iter().map(|r| r.to_string()).collect();
        println!("{:<12}  {}", name, hosts.join(", "));
    }
    0
}

fn cmd_detect(factory: &AdapterFactory, url: &str, file: &Path, json: bool) -> i32 {
    let (adapter, page) = match load_page(factory, url, file) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let prompts = adapter.detect_prompts(&page);
    let chat_id = adapter.chat_id(page.location());

    if json {
        let out = serde_json::json!({
            "site": adapter.site_name(),
            "chatId": chat_id,
            "prompts": prompts,
        });
        match serde_json::to_string_pretty(&out) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
        return 0;
    }

    println!(
        "{} | chat {}",
        adapter.site_name(),
        chat_id.as_deref().unwrap_or("(none)")
    );
    if prompts.is_empty() {
        println!("No prompts found.");
    }
    for prompt in &prompts {
        println!("{:>4}  {}", prompt.index, prompt.preview);
    }
    0
}

fn cmd_chat_id(factory: &AdapterFactory, url: &str) -> i32 {
    let location = match Location::parse(url) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let Some(adapter) = factory.select_location(&location) else {
        eprintln!("Error: unsupported site '{}'", location.hostname);
        return 1;
    };
    match adapter.chat_id(&location) {
        Some(id) => {
            println!("{}", id);
            0
        }
        None => {
            eprintln!("Not a {} chat page", adapter.site_name());
            1
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn print_state(state: &SessionState) {
    println!(
        "[{}] {} | chat {} | {} prompt(s)",
        state.refreshes,
        state.site.as_deref().unwrap_or("unsupported"),
        state.chat_id.as_deref().unwrap_or("(none)"),
        state.prompts.len()
    );
    for prompt in &state.prompts {
        println!("{:>4}  {}", prompt.index, prompt.preview);
    }
}

fn cmd_watch(config: &Config, factory: AdapterFactory, url: &str, file: PathBuf) -> i32 {
    let location = match Location::parse(url) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            return 1;
        }
    };
    let poll = config.poll_interval();
    let (session, mut state) =
        PromptSession::new(Arc::new(factory), FileSource::new(&file), location);
    let session = session.with_debounce(config.debounce());

    rt.block_on(async move {
        let (tx, rx) = mpsc::channel(64);
        let driver = async move {
            let mut ticker = tokio::time::interval(poll);
            let mut last = modified(&file);
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        let _ = tx.send(PageEvent::Teardown).await;
                        break;
                    }
                    _ = ticker.tick() => {
                        let current = modified(&file);
                        if current != last {
                            last = current;
                            if tx.send(PageEvent::Mutated).await.is_err() {
                                break;
                            }
                        }
                    }
                    changed = state.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        print_state(&state.borrow_and_update());
                    }
                }
            }
        };
        tokio::join!(session.run(rx), driver);
    });
    0
}

fn cmd_bookmark_save(
    store: &dyn BookmarkStore,
    factory: &AdapterFactory,
    url: &str,
    file: &Path,
    index: usize,
    title: Option<&str>,
) -> i32 {
    let (adapter, page) = match load_page(factory, url, file) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let prompts = adapter.detect_prompts(&page);
    let Some(prompt) = prompts.iter().find(|p| p.index == index) else {
        eprintln!("Error: no prompt #{} ({} detected)", index, prompts.len());
        return 1;
    };
    let bookmark = NewBookmark::from_prompt(adapter.as_ref(), page.location(), prompt, title);
    match store.save(&bookmark) {
        Ok(id) => {
            println!("Saved '{}' ({})", bookmark.title, id);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_bookmark_list(store: &dyn BookmarkStore, search: Option<&str>) -> i32 {
    let all = match store.list() {
        Ok(all) => all,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let shown = filter_bookmarks(&all, search.unwrap_or(""));
    if shown.is_empty() {
        println!("No saved prompts.");
        return 0;
    }
    let now = Utc::now();
    println!("{:<36}  {:<10}  {:<12}  {}", "ID", "SITE", "SAVED", "TITLE");
    println!("{}", "-".repeat(80));
    for b in &shown {
        println!(
            "{:<36}  {:<10}  {:<12}  {}",
            b.id,
            b.site,
            relative_date(b.timestamp, now),
            b.title
        );
    }
    println!(
        "{}",
        if all.len() == 1 {
            "1 prompt".to_string()
        } else {
            format!("{} prompts", all.len())
        }
    );
    0
}

fn cmd_bookmark_delete(store: &dyn BookmarkStore, id: &str) -> i32 {
    match store.delete(id) {
        Ok(true) => {
            println!("Deleted {}", id);
            0
        }
        Ok(false) => {
            eprintln!("Error: bookmark '{}' not found", id);
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_bookmark_clear(store: &dyn BookmarkStore) -> i32 {
    match store.clear() {
        Ok(n) => {
            println!("Deleted {} saved prompt(s)", n);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_messages(store: SqliteBookmarkStore) -> i32 {
    let router = MessageRouter::new(Arc::new(store));
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        println!("{}", router.handle_json(&line));
    }
    0
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match Config::resolve(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let factory = match build_factory(&config) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Sites => cmd_sites(&factory),
        Commands::Detect { url, file, json } => cmd_detect(&factory, &url, &file, json),
        Commands::ChatId { url } => cmd_chat_id(&factory, &url),
        Commands::Watch { url, file } => cmd_watch(&config, factory, &url, file),
        Commands::Bookmark { action, db } => {
            let store = match open_store(&config, db) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            match action {
                BookmarkAction::Save { url, file, index, title } => {
                    cmd_bookmark_save(&store, &factory, &url, &file, index, title.as_deref())
                }
                BookmarkAction::List { search } => cmd_bookmark_list(&store, search.as_deref()),
                BookmarkAction::Delete { id } => cmd_bookmark_delete(&store, &id),
                BookmarkAction::Clear => cmd_bookmark_clear(&store),
            }
        }
        Commands::Messages { db } => match open_store(&config, db) {
            Ok(store) => cmd_messages(store),
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
    };
    std::process::exit(code);
}
