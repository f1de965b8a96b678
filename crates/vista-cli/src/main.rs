//! Vista command line host
//!
//! Renders view documents from files for inspection, and serves a live view
//! session to an extension process over stdio.

mod serve;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vista_core::config::{Config, Directories};
use vista_core::{Notification, ViewSession, parse, parse_with_report};

/// Vista view host
#[derive(Parser)]
#[command(name = "vista")]
#[command(about = "Vista - declarative view documents for launcher extensions")]
#[command(version)]
#[command(after_help = "\
Examples:
  vista render view.json                  Render a document and print the result
  vista render view.json --query git      Render, then search
  vista render - < view.json              Read the document from stdin
  vista actions view.json --item build    Action panel for one item
  vista serve                             Serve a session on stdin/stdout
  vista --log-file serve                  Also log to the default log file

Logging goes to stderr. Set RUST_LOG to change the level, e.g. RUST_LOG=vista=trace.
")]
struct Cli {
    /// Config file (defaults to ~/.config/vista/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also write logs to a file, `--log-file=PATH` to pick one
    /// (defaults to ~/.local/share/vista/vista.log)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and render a document, print the reconciliation as JSON
    Render {
        /// Document JSON file, or - for stdin
        file: PathBuf,

        /// Search text applied after the first render
        #[arg(long, short)]
        query: Option<String>,

        /// Item id to select after rendering
        #[arg(long, short)]
        select: Option<String>,
    },

    /// Print the action panel for the selection
    Actions {
        /// Document JSON file, or - for stdin
        file: PathBuf,

        /// Item id to select first
        #[arg(long, short)]
        item: Option<String>,
    },

    /// Serve a view session over length-prefixed JSON-RPC on stdin/stdout
    Serve,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match cli.log_file {
        Some(Some(path)) => Some(path),
        Some(None) => Some(Directories::new()?.log_file),
        None => None,
    };
    setup_logging(log_file.as_deref())?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            file,
            query,
            select,
        } => {
            let output = render_document(
                config,
                &read_document(&file)?,
                query.as_deref(),
                select.as_deref(),
            );
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Actions { file, item } => {
            let output = document_actions(config, &read_document(&file)?, item.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Serve => {
            serve::run(config, tokio::io::stdin(), tokio::io::stdout()).await?;
        }
    }

    Ok(())
}

/// Stdout carries command output and RPC frames, so logs go to stderr and,
/// when asked, to a file.
fn setup_logging(log_file: Option<&Path>) -> Result<()> {
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vista={default_level}")));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    let file_layer = match log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Log file has no file name: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let file_appender = tracing_appender::rolling::never(dir, name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Lives for the whole process
            std::mem::forget(guard);

            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(filter)
        .init();

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Directories::new()?.config_file,
    };
    let config = Config::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

fn read_document(file: &Path) -> Result<Value> {
    let content = if file == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read document from stdin")?;
        content
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("{} is not JSON", file.display()))
}

/// One render, an optional search and an optional selection, summarized.
fn render_document(
    config: Config,
    json: &Value,
    query: Option<&str>,
    select: Option<&str>,
) -> Value {
    let (document, report) = parse_with_report(json);
    for diagnostic in &report.diagnostics {
        warn!("{diagnostic}");
    }

    let kind = document.kind();
    let mut session = ViewSession::new(config, Vec::<Notification>::new());
    let mut reconciliation = session.render(document);

    if let Some(query) = query {
        let searched = session.set_search_text(query, Instant::now());
        // Throttled documents settle once the window has passed
        let searched =
            searched.or_else(|| session.next_deadline().and_then(|at| session.poll(at)));
        if let Some(searched) = searched {
            reconciliation = searched;
        }
    }

    let selection_event = select.and_then(|id| session.select_id(id));

    json!({
        "kind": kind.to_string(),
        "diagnostics": report.diagnostics,
        "reconciliation": reconciliation,
        "selectionEvent": selection_event,
        "layout": session.layout(),
        "selection": session.selection(),
        "notifications": session.notifier(),
    })
}

fn document_actions(config: Config, json: &Value, item: Option<&str>) -> Result<Value> {
    let mut session = ViewSession::new(config, Vec::<Notification>::new());
    session.render(parse(json));

    if let Some(id) = item {
        session.select_id(id);
        if session.selection().map(|s| s.id.as_str()) != Some(id) {
            bail!("No visible item with id '{id}'");
        }
    }

    Ok(serde_json::to_value(session.actions())?)
}
