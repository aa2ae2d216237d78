//! Interactive lessons for the state-management patterns in `statecraft`.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use statecraft::cart::MonotonicIds;
use statecraft::channels::{FileStorage, HttpFetcher, RESOURCES};
use statecraft::config::Config;
use statecraft::logging::{init_tracing, LogTarget, LOG_ENV};
use statecraft::shell::{
    run_lesson, CallbackLesson, CartLesson, CounterLesson, FetchLesson, Lesson, MemoLesson,
    NameLesson, RefsLesson, ThemeLesson, WidthLesson,
};

#[derive(Parser)]
#[command(
    name = "statecraft",
    version,
    about = "Line-driven lessons for reducers, context and hooks"
)]
struct Cli {
    /// Config file (default: <config dir>/statecraft/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    lesson: LessonCommand,
}

#[derive(Subcommand)]
enum LessonCommand {
    /// Shopping cart driven by ADD_ITEM / REMOVE_ITEM.
    Cart,
    /// Score and pet counters with functional updates.
    Counter,
    /// Theme shared through context.
    Theme {
        /// Start with the dark theme.
        #[arg(long)]
        dark: bool,
    },
    /// Memoized slow computation.
    Memo,
    /// Memoized callback handed to a list.
    Callback,
    /// Render counter and previous value kept in refs.
    Refs,
    /// Persisted name and a custom context accessor.
    Name,
    /// Fetch a resource whenever the selection changes.
    Fetch {
        /// Resource selected on start (default from config).
        #[arg(long)]
        resource: Option<String>,
    },
    /// Window width tracked through resize events.
    Width {
        /// Simulate resizes with the `resize` command instead of the terminal.
        #[arg(long)]
        simulate: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&LogTarget::resolve(cli.verbose, std::env::var(LOG_ENV).ok()));

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => Config::load().context("load config")?,
    };
    tracing::debug!(config = ?config, "Configuration loaded");

    match cli.lesson {
        LessonCommand::Cart => drive(&mut CartLesson::new(Arc::new(MonotonicIds::new()))),
        LessonCommand::Counter => drive(&mut CounterLesson::new()),
        LessonCommand::Theme { dark } => drive(&mut ThemeLesson::new(dark)?),
        LessonCommand::Memo => drive(&mut MemoLesson::new(config.memo.slow_iterations)),
        LessonCommand::Callback => drive(&mut CallbackLesson::new()),
        LessonCommand::Refs => drive(&mut RefsLesson::new()),
        LessonCommand::Name => {
            let storage = Arc::new(FileStorage::new(config.storage.path.clone()));
            let mut lesson = NameLesson::new(storage, &config.storage.name_key)
                .with_context(|| format!("open storage {}", config.storage.path.display()))?;
            drive(&mut lesson)
        }
        LessonCommand::Fetch { resource } => {
            let runtime = tokio::runtime::Runtime::new().context("start async runtime")?;
            let fetcher = HttpFetcher::from_config(&config.fetch).context("build HTTP client")?;
            let resource = resource.unwrap_or_else(|| config.fetch.default_resource.clone());
            if !RESOURCES.contains(&resource.as_str()) {
                bail!("unknown resource '{resource}' (expected one of {})", RESOURCES.join(", "));
            }
            let mut lesson = FetchLesson::new(
                runtime.handle().clone(),
                Arc::new(fetcher),
                &resource,
                config.fetch.limit,
            );
            drive(&mut lesson)
        }
        LessonCommand::Width { simulate } => {
            let mut lesson = if simulate {
                WidthLesson::simulated(80, 24)
            } else {
                WidthLesson::terminal().context("watch terminal size")?
            };
            drive(&mut lesson)
        }
    }
}

fn drive(lesson: &mut dyn Lesson) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_lesson(lesson, stdin.lock(), &mut stdout).context("lesson I/O")
}
