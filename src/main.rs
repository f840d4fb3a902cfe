use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

use bookfeed::app::{App, AppEvent};
use bookfeed::config::Config;
use bookfeed::feed::{self, CategoryFilter};
use bookfeed::ui;

/// Get the config directory path (~/.config/bookfeed/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("bookfeed"))
}

#[derive(Parser, Debug)]
#[command(
    name = "bookfeed",
    about = "Terminal browser for an infinitely-scrolling book-story feed"
)]
struct Args {
    /// Override the simulated load latency in milliseconds (0 = instant)
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Start with this category filter (e.g. "도서"; "전체" shows everything)
    #[arg(long, value_name = "NAME")]
    category: Option<String>,

    /// Generate PAGES pages of the feed, print them as JSON, and exit
    #[arg(long, value_name = "PAGES")]
    dump: Option<u32>,

    /// Fail every Nth page load (exercises the retry path)
    #[arg(long, value_name = "N")]
    fail_every: Option<u64>,

    /// Use this config file instead of ~/.config/bookfeed/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path).context("Failed to load configuration")?;

    // Non-interactive surface: print the deterministic feed and exit
    if let Some(pages) = args.dump {
        return dump_feed(&config, pages, args.category.as_deref());
    }

    let mut app = App::new(&config);

    if let Some(ms) = args.delay_ms {
        app.load_delay = Duration::from_millis(ms);
    }
    match args.fail_every {
        Some(0) => tracing::warn!("--fail-every 0 has no effect, ignoring"),
        Some(n) => app.fail_every = Some(n),
        None => {}
    }
    if let Some(label) = &args.category {
        match CategoryFilter::from_label(label) {
            Some(selection) => app.selection = selection,
            None => anyhow::bail!(
                "Unknown category '{label}' (expected \"전체\" or one of the feed categories)"
            ),
        }
    }

    // Channel for background load tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}

/// Generate `pages` pages batch by batch — so `created_at` matches what a
/// live session would have produced — and print them as JSON.
fn dump_feed(config: &Config, pages: u32, category: Option<&str>) -> Result<()> {
    let selection = match category {
        Some(label) => CategoryFilter::from_label(label)
            .with_context(|| format!("Unknown category '{label}'"))?,
        None => CategoryFilter::All,
    };

    let mut stories = Vec::with_capacity(pages as usize * config.page_size);
    for page in 0..u64::from(pages) {
        let start_id = page * config.page_size as u64 + 1;
        stories.extend(feed::generate(start_id, config.page_size));
    }

    let filtered = feed::filter(&stories, selection);
    serde_json::to_writer_pretty(std::io::stdout().lock(), &filtered)
        .context("Failed to serialize feed")?;
    println!();
    Ok(())
}
