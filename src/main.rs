//! dexview - A terminal catalogue browser for the PokeAPI.
//!
//! Usage:
//!   dexview                  Launch interactive TUI
//!   dexview list             Print the loaded catalogue
//!   dexview show NAME        Show one item with its stats
//!   dexview search QUERY     Print items whose name contains QUERY
//!   dexview export           Export the catalogue to JSON
//!   dexview --help           Show help

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dexview_core::{CatalogueConfig, CatalogueStore, FilterState, ItemDetail, StatKind};
use dexview_fetch::{BatchFetcher, ClientConfig, LoadOutcome, PaginationController, PokeApiClient};
use dexview_tui::ThemeVariant;

#[derive(Parser)]
#[command(
    name = "dexview",
    version,
    about = "A terminal catalogue browser for the PokeAPI",
    long_about = "dexview pages through the first-generation creature catalogue.\n\n\
                  Launch the interactive TUI by running `dexview`, or use \
                  subcommands for quick lookups."
)]
struct Cli {
    /// Items requested per page
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Maximum number of items to load
    #[arg(long = "max", global = true)]
    max_items: Option<usize>,

    /// API root URL
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Do not load the first page on startup
    #[arg(long)]
    no_load: bool,

    /// Color theme for the TUI (dark or light)
    #[arg(long)]
    theme: Option<ThemeVariant>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Load the catalogue and print one line per item
    List {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Fetch a single item by name and print its details
    Show {
        /// Item name, e.g. "pikachu"
        name: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Load the catalogue and print the items matching a query
    Search {
        /// Case-insensitive substring of the name
        query: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Export the loaded catalogue to JSON
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref(), cli.command.is_none())?;

    let Some(command) = cli.command else {
        let config = dexview_tui::TuiConfig::new()
            .with_page_size(cli.page_size)
            .with_max_items(cli.max_items)
            .with_api_base(cli.api_base)
            .with_load_on_startup(cli.no_load.then_some(false))
            .with_theme(cli.theme);
        return dexview_tui::run_with_config(config);
    };

    let mut builder = CatalogueConfig::builder();
    if let Some(page_size) = cli.page_size {
        builder.page_size(page_size);
    }
    if let Some(max_items) = cli.max_items {
        builder.max_items(max_items);
    }
    let catalogue = builder.build().context("Invalid catalogue settings")?;

    let client_config = match cli.api_base {
        Some(base) => ClientConfig::new().with_api_base(base),
        None => ClientConfig::new(),
    };
    let client = PokeApiClient::new(client_config).context("Failed to build HTTP client")?;

    let rt = tokio::runtime::Runtime::new()?;

    match command {
        Command::List { format } => {
            let store = rt.block_on(load_catalogue(client, &catalogue))?;
            let items: Vec<&ItemDetail> = store.iter().collect();
            print_items(&items, format)?;
        }
        Command::Show { name, format } => {
            let detail = rt
                .block_on(client.detail_by_name(&name))
                .with_context(|| format!("Failed to fetch {name}"))?;
            match format {
                OutputFormat::Text => print_detail(&detail),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&detail)?),
            }
        }
        Command::Search { query, format } => {
            let store = rt.block_on(load_catalogue(client, &catalogue))?;
            let filter = FilterState::apply(store.order(), &query, catalogue.min_query_len);
            if !filter.is_active() {
                bail!(
                    "Query must be at least {} characters",
                    catalogue.min_query_len
                );
            }
            let items: Vec<&ItemDetail> = filter
                .matches()
                .iter()
                .filter_map(|id| store.get(id).ok())
                .collect();
            if items.is_empty() && matches!(format, OutputFormat::Text) {
                eprintln!("No matches for \"{}\"", query.trim());
            }
            print_items(&items, format)?;
        }
        Command::Export { output } => {
            let store = rt.block_on(load_catalogue(client, &catalogue))?;
            let items: Vec<&ItemDetail> = store.iter().collect();
            let json = serde_json::to_string_pretty(&items)?;

            match output {
                Some(output_path) => {
                    std::fs::write(&output_path, json)
                        .with_context(|| format!("Failed to write {}", output_path.display()))?;
                    eprintln!("Exported {} items to {}", items.len(), output_path.display());
                }
                None => {
                    println!("{}", json);
                }
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// Logs go to `log_file` when given. Otherwise they go to stderr, except for
/// the TUI, which owns the terminal and logs nowhere.
fn init_logging(verbose: u8, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let log_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let file_layer = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };
    let stderr_layer = (file_layer.is_none() && !interactive).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to initialize logging")
}

/// Load every page up to the configured bound.
async fn load_catalogue(client: PokeApiClient, config: &CatalogueConfig) -> Result<CatalogueStore> {
    let fetcher = BatchFetcher::new(Arc::new(client));
    let mut pager = PaginationController::new(config);
    let mut store = CatalogueStore::new();

    eprintln!("Loading up to {} items...", pager.max_items());

    while !pager.is_exhausted() {
        match pager
            .load_next(&fetcher, &mut store)
            .await
            .context("Failed to load catalogue")?
        {
            LoadOutcome::Loaded { loaded, .. } => {
                eprintln!("  {loaded}/{}", pager.max_items());
            }
            LoadOutcome::Exhausted => break,
        }
    }

    Ok(store)
}

/// Print items as a table or JSON array.
fn print_items(items: &[&ItemDetail], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for detail in items {
                println!(
                    " {:<5} {:<14} {}",
                    detail.number_label(),
                    detail.display_name(),
                    detail.types.join("/")
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
    }
    Ok(())
}

/// Print one item with a bar per base stat.
fn print_detail(detail: &ItemDetail) {
    println!();
    println!("{}", "─".repeat(50));
    println!(" {} {}", detail.number_label(), detail.display_name());
    println!(" {}", detail.types.join(" / "));
    println!("{}", "─".repeat(50));
    println!(" Height:          {:.1} m", detail.height_m());
    println!(" Weight:          {:.1} kg", detail.weight_kg());
    match detail.base_experience {
        Some(xp) => println!(" Base Experience: {xp}"),
        None => println!(" Base Experience: unknown"),
    }
    println!(" Abilities:       {}", detail.abilities.join(", "));
    println!();
    println!(" {} Stats", detail.display_name());

    let max = StatKind::ALL
        .iter()
        .map(|kind| detail.stats.get(*kind))
        .max()
        .unwrap_or(0)
        .max(1);
    for kind in StatKind::ALL {
        let value = detail.stats.get(kind);
        println!(
            "   {:>15} {:>3} {}",
            kind.label(),
            value,
            make_bar(f64::from(value) / f64::from(max), 25)
        );
    }
    println!("   {:>15} {:>3}", "total", detail.stats.total());
}

/// Create a simple ASCII bar.
fn make_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
