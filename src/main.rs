//! Agenda CLI
//!
//! Command-line dashboard for the agenda REST backend:
//! - Browse technical areas and their event counters
//! - Open an area dashboard with filters
//! - Manage proposals
//! - Watch for new events

use agenda::config::{generate_default_config, Config, LoggingConfig};
use agenda::render::{self, text, Page};
use agenda::{
    poller, ApiClient, DashboardResult, DateRange, EventFilter, HttpTransport, Presenter,
    ProposalForm,
};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Dashboard = agenda::Dashboard<HttpTransport>;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dashboard for the legislative agenda backend")]
#[command(long_about = "Agenda dashboard client.\nBrowse technical areas, follow legislative events and track proposals with CNM's stance.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List technical areas with their event counters
    Areas {
        /// Count only events from this date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Count only events up to this date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },

    /// Show the dashboard of one area
    Dashboard {
        /// Area name
        area: String,
        /// Only events with this status
        #[arg(short, long)]
        status: Option<String>,
        /// Only events of this type
        #[arg(short = 't', long = "type")]
        event_type: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List events without a technical area
    Uncategorized,

    /// Keep running and report new events as they appear
    Watch {
        /// Polling interval in seconds (default: from config)
        #[arg(long)]
        interval_secs: Option<u64>,
    },

    /// Manage proposals
    Proposal {
        #[command(subcommand)]
        action: ProposalCommand,
    },

    /// Search events by free text
    Search {
        /// Search term
        term: String,
    },

    /// Check the backend health
    Health,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ProposalCommand {
    /// Add a proposal to an area
    Add {
        /// Technical area
        #[arg(long)]
        area: String,
        /// Project number, e.g. "PL 2874/2025"
        #[arg(long)]
        number: String,
        /// Summary (ementa)
        #[arg(long)]
        summary: String,
        /// Originating chamber
        #[arg(long)]
        chamber: String,
        /// Review form
        #[arg(long)]
        review_form: String,
        /// Thematic axis
        #[arg(long, default_value = "")]
        axis: String,
        /// Current status
        #[arg(long)]
        status: String,
        /// Whether an analysis applies
        #[arg(long)]
        analysis_applicable: String,
        /// Analysis deadline
        #[arg(long, default_value = "")]
        deadline: String,
        /// Whether the analysis was done
        #[arg(long)]
        analysis_done: String,
        /// Analysis document reference
        #[arg(long)]
        document: Option<String>,
        /// CNM position
        #[arg(long)]
        position: String,
        /// Priority
        #[arg(long)]
        priority: String,
        /// Free-text note (cut at 1500 characters)
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Delete a proposal
    Delete {
        /// Proposal id
        id: i64,
        /// Technical area the proposal belongs to
        #[arg(long)]
        area: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Presenter writing toasts and notifications to the terminal
struct TerminalPresenter {
    format: OutputFormat,
    assume_yes: bool,
}

impl Presenter for TerminalPresenter {
    fn show_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    fn show_success(&self, message: &str) {
        eprintln!("✓ {}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{} [s/N] ", message);
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(
            answer.trim().to_lowercase().as_str(),
            "s" | "sim" | "y" | "yes"
        )
    }

    fn notify(&self, notification: &render::NotificationView) {
        match self.format {
            OutputFormat::Text => print!("{}", text::notification(notification)),
            OutputFormat::Json => match serde_json::to_string(notification) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!(error = %e, "Failed to encode notification"),
            },
            OutputFormat::Html => println!("{}", render::html::notification(notification)),
        }
    }

    // Pages are emitted explicitly by each command
    fn redraw(&self, _page: &Page) {}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);

    let assume_yes = matches!(
        &cli.command,
        Commands::Proposal {
            action: ProposalCommand::Delete { yes: true, .. }
        }
    );
    let presenter = Arc::new(TerminalPresenter {
        format: cli.format,
        assume_yes,
    });
    let client = ApiClient::http(config.api.client_config())
        .context("Failed to build HTTP client")?;
    let dashboard = Dashboard::new(client, presenter);

    tracing::debug!(api = %config.api.base_url, "Agenda dashboard client");

    match cli.command {
        Commands::Areas { start, end } => {
            let range = parse_range(start.as_deref(), end.as_deref())?;
            exit_on_error(dashboard.set_date_filter(range).await);
            exit_on_error(dashboard.initialize().await);
            emit(&dashboard.page().await, cli.format, None)?;
        }

        Commands::Dashboard {
            area,
            status,
            event_type,
            start,
            end,
            output,
        } => {
            let range = parse_range(start.as_deref(), end.as_deref())?;
            exit_on_error(dashboard.set_date_filter(range).await);

            exit_on_error(dashboard.select_area(&area).await);

            let filter = EventFilter::new(status.as_deref(), event_type.as_deref());
            if !filter.is_empty() {
                dashboard.filter_events(filter).await;
            }

            emit(&dashboard.page().await, cli.format, output.as_deref())?;
        }

        Commands::Uncategorized => {
            exit_on_error(dashboard.show_uncategorized().await);
            emit(&dashboard.page().await, cli.format, None)?;
        }

        Commands::Watch { interval_secs } => {
            let interval = interval_secs.unwrap_or(config.polling.interval_secs);
            if interval_secs.is_none() && !config.polling.enabled {
                eprintln!("Polling is disabled in the configuration.");
                eprintln!("Enable [polling] or pass --interval-secs.");
                std::process::exit(1);
            }

            if interval == 0 {
                eprintln!("Polling interval must be at least one second.");
                std::process::exit(1);
            }

            exit_on_error(dashboard.initialize().await);
            emit(&dashboard.page().await, cli.format, None)?;

            let subscription = poller::start(dashboard.clone(), Duration::from_secs(interval))?;
            eprintln!(
                "Watching for new events every {}s. Press Ctrl+C to stop.",
                interval
            );

            tokio::signal::ctrl_c()
                .await
                .context("Failed to install Ctrl+C handler")?;

            subscription.cancel().await;
            tracing::info!("Watch stopped");
        }

        Commands::Proposal { action } => match action {
            ProposalCommand::Add {
                area,
                number,
                summary,
                chamber,
                review_form,
                axis,
                status,
                analysis_applicable,
                deadline,
                analysis_done,
                document,
                position,
                priority,
                note,
            } => {
                exit_on_error(dashboard.select_area(&area).await);

                let mut form = ProposalForm {
                    project_number: number,
                    summary,
                    originating_chamber: chamber,
                    review_form,
                    thematic_axis: axis,
                    status,
                    analysis_applicable,
                    analysis_deadline: deadline,
                    analysis_done,
                    analysis_document: document,
                    cnm_position: position,
                    priority,
                    ..Default::default()
                };
                form.note.input(&note);

                let proposal = exit_on_error(dashboard.create_proposal(&form).await);
                match cli.format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&proposal)?),
                    _ => println!("Created proposal {} ({})", proposal.id, proposal.fields.project_number),
                }
            }

            ProposalCommand::Delete { id, area, .. } => {
                exit_on_error(dashboard.select_area(&area).await);

                if !exit_on_error(dashboard.delete_proposal(id).await) {
                    println!("Cancelled.");
                }
            }
        },

        Commands::Search { term } => {
            let events = match dashboard.client().search_events(&term).await {
                Ok(events) => events,
                Err(e) => {
                    eprintln!("Search failed: {}", e);
                    std::process::exit(1);
                }
            };

            let cards: Vec<_> = events.iter().map(render::event_card).collect();
            match cli.format {
                OutputFormat::Text => print!("{}", text::event_list(&cards)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
                OutputFormat::Html => println!("{}", render::html::event_grid(&cards)),
            }
        }

        Commands::Health => match dashboard.client().health_check().await {
            Ok(health) => match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&health)?),
                _ => {
                    println!("API Status: {}", health.status);
                    if let Some(database) = &health.database {
                        println!("Database: {}", database);
                    }
                    if let Some(timestamp) = &health.timestamp {
                        println!("Timestamp: {}", timestamp);
                    }
                }
            },
            Err(e) => {
                eprintln!("Cannot reach the agenda API at {}", config.api.base_url);
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Config { output } => write_config(output.as_deref())?,
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("agenda={}", config.level)));

    let writer = match &config.file {
        Some(path) => match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
            Err(e) => {
                eprintln!("Cannot open log file {}: {}", path, e);
                BoxMakeWriter::new(std::io::stderr)
            }
        },
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }
}

/// Unwrap a handler result; the presenter already reported the failure
fn exit_on_error<T>(result: DashboardResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            std::process::exit(1);
        }
    }
}

fn parse_range(start: Option<&str>, end: Option<&str>) -> anyhow::Result<DateRange> {
    DateRange::parse(start, end).context("Invalid date, expected YYYY-MM-DD")
}

fn emit(page: &Page, format: OutputFormat, output: Option<&Path>) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Text => text::page(page),
        OutputFormat::Json => serde_json::to_string_pretty(page)?,
        OutputFormat::Html => render::html::page(page),
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &rendered)?;
            println!("Dashboard written to {:?}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn write_config(output: Option<&Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}
