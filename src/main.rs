//! MedFiles CLI
//!
//! Terminal front-end over the application controller:
//! - Sign in and out (the session persists between invocations)
//! - Open pages by query string or by shortcut
//! - Show the consolidated view
//! - Run a simulated upload

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medfiles::config::{generate_default_config, Config};
use medfiles::navigation::{
    parse_query, to_query, AppController, LoginOutcome, MemoryHistory, Modal, NavParams, Page,
};
use medfiles::session::FileStore;
use medfiles::store::{RecordId, RecordStore, StoreStats, User};
use medfiles::upload::{self, UploadPhase, UploadStep};
use medfiles::view::{text, Notice};

type App = AppController<FileStore, MemoryHistory>;

#[derive(Parser)]
#[command(name = "medfiles")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Prescriptions and medication history in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/medfiles/config.toml or ./medfiles.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and open the dashboard
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user and record counts
    Status,

    /// Open a page from a query string (e.g. "?page=prescription-detail&id=3")
    Open {
        #[arg(default_value = "")]
        query: String,
    },

    /// Show the dashboard
    Dashboard,

    /// Show one prescription
    Prescription {
        id: RecordId,
    },

    /// Show one medication's dose history
    History {
        id: RecordId,
    },

    /// Show all active medications grouped by name
    Consolidated,

    /// Simulate uploading a prescription file
    Upload {
        file: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct StatusReport<'a> {
    user: Option<&'a User>,
    stats: StoreStats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, skipped) = Config::resolve(cli.config.as_deref())?;
    init_logging(&config);
    for error in &skipped {
        tracing::warn!(%error, "Skipped config file");
    }

    let mut app = build_app(&config)?;

    match cli.command {
        Commands::Login { email, password } => {
            app.start("")?;
            match app.login(&email, &password)? {
                LoginOutcome::Accepted => show_current(&app, cli.format)?,
                LoginOutcome::Rejected(_) => {
                    print_notice(app.notice());
                    std::process::exit(1);
                }
            }
        }

        Commands::Logout => {
            app.start("")?;
            app.logout()?;
            println!("Sessão encerrada.");
        }

        Commands::Status => {
            app.start("")?;
            let report = StatusReport {
                user: app.current_user(),
                stats: app.store().stats(),
            };
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => {
                    match report.user {
                        Some(user) => println!("Usuário: {} <{}>", user.name, user.email),
                        None => println!("Nenhuma sessão ativa."),
                    }
                    println!("{}", report.stats);
                }
            }
        }

        Commands::Open { query } => open(&mut app, &query, cli.format)?,

        Commands::Dashboard => {
            let query = to_query(Page::Dashboard.id(), &NavParams::new());
            open(&mut app, &query, cli.format)?
        }

        Commands::Prescription { id } => {
            let query = to_query(Page::PrescriptionDetail.id(), &NavParams::new().with("id", id));
            open(&mut app, &query, cli.format)?
        }

        Commands::History { id } => {
            let query = to_query(Page::MedicationHistory.id(), &NavParams::new().with("id", id));
            open(&mut app, &query, cli.format)?
        }

        Commands::Consolidated => {
            if !signed_in(&mut app, cli.format)? {
                return Ok(());
            }
            let view = app.show_consolidated();
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
                OutputFormat::Text => print!("{}", text::render_consolidated(view)),
            }
        }

        Commands::Upload { file } => {
            if !signed_in(&mut app, cli.format)? {
                return Ok(());
            }
            run_upload(&mut app, &file).await;
            if app.upload().map(|task| task.phase()) == Some(UploadPhase::Finished) {
                show_current(&app, cli.format)?;
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing config to {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("medfiles={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn build_app(config: &Config) -> anyhow::Result<App> {
    let path = config.session_path();
    let storage = FileStore::open(&path)
        .with_context(|| format!("opening session store {}", path.display()))?;
    tracing::debug!("Session store: {:?}", path);

    Ok(AppController::new(Arc::new(RecordStore::builtin()), storage, MemoryHistory::new())
        .with_upload_schedule(config.upload_schedule())
        .with_success_timeout(config.success_timeout()))
}

/// Open the page named by `query` and print it. Signed out, this prints
/// the login page; unknown pages leave the dashboard up.
fn open(app: &mut App, query: &str, format: OutputFormat) -> anyhow::Result<()> {
    app.start("")?;
    if app.current_user().is_some() {
        let (page_id, params) = parse_query(query);
        app.navigate(&page_id, params);
    }
    show_current(app, format)
}

/// Start on the dashboard; print the login page instead if signed out
fn signed_in(app: &mut App, format: OutputFormat) -> anyhow::Result<bool> {
    app.start("")?;
    if app.current_user().is_some() {
        return Ok(true);
    }
    show_current(app, format)?;
    Ok(false)
}

fn show_current(app: &App, format: OutputFormat) -> anyhow::Result<()> {
    let Some(view) = app.view() else {
        return Ok(());
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
        OutputFormat::Text => print!("{}", text::render_page(view)),
    }
    print_notice(app.notice());
    Ok(())
}

fn print_notice(notice: Option<&Notice>) {
    if let Some(notice) = notice {
        eprintln!("{}", text::render_notice(notice));
    }
}

async fn run_upload(app: &mut App, file: &std::path::Path) {
    let name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    app.show_modal(Modal::Upload);
    let ticket = app.begin_upload(&name);
    let schedule = app.upload_schedule();
    println!("Enviando {}...", name);

    let interrupted = {
        let drive = upload::drive(schedule, |step| {
            let applied = app.complete_upload_step(ticket, step);
            if applied && step == UploadStep::Process {
                if let Some(notice) = app.upload_result() {
                    println!("{}", text::render_notice(notice));
                }
            }
            applied
        });
        tokio::select! {
            _ = drive => false,
            _ = tokio::signal::ctrl_c() => true,
        }
    };

    if interrupted && app.cancel_upload() {
        println!("Envio cancelado.");
    }
}
