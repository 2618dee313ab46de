//! Command-line interface for `home`
//!
//! Commands print their results on stdout; logs go to stderr.

use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use clap::{Parser, Subcommand};
use home_common::config::{resolve_port, TomlConfig};
use home_common::db::run_migrations;
use home_common::time::today;
use home_common::Error;
use sqlx::SqlitePool;
use tokio::signal;
use tracing::{error, info};

use crate::cleaning::{compute_expected, room_reports, RoomReport};
use crate::recipes::{self, Suggestion};
use crate::{build_router, db, AppState};

/// Household cleaning routines and recipe suggestions
#[derive(Parser, Debug)]
#[command(name = "home")]
#[command(version)]
pub struct Cli {
    /// SQLite database file (falls back to $HOME_SOFTWARE_DATABASE, config.toml, then database.db)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cleaning routines
    Cleaning {
        #[command(subcommand)]
        command: CleaningCommand,
    },
    /// Recipe suggestions
    Recipes {
        #[command(subcommand)]
        command: RecipesCommand,
    },
    /// Serve the cleaning web page
    Server {
        /// Port to listen on
        #[arg(short, long, env = "HOME_SOFTWARE_PORT")]
        port: Option<u16>,
    },
    /// Apply pending schema migrations
    Migrate,
}

#[derive(Subcommand, Debug)]
pub enum CleaningCommand {
    /// Display due routines per room
    Display,
    /// Record a routine as done today
    Record {
        /// Routine title, e.g. "Kitchen/Sink"
        title: String,

        /// Treat TITLE as a SQL LIKE pattern and record every match
        #[arg(long)]
        like: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecipesCommand {
    /// Register a new recipe (prompts when no title is given)
    Register { title: Option<String> },
    /// Suggest recipes for the coming days
    Suggest,
}

/// Run one command to completion against an already opened pool
pub async fn run(command: Command, pool: &SqlitePool, config: &TomlConfig) -> Result<()> {
    match command {
        Command::Cleaning {
            command: CleaningCommand::Display,
        } => {
            print!("{}", display_report(pool, &Local::now()).await?);
        }
        Command::Cleaning {
            command: CleaningCommand::Record { title, like },
        } => {
            record(pool, &title, like).await?;
        }
        Command::Recipes {
            command: RecipesCommand::Register { title },
        } => {
            let title = match title {
                Some(title) => title,
                None => prompt("Recipe title? > ").context("Failed to read recipe title")?,
            };
            recipes::register(pool, &title).await?;
        }
        Command::Recipes {
            command: RecipesCommand::Suggest,
        } => {
            let suggestion = recipes::suggest(pool, &Local::now(), &mut rand::thread_rng()).await?;
            print!("{}", render_suggestion(&suggestion));
        }
        Command::Server { port } => {
            serve(pool.clone(), resolve_port(port, config)).await?;
        }
        Command::Migrate => {
            info!("Migrating database");
            let applied = run_migrations(pool).await.context("Failed to migrate")?;
            info!("{} migrations applied", applied);
        }
    }

    Ok(())
}

/// Text report of due routines, one block per room
pub async fn display_report<Tz: TimeZone>(
    pool: &SqlitePool,
    now: &DateTime<Tz>,
) -> home_common::Result<String> {
    let routines = db::all_routines(pool).await?;
    let records = db::records_by_routine(pool).await?;
    let expected = compute_expected(&routines, &records, now);

    Ok(render_due_report(&room_reports(routines, expected)))
}

/// `"<Room> (<done>/<total>):"` then `"   <last|never> <Task>"` per due routine
pub fn render_due_report(reports: &[RoomReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!(
            "{} ({}/{}):\n",
            report.name,
            report.done_count(),
            report.total
        ));
        for routine in &report.expected {
            out.push_str(&format!(
                "   {} {}\n",
                routine.last_recorded_label(),
                routine.title.task()
            ));
        }
    }
    out
}

/// Record today's completion for the routine titled `title`.
///
/// Exact match by default; with `like`, every routine matching the pattern
/// is recorded in one transaction. No match is [`Error::NotFound`].
pub async fn record(pool: &SqlitePool, title: &str, like: bool) -> home_common::Result<usize> {
    let date = today();

    if like {
        let routine_ids = db::matching_routine_ids(pool, title).await?;
        if routine_ids.is_empty() {
            return Err(Error::NotFound(format!("no routine matching '{}'", title)));
        }
        info!("Recording {} routines", routine_ids.len());
        return db::insert_records(pool, &routine_ids, date).await;
    }

    let routine_id = db::routine_id_by_title(pool, title)
        .await?
        .ok_or_else(|| Error::NotFound(format!("routine '{}'", title)))?;
    db::insert_record(pool, routine_id, date).await?;
    info!("Recorded {}", title);

    Ok(1)
}

pub fn render_suggestion(suggestion: &Suggestion) -> String {
    let (header, prefix) = match suggestion {
        Suggestion::AlreadySuggested(_) => ("Already suggested:\n", "   "),
        Suggestion::Drawn(_) => ("", "Suggested: "),
    };

    let mut out = header.to_string();
    for recipe in suggestion.recipes() {
        out.push_str(&format!("{}{}\n", prefix, recipe.title));
    }
    out
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

/// Serve the web view until Ctrl+C or SIGTERM
pub async fn serve(pool: SqlitePool, port: u16) -> Result<()> {
    let app = build_router(AppState::new(pool));
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://localhost:{}/cleaning/", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
