mod error;
mod handlers;
mod models;
mod services;
mod utils;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use clap::{Arg, Command};
use log::{error, info};

use crate::models::AppState;
use crate::services::score_store::FileScoreStore;
use crate::services::word_loader::WordCatalog;

const REAP_INTERVAL: Duration = Duration::from_secs(60);

// Function to initialize logging
fn init_logging(log_file: Option<&String>) -> io::Result<()> {
    if let Some(file) = log_file {
        let log_output = OpenOptions::new().create(true).append(true).open(file)?;

        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(log_output)))
            .init();
    } else {
        env_logger::init();
    }
    Ok(())
}

/// Allow the configured origins, or any origin when none are given.
fn cors(origins: Option<&String>) -> Cors {
    let origins: Vec<&str> = origins
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let mut cors = if origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        Cors::default()
    };
    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors.allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let matches = Command::new("hangmand")
        .version("1.0")
        .about("Hangman game service")
        .arg(
            Arg::new("listen-host")
                .long("listen-host")
                .num_args(1)
                .default_value("0.0.0.0:5000")
                .help("Specify the listen address (e.g., 0.0.0.0:5000)"),
        )
        .arg(
            Arg::new("share-dir")
                .long("share-dir")
                .num_args(1)
                .default_value("./share")
                .help("Directory containing the word and score files"),
        )
        .arg(
            Arg::new("words-file")
                .long("words-file")
                .num_args(1)
                .help("Categorized word list (defaults to <share-dir>/words.txt)"),
        )
        .arg(
            Arg::new("scores-file")
                .long("scores-file")
                .num_args(1)
                .help("Score file (defaults to <share-dir>/scores.txt)"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .num_args(1)
                .help("Specify a log file path (if omitted, logs to stderr)"),
        )
        .arg(
            Arg::new("session-ttl")
                .long("session-ttl")
                .num_args(1)
                .value_parser(clap::value_parser!(u64))
                .default_value("1800")
                .help("Seconds of inactivity before a game session is discarded"),
        )
        .arg(
            Arg::new("cors-origins")
                .long("cors-origins")
                .num_args(1)
                .help("Comma-separated list of allowed browser origins (default: any)"),
        )
        .get_matches();

    init_logging(matches.get_one::<String>("log-file"))?;

    let share_dir = PathBuf::from(
        matches
            .get_one::<String>("share-dir")
            .map(String::as_str)
            .unwrap_or("./share"),
    );
    let words_path = matches
        .get_one::<String>("words-file")
        .map(PathBuf::from)
        .unwrap_or_else(|| share_dir.join("words.txt"));
    let scores_path = matches
        .get_one::<String>("scores-file")
        .map(PathBuf::from)
        .unwrap_or_else(|| share_dir.join("scores.txt"));
    let listen_host = matches
        .get_one::<String>("listen-host")
        .cloned()
        .unwrap_or_else(|| "0.0.0.0:5000".to_string());
    let session_ttl = Duration::from_secs(
        matches
            .get_one::<u64>("session-ttl")
            .copied()
            .unwrap_or(1800),
    );
    let cors_origins = matches.get_one::<String>("cors-origins").cloned();

    let catalog = WordCatalog::from_path(&words_path).map_err(|e| {
        error!("Cannot serve games: {}", e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;
    for category in catalog.categories() {
        info!("Category {}: {} words", category, catalog.words_of(&category).len());
    }

    info!("Scores are stored in {}", scores_path.display());
    let state = AppState::new(catalog, Arc::new(FileScoreStore::new(scores_path)));
    let shared_state = web::Data::new(state);

    let reaper_state = shared_state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(REAP_INTERVAL);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let reaped = reaper_state.sessions.reap_idle(session_ttl);
            if reaped > 0 {
                info!(
                    "Reaped {} idle sessions, {} remain",
                    reaped,
                    reaper_state.sessions.len()
                );
            }
        }
    });

    info!("Listening on {}", listen_host);
    HttpServer::new(move || {
        App::new()
            .wrap(cors(cors_origins.as_ref()))
            .wrap(Logger::default())
            .app_data(shared_state.clone())
            .configure(handlers::configure)
    })
    .bind(&listen_host)?
    .run()
    .await
}
