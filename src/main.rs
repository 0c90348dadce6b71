mod app;
mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;
mod ui;

use std::{fs::OpenOptions, sync::Mutex};

use handlers::Controller;
use repository::Repository;
use service::NoteService;

fn main() {
    // Config
    let config = config::load_config().unwrap_or_else(|e| panic!("failed to load config: {e}"));

    // Log setup, into a file since the terminal belongs to the UI.
    // Truncated on every launch so it only ever holds the last session.
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.log_path)
        .unwrap_or_else(|e| {
            panic!(
                "failed to open log file {}: {e}",
                config.log_path.display()
            )
        });
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_max_level(config.log_level)
        .init();

    // Store creation and schema setup
    let repo = Repository::new(&config.database_path).unwrap_or_else(|e| {
        tracing::error!("Failed to open note database: {e}");
        panic!("failed to open note database: {e}");
    });

    repo.migrate().unwrap_or_else(|e| {
        tracing::error!("Failed to prepare note table: {e}");
        panic!("failed to prepare note table: {e}");
    });

    // Service and controller creation
    let service = NoteService::new(repo);
    let controller = Controller::new(service).unwrap_or_else(|e| {
        tracing::error!("Failed to load notes: {e}");
        panic!("failed to load notes: {e}");
    });

    if let Err(e) = app::run(controller) {
        tracing::error!("Sticky Notes stopped: {e}");
        panic!("sticky notes stopped: {e}");
    }
}
