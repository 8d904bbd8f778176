//! # Multisig Registry Backend Service
//!
//! This is the main entry point for the backend service that keeps a
//! registry of multisig groups, their vaults and their members. It provides:
//!
//! - REST API for create / list / get / update / delete on each record type
//! - Filtering, sorting and pagination on every list endpoint
//! - Per-multisig vault and member listings
//! - A single SQLite file for storage
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        BACKEND SERVICE                           │
//! │                                                                  │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                    REST API (Actix)                        │  │
//! │  │   /multisigs      /vaults      /members      /health       │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                              │                                   │
//! │  ┌───────────────────────────┴───────────────────────────────┐  │
//! │  │                      QUERY LAYER                           │  │
//! │  │   list helper (q / sort / page)    typed CRUD queries      │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                              │                                   │
//! │                       ┌──────┴──────┐                            │
//! │                       │   SQLite    │                            │
//! │                       │  squads.db  │                            │
//! │                       └─────────────┘                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! 1. Optionally copy `.env.example` to `.env` and adjust
//! 2. Start the server: `cargo run`
//! 3. `curl http://127.0.0.1:8080/health`
//!
//! The database file and its tables are created on first start.

use std::sync::Arc;
use actix_web::{web, App, HttpServer, middleware};
use tracing::{error, info};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod api;
mod config;
mod db;
mod models;

use config::AppConfig;
use db::Database;

/// Application state shared across all handlers.
///
/// Handlers receive it as `web::Data<Arc<AppState>>`; tests build one
/// over an in-memory database.
pub struct AppState {
    /// Connection pool for the SQLite database
    pub db: Database,
}

/// Main entry point for the backend service.
///
/// This function:
/// 1. Loads configuration from environment
/// 2. Initializes logging
/// 3. Opens the database and runs migrations
/// 4. Launches the HTTP server
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // =========================================
    // STEP 1: Load Configuration
    // =========================================
    // Load from environment variables (from .env file)
    dotenvy::dotenv().ok(); // It's okay if .env doesn't exist

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // =========================================
    // STEP 2: Initialize Logging
    // =========================================
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    // try_init also forwards `log` records (actix's Logger) into tracing
    subscriber
        .try_init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    info!("🚀 Starting Multisig Registry Backend Service");
    info!("📋 Configuration loaded");
    info!("   Database: {}", config.database_path);

    // =========================================
    // STEP 3: Initialize Database
    // =========================================
    let db = Database::connect(&config.database_path, config.db_max_connections)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e)
        })?;

    info!("🗄️  Database connected");

    // Create tables on first start
    db.run_migrations().await.map_err(|e| {
        error!("Failed to run migrations: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!("📦 Database migrations complete");

    // =========================================
    // STEP 4: Create Application State
    // =========================================
    let app_state = Arc::new(AppState { db });

    // =========================================
    // STEP 5: Start HTTP Server
    // =========================================
    let bind_address = config.bind_address();

    info!("🌐 Starting HTTP server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            // Attach shared application state
            .app_data(web::Data::new(app_state.clone()))

            // Add logging middleware
            .wrap(middleware::Logger::default())

            // Configure API routes
            .configure(api::configure_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}
