//! Barber Scheduler bootstrap
//!
//! Loads configuration, brings the database schema up to date and logs a
//! summary of the catalog and the appointment book.
//! Reads configuration from TOML file (~/.config/barber-scheduler/config.toml).

use std::sync::Arc;

use tracing::{error, info, warn};

use barber_scheduler::domain::RepositoryProvider;
use barber_scheduler::shared::money::format_price;
use barber_scheduler::telemetry::init_tracing;
use barber_scheduler::{
    default_config_path, init_database, AppConfig, AppointmentService, ProductService,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("SCHEDULER_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg.logging.level);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            init_tracing("info");
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    let mut db_config = app_cfg.database_config();
    if let Ok(url) = std::env::var("DATABASE_URL") {
        db_config.url = url;
    }

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let products = ProductService::new(repos.clone());
    let appointments = AppointmentService::new(repos);

    // ── Summary ────────────────────────────────────────────────
    let catalog = products.list_all().await?;
    info!(count = catalog.len(), "Product catalog");
    for p in &catalog {
        info!(product_id = p.id, name = %p.name, price = %format_price(p.price), "Product");
    }

    let booked = appointments.list_all().await?;
    info!(count = booked.len(), "Appointment book");
    for a in &booked {
        info!(
            appointment_id = a.id,
            client = %a.client_name,
            start = %a.start_time,
            end = %a.end_time,
            total = %format_price(a.total_price()),
            "Appointment"
        );
    }

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    }
    Ok(())
}
