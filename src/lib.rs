//! # Barber Scheduler
//!
//! Appointment scheduling for a service business: clients book time slots
//! against a catalog of products, with no two appointments overlapping.
//!
//! ## Architecture
//!
//! - **domain**: Products, appointments, product snapshots and repository traits
//! - **application**: `ProductService` and `AppointmentService` business rules
//! - **infrastructure**: SeaORM database and in-memory repositories
//! - **shared**: Errors, clock and price helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod telemetry;

pub use config::{default_config_path, AppConfig};

pub use application::{AppointmentService, ProductService};
pub use domain::{DomainError, DomainResult};

// Re-export database types for easy access
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};
