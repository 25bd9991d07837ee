//! Application layer - scheduling and catalog use cases

pub mod services;

pub use services::{AppointmentService, ProductService};
