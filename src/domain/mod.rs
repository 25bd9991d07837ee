pub mod appointment;
pub mod product;
pub mod repositories;

// Re-export commonly used types
pub use appointment::{
    Appointment, AppointmentDraft, AppointmentRepository, NewAppointment, ProductSnapshot,
    TimeSlot,
};
pub use product::{Product, ProductDraft, ProductRepository};
pub use repositories::{DomainResult, RepositoryProvider};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
