//! Appointment aggregate
//!
//! Contains the Appointment entity, its embedded product snapshots,
//! and the repository interface.

pub mod model;
pub mod repository;

pub use model::{Appointment, AppointmentDraft, NewAppointment, ProductSnapshot, TimeSlot};
pub use repository::AppointmentRepository;
