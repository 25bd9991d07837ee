//! In-memory repository implementations

mod memory;

pub use memory::{
    InMemoryAppointmentRepository, InMemoryProductRepository, InMemoryRepositoryProvider,
};
