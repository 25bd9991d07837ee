//! Application services

mod appointment;
mod product;

pub use appointment::AppointmentService;
pub use product::ProductService;
