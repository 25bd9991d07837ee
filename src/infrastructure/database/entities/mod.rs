//! Database entities module

pub mod appointment;
pub mod appointment_product;
pub mod product;

pub use appointment::Entity as Appointment;
pub use appointment_product::Entity as AppointmentProduct;
pub use product::Entity as Product;
