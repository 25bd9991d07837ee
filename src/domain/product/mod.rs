//! Product aggregate
//!
//! Contains the catalog Product entity and its repository interface.

pub mod model;
pub mod repository;

pub use model::{Product, ProductDraft};
pub use repository::ProductRepository;
