//! Repository traits for the domain layer
//!
//! Holds `RepositoryProvider`, which gives access to every per-aggregate
//! repository, and the `DomainResult` alias used by domain operations.

use super::appointment::AppointmentRepository;
use super::product::ProductRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let product = repos.products().find_by_id(1).await?;
///     let all = repos.appointments().find_all().await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn products(&self) -> &dyn ProductRepository;
    fn appointments(&self) -> &dyn AppointmentRepository;
}
