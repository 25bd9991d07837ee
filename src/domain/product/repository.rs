//! Product repository interface

use async_trait::async_trait;

use super::model::{Product, ProductDraft};
use crate::domain::DomainResult;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product; the repository assigns id and timestamps
    async fn save(&self, draft: ProductDraft) -> DomainResult<Product>;

    /// Find product by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Product>>;

    /// All products in insertion order
    async fn find_all(&self) -> DomainResult<Vec<Product>>;

    /// Overwrite an existing product, refreshing `updated_at`
    async fn update(&self, product: Product) -> DomainResult<Product>;

    /// Remove a product
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
