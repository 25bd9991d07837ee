//! Product catalog service

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{DomainResult, Product, ProductDraft, RepositoryProvider};
use crate::shared::errors::DomainError;

/// Enforces catalog rules: non-empty name, positive price, unique name.
pub struct ProductService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ProductService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, draft: ProductDraft) -> DomainResult<Product> {
        draft.validate()?;

        let existing = self.repos.products().find_all().await?;
        if existing.iter().any(|p| p.name == draft.name) {
            warn!(name = %draft.name, "Rejected duplicate product name");
            return Err(duplicate_name(&draft.name));
        }

        let product = self.repos.products().save(draft).await?;
        info!(product_id = product.id, name = %product.name, price = product.price, "Product created");
        Ok(product)
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Product>> {
        self.repos.products().find_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<Product> {
        self.repos
            .products()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", id))
    }

    /// Replace name, price and description of product `id`.
    ///
    /// Keeping the product's own name is not a conflict.
    pub async fn update(&self, id: i32, draft: ProductDraft) -> DomainResult<Product> {
        draft.validate()?;

        let mut product = self.get_by_id(id).await?;

        let existing = self.repos.products().find_all().await?;
        if existing.iter().any(|p| p.id != id && p.name == draft.name) {
            warn!(product_id = id, name = %draft.name, "Rejected rename to taken product name");
            return Err(duplicate_name(&draft.name));
        }

        product.apply(draft);
        let product = self.repos.products().update(product).await?;
        info!(product_id = id, "Product updated");
        Ok(product)
    }

    /// Remove a product from the catalog.
    ///
    /// Appointments that already embed a snapshot of it are unaffected.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.get_by_id(id).await?;
        self.repos.products().delete(id).await?;
        info!(product_id = id, "Product deleted");
        Ok(())
    }
}

fn duplicate_name(name: &str) -> DomainError {
    DomainError::Conflict(format!("a product named '{}' already exists", name))
}

// ── Tests ──────────────────────────────────────────────────────
