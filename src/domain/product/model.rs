//! Product domain entity

use chrono::{DateTime, Utc};

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// A purchasable service in the catalog (e.g. a haircut).
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Assigned by persistence
    pub id: i32,
    /// Unique across the catalog (exact, case-sensitive)
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied product fields, before validation and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Field-level checks that need no stored state.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.is_empty() {
            return Err(DomainError::InvalidInput(
                "product name must not be empty".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(DomainError::InvalidInput(
                "product price must be a finite number greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Product {
    /// Apply a validated draft, keeping identity and creation time.
    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.price = draft.price;
        self.description = draft.description;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_invalid() {
        let err = ProductDraft::new("", 10.0).validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn non_positive_or_non_finite_price_is_invalid() {
        for price in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = ProductDraft::new("Haircut", price).validate().unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)), "price {price}");
        }
    }

    #[test]
    fn valid_draft_passes() {
        let draft = ProductDraft::new("Haircut", 20.0).with_description("Classic cut");
        assert!(draft.validate().is_ok());
        assert_eq!(draft.description.as_deref(), Some("Classic cut"));
    }

    #[test]
    fn apply_keeps_identity() {
        let now = Utc::now();
        let mut product = Product {
            id: 7,
            name: "Shave".into(),
            price: 10.0,
            description: None,
            created_at: now,
            updated_at: now,
        };
        product.apply(ProductDraft::new("Hot towel shave", 15.0));
        assert_eq!(product.id, 7);
        assert_eq!(product.name, "Hot towel shave");
        assert_eq!(product.price, 15.0);
        assert_eq!(product.created_at, now);
    }
}
