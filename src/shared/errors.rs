use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        DomainError::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    /// Whether the failure came from the storage layer, in which case the
    /// caller may retry the whole operation.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Persistence(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_persistence_is_transient() {
        assert!(DomainError::Persistence("disk full".into()).is_transient());
        assert!(!DomainError::InvalidInput("x".into()).is_transient());
        assert!(!DomainError::Conflict("x".into()).is_transient());
        assert!(!DomainError::not_found("Product", 1).is_transient());
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = DomainError::not_found("Product", 999);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: Product with id=999");
    }
}
