//! SeaORM implementation of ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use crate::domain::product::{Product, ProductDraft, ProductRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::product;

pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: product::Model) -> Product {
    Product {
        id: m.id,
        name: m.name,
        price: m.price,
        description: m.description,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn save(&self, draft: ProductDraft) -> DomainResult<Product> {
        let now = Utc::now();
        let model = product::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            price: Set(draft.price),
            description: Set(draft.description),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let saved = model.insert(&self.db).await?;
        info!("Product saved: {} ({})", saved.name, saved.id);
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Product>> {
        let model = product::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        let models = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, p: Product) -> DomainResult<Product> {
        debug!("Updating product: {}", p.id);

        let Some(existing) = product::Entity::find_by_id(p.id).one(&self.db).await? else {
            return Err(DomainError::not_found("Product", p.id));
        };

        let model = product::ActiveModel {
            id: Set(p.id),
            name: Set(p.name),
            price: Set(p.price),
            description: Set(p.description),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        let updated = model.update(&self.db).await?;
        Ok(model_to_domain(updated))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Product", id));
        }
        debug!("Product deleted: {}", id);
        Ok(())
    }
}
