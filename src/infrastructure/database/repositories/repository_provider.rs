//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::appointment::AppointmentRepository;
use crate::domain::product::ProductRepository;
use crate::domain::repositories::RepositoryProvider;

use super::appointment_repository::SeaOrmAppointmentRepository;
use super::product_repository::SeaOrmProductRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let haircut = repos.products().find_by_id(1).await?;
/// let booked = repos.appointments().find_all().await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    products: SeaOrmProductRepository,
    appointments: SeaOrmAppointmentRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            products: SeaOrmProductRepository::new(db.clone()),
            appointments: SeaOrmAppointmentRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }

    fn appointments(&self) -> &dyn AppointmentRepository {
        &self.appointments
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::{DomainError, NewAppointment, ProductDraft, ProductSnapshot, TimeSlot};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::{init_database, DatabaseConfig};

    async fn provider() -> SeaOrmRepositoryProvider {
        // every pooled in-memory connection would be a separate empty database
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmRepositoryProvider::new(db)
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 10, hour, minute, 0).unwrap()
    }

    fn booking(client: &str, start: DateTime<Utc>, products: Vec<ProductSnapshot>) -> NewAppointment {
        NewAppointment {
            client_name: client.into(),
            start_time: start,
            end_time: start + Duration::minutes(30),
            products,
        }
    }

    fn snap(product_id: i32, name: &str, price: f64) -> ProductSnapshot {
        ProductSnapshot {
            product_id,
            name: name.into(),
            price,
            description: None,
        }
    }

    #[tokio::test]
    async fn product_crud_round_trip() {
        let repos = provider().await;
        let products = repos.products();

        let saved = products
            .save(ProductDraft::new("Haircut", 20.0).with_description("Classic"))
            .await
            .unwrap();
        assert!(saved.id > 0);

        let mut changed = saved.clone();
        changed.price = 22.5;
        let updated = products.update(changed).await.unwrap();
        assert_eq!(updated.price, 22.5);
        assert_eq!(updated.created_at, saved.created_at);

        let found = products.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.description.as_deref(), Some("Classic"));

        products.delete(saved.id).await.unwrap();
        assert!(products.find_by_id(saved.id).await.unwrap().is_none());
        assert!(products.delete(saved.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn duplicate_product_name_violates_unique_index() {
        let repos = provider().await;
        repos.products().save(ProductDraft::new("Haircut", 20.0)).await.unwrap();

        let err = repos
            .products()
            .save(ProductDraft::new("Haircut", 25.0))
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn snapshots_keep_their_order() {
        let repos = provider().await;
        let saved = repos
            .appointments()
            .save(booking(
                "Ana",
                at(10, 0),
                vec![snap(2, "Shave", 10.0), snap(1, "Haircut", 20.0)],
            ))
            .await
            .unwrap();

        let found = repos.appointments().find_by_id(saved.id).await.unwrap().unwrap();
        let names: Vec<&str> = found.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Shave", "Haircut"]);
        assert_eq!(found.total_price(), 30.0);
    }

    #[tokio::test]
    async fn save_rejects_overlap_inside_transaction() {
        let repos = provider().await;
        repos.appointments().save(booking("Ana", at(10, 0), vec![])).await.unwrap();

        let err = repos
            .appointments()
            .save(booking("Luis", at(10, 15), vec![snap(1, "Haircut", 20.0)]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let all = repos.appointments().find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].client_name, "Ana");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_on_file_database_admit_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("race.db");
        let db = init_database(&DatabaseConfig::sqlite(&path.display().to_string()))
            .await
            .unwrap();
        let repos = std::sync::Arc::new(SeaOrmRepositoryProvider::new(db));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repos = repos.clone();
                tokio::spawn(async move {
                    repos
                        .appointments()
                        .save(booking(&format!("client-{i}"), at(10, 0), vec![]))
                        .await
                })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                // writers that lose the SQLite lock surface as transient storage errors
                Err(e) => assert!(
                    matches!(e, DomainError::Conflict(_)) || e.is_transient(),
                    "unexpected error: {e}"
                ),
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(repos.appointments().find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_into_taken_slot_is_conflict_and_keeps_row() {
        let repos = provider().await;
        repos.appointments().save(booking("Ana", at(10, 0), vec![])).await.unwrap();
        let luis = repos
            .appointments()
            .save(booking("Luis", at(11, 0), vec![snap(1, "Haircut", 20.0)]))
            .await
            .unwrap();

        let mut moved = luis.clone();
        moved.start_time = at(10, 15);
        moved.end_time = at(10, 45);
        moved.products = vec![];
        let err = repos.appointments().update(moved).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = repos.appointments().find_by_id(luis.id).await.unwrap().unwrap();
        assert_eq!(stored.start_time, at(11, 0));
        assert_eq!(stored.end_time, at(11, 30));
        assert_eq!(stored.products, vec![snap(1, "Haircut", 20.0)]);
    }

    #[tokio::test]
    async fn range_query_matches_overlap_predicate() {
        let repos = provider().await;
        let first = repos.appointments().save(booking("Ana", at(10, 0), vec![])).await.unwrap();
        repos.appointments().save(booking("Luis", at(10, 30), vec![])).await.unwrap();
        repos.appointments().save(booking("Eva", at(12, 0), vec![])).await.unwrap();

        let slot = TimeSlot::new(at(10, 15), at(10, 45));
        let hits = repos.appointments().find_overlapping(slot, None).await.unwrap();
        assert_eq!(hits.len(), 2);

        let hits = repos
            .appointments()
            .find_overlapping(slot, Some(first.id))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].client_name, "Luis");

        // touching the end of the last booking is free
        let slot = TimeSlot::new(at(12, 30), at(13, 0));
        assert!(repos.appointments().find_overlapping(slot, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_snapshots_and_ignores_own_slot() {
        let repos = provider().await;
        let mut saved = repos
            .appointments()
            .save(booking("Ana", at(10, 0), vec![snap(1, "Haircut", 20.0)]))
            .await
            .unwrap();

        saved.client_name = "Ana Maria".into();
        saved.products = vec![snap(2, "Shave", 10.0)];
        let updated = repos.appointments().update(saved.clone()).await.unwrap();
        assert_eq!(updated.created_at, saved.created_at);

        let found = repos.appointments().find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.client_name, "Ana Maria");
        assert_eq!(found.products, vec![snap(2, "Shave", 10.0)]);
    }

    #[tokio::test]
    async fn deleting_catalog_product_keeps_snapshot() {
        let repos = provider().await;
        let haircut = repos.products().save(ProductDraft::new("Haircut", 20.0)).await.unwrap();
        let appt = repos
            .appointments()
            .save(booking("Ana", at(10, 0), vec![ProductSnapshot::from(&haircut)]))
            .await
            .unwrap();

        repos.products().delete(haircut.id).await.unwrap();

        let found = repos.appointments().find_by_id(appt.id).await.unwrap().unwrap();
        assert_eq!(found.products.len(), 1);
        assert_eq!(found.products[0].name, "Haircut");
        assert_eq!(found.products[0].price, 20.0);
    }

    #[tokio::test]
    async fn delete_removes_appointment() {
        let repos = provider().await;
        let appt = repos
            .appointments()
            .save(booking("Ana", at(10, 0), vec![snap(1, "Haircut", 20.0)]))
            .await
            .unwrap();

        repos.appointments().delete(appt.id).await.unwrap();
        assert!(repos.appointments().find_by_id(appt.id).await.unwrap().is_none());
        assert!(repos.appointments().delete(appt.id).await.unwrap_err().is_not_found());

        // the slot is free again
        repos.appointments().save(booking("Luis", at(10, 0), vec![])).await.unwrap();
    }
}
