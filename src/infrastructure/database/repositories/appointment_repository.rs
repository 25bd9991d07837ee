//! SeaORM implementation of AppointmentRepository
//!
//! Inserts and updates run inside a database transaction that re-checks
//! the slot before writing, so the overlap pre-check done by the service
//! cannot be raced by a concurrent writer.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};

use crate::domain::appointment::{
    Appointment, AppointmentRepository, NewAppointment, ProductSnapshot, TimeSlot,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{appointment, appointment_product};

pub struct SeaOrmAppointmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmAppointmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn snapshot_to_domain(m: appointment_product::Model) -> ProductSnapshot {
    ProductSnapshot {
        product_id: m.product_id,
        name: m.name,
        price: m.price,
        description: m.description,
    }
}

fn snapshot_rows(
    appointment_id: i32,
    products: &[ProductSnapshot],
) -> Vec<appointment_product::ActiveModel> {
    products
        .iter()
        .enumerate()
        .map(|(position, p)| appointment_product::ActiveModel {
            id: NotSet,
            appointment_id: Set(appointment_id),
            position: Set(position as i32),
            product_id: Set(p.product_id),
            name: Set(p.name.clone()),
            price: Set(p.price),
            description: Set(p.description.clone()),
        })
        .collect()
}

fn slot_taken() -> DomainError {
    DomainError::Conflict("appointment overlaps an existing appointment".to_string())
}

/// Range query for appointments intersecting `slot`.
fn overlapping(slot: &TimeSlot, exclude_id: Option<i32>) -> Select<appointment::Entity> {
    let mut query = appointment::Entity::find()
        .filter(appointment::Column::StartTime.lt(slot.end))
        .filter(appointment::Column::EndTime.gt(slot.start));
    if let Some(id) = exclude_id {
        query = query.filter(appointment::Column::Id.ne(id));
    }
    query.order_by_asc(appointment::Column::Id)
}

/// Load snapshot rows for `models` and assemble domain appointments,
/// keeping the order of `models`.
async fn with_products<C: ConnectionTrait>(
    conn: &C,
    models: Vec<appointment::Model>,
) -> Result<Vec<Appointment>, DbErr> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let rows = appointment_product::Entity::find()
        .filter(appointment_product::Column::AppointmentId.is_in(ids))
        .order_by_asc(appointment_product::Column::AppointmentId)
        .order_by_asc(appointment_product::Column::Position)
        .all(conn)
        .await?;

    let mut by_appointment: HashMap<i32, Vec<ProductSnapshot>> = HashMap::new();
    for row in rows {
        by_appointment
            .entry(row.appointment_id)
            .or_default()
            .push(snapshot_to_domain(row));
    }

    Ok(models
        .into_iter()
        .map(|m| Appointment {
            products: by_appointment.remove(&m.id).unwrap_or_default(),
            id: m.id,
            client_name: m.client_name,
            start_time: m.start_time,
            end_time: m.end_time,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
        .collect())
}

async fn insert_snapshots<C: ConnectionTrait>(
    conn: &C,
    appointment_id: i32,
    products: &[ProductSnapshot],
) -> Result<(), DbErr> {
    let rows = snapshot_rows(appointment_id, products);
    if rows.is_empty() {
        return Ok(());
    }
    appointment_product::Entity::insert_many(rows)
        .exec(conn)
        .await?;
    Ok(())
}

// ── AppointmentRepository impl ──────────────────────────────────

#[async_trait]
impl AppointmentRepository for SeaOrmAppointmentRepository {
    async fn save(&self, a: NewAppointment) -> DomainResult<Appointment> {
        let txn = self.db.begin().await?;

        if overlapping(&a.slot(), None).one(&txn).await?.is_some() {
            return Err(slot_taken());
        }

        let now = Utc::now();
        let model = appointment::ActiveModel {
            id: NotSet,
            client_name: Set(a.client_name),
            start_time: Set(a.start_time),
            end_time: Set(a.end_time),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let saved = model.insert(&txn).await?;
        insert_snapshots(&txn, saved.id, &a.products).await?;
        txn.commit().await?;

        debug!("Appointment saved: {}", saved.id);
        Ok(Appointment {
            id: saved.id,
            client_name: saved.client_name,
            start_time: saved.start_time,
            end_time: saved.end_time,
            products: a.products,
            created_at: saved.created_at,
            updated_at: saved.updated_at,
        })
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Appointment>> {
        let Some(model) = appointment::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(with_products(&self.db, vec![model]).await?.pop())
    }

    async fn find_all(&self) -> DomainResult<Vec<Appointment>> {
        let models = appointment::Entity::find()
            .order_by_asc(appointment::Column::Id)
            .all(&self.db)
            .await?;
        Ok(with_products(&self.db, models).await?)
    }

    async fn update(&self, a: Appointment) -> DomainResult<Appointment> {
        debug!("Updating appointment: {}", a.id);
        let txn = self.db.begin().await?;

        let Some(existing) = appointment::Entity::find_by_id(a.id).one(&txn).await? else {
            return Err(DomainError::not_found("Appointment", a.id));
        };

        if overlapping(&a.slot(), Some(a.id)).one(&txn).await?.is_some() {
            return Err(slot_taken());
        }

        let model = appointment::ActiveModel {
            id: Set(a.id),
            client_name: Set(a.client_name),
            start_time: Set(a.start_time),
            end_time: Set(a.end_time),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        let updated = model.update(&txn).await?;

        appointment_product::Entity::delete_many()
            .filter(appointment_product::Column::AppointmentId.eq(a.id))
            .exec(&txn)
            .await?;
        insert_snapshots(&txn, a.id, &a.products).await?;
        txn.commit().await?;

        Ok(Appointment {
            id: updated.id,
            client_name: updated.client_name,
            start_time: updated.start_time,
            end_time: updated.end_time,
            products: a.products,
            created_at: updated.created_at,
            updated_at: updated.updated_at,
        })
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let txn = self.db.begin().await?;

        appointment_product::Entity::delete_many()
            .filter(appointment_product::Column::AppointmentId.eq(id))
            .exec(&txn)
            .await?;
        let result = appointment::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Appointment", id));
        }
        txn.commit().await?;

        debug!("Appointment deleted: {}", id);
        Ok(())
    }

    async fn find_overlapping(
        &self,
        slot: TimeSlot,
        exclude_id: Option<i32>,
    ) -> DomainResult<Vec<Appointment>> {
        let models = overlapping(&slot, exclude_id).all(&self.db).await?;
        Ok(with_products(&self.db, models).await?)
    }
}
