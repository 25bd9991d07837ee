//! Appointment scheduling service
//!
//! Every write goes through the same checks, in this order:
//! slot validity, overlap with stored appointments, product resolution.
//! The first failing check decides the error returned.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    Appointment, AppointmentDraft, DomainResult, NewAppointment, ProductSnapshot,
    RepositoryProvider, TimeSlot,
};
use crate::shared::clock::{Clock, SystemClock};
use crate::shared::errors::DomainError;
use crate::shared::money::round_to_cents;

pub struct AppointmentService {
    repos: Arc<dyn RepositoryProvider>,
    clock: Arc<dyn Clock>,
}

impl AppointmentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self::with_clock(repos, Arc::new(SystemClock))
    }

    pub fn with_clock(repos: Arc<dyn RepositoryProvider>, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    /// Book a new appointment.
    ///
    /// Products are copied into the appointment in the order given.
    pub async fn schedule(&self, draft: AppointmentDraft) -> DomainResult<Appointment> {
        self.validate_slot(&draft)?;
        self.ensure_slot_free(draft.slot(), None).await?;
        let products = self.resolve_products(&draft.product_ids).await?;

        let appointment = self
            .repos
            .appointments()
            .save(NewAppointment {
                client_name: draft.client_name,
                start_time: draft.start_time,
                end_time: draft.end_time,
                products,
            })
            .await?;

        info!(
            appointment_id = appointment.id,
            client = %appointment.client_name,
            start = %appointment.start_time,
            end = %appointment.end_time,
            products = appointment.products.len(),
            "Appointment scheduled"
        );
        Ok(appointment)
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<Appointment> {
        self.repos
            .appointments()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", id))
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Appointment>> {
        self.repos.appointments().find_all().await
    }

    /// Reschedule or edit appointment `id` with a full replacement payload.
    ///
    /// The appointment keeps its id and creation time. Its own current slot
    /// never counts as a conflict.
    pub async fn update(&self, id: i32, draft: AppointmentDraft) -> DomainResult<Appointment> {
        let existing = self.get_by_id(id).await?;

        self.validate_slot(&draft)?;
        self.ensure_slot_free(draft.slot(), Some(id)).await?;
        let products = self.resolve_products(&draft.product_ids).await?;

        let appointment = self
            .repos
            .appointments()
            .update(Appointment {
                id: existing.id,
                client_name: draft.client_name,
                start_time: draft.start_time,
                end_time: draft.end_time,
                products,
                created_at: existing.created_at,
                updated_at: existing.updated_at,
            })
            .await?;

        info!(
            appointment_id = id,
            start = %appointment.start_time,
            end = %appointment.end_time,
            "Appointment updated"
        );
        Ok(appointment)
    }

    pub async fn cancel(&self, id: i32) -> DomainResult<()> {
        self.get_by_id(id).await?;
        self.repos.appointments().delete(id).await?;
        info!(appointment_id = id, "Appointment cancelled");
        Ok(())
    }

    /// Unrounded sum of the product snapshot prices; 0 when there are none.
    pub async fn get_total_price(&self, id: i32) -> DomainResult<f64> {
        let total = self.get_by_id(id).await?.total_price();
        debug!(appointment_id = id, total = round_to_cents(total), "Total price computed");
        Ok(total)
    }

    fn validate_slot(&self, draft: &AppointmentDraft) -> DomainResult<()> {
        if draft.start_time < self.clock.now() {
            return Err(DomainError::InvalidInput(
                "appointment cannot start in the past".to_string(),
            ));
        }
        if draft.end_time <= draft.start_time {
            return Err(DomainError::InvalidInput(
                "end time must be after start time".to_string(),
            ));
        }
        Ok(())
    }

    async fn ensure_slot_free(&self, slot: TimeSlot, exclude_id: Option<i32>) -> DomainResult<()> {
        let clashes = self
            .repos
            .appointments()
            .find_overlapping(slot, exclude_id)
            .await?;

        if let Some(clash) = clashes.first() {
            warn!(
                conflicting_id = clash.id,
                start = %slot.start,
                end = %slot.end,
                "Rejected overlapping appointment"
            );
            return Err(DomainError::Conflict(format!(
                "appointment overlaps appointment {}",
                clash.id
            )));
        }
        Ok(())
    }

    async fn resolve_products(&self, ids: &[i32]) -> DomainResult<Vec<ProductSnapshot>> {
        let mut snapshots = Vec::with_capacity(ids.len());
        for &id in ids {
            let product = self
                .repos
                .products()
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::not_found("Product", id))?;
            snapshots.push(ProductSnapshot::from(&product));
        }
        Ok(snapshots)
    }
}

// ── Tests ──────────────────────────────────────────────────────
