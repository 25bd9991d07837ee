//! Appointment repository interface

use async_trait::async_trait;

use super::model::{Appointment, NewAppointment, TimeSlot};
use crate::domain::DomainResult;

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Insert a new appointment.
    ///
    /// Implementations re-check the slot against stored appointments in the
    /// same atomic step as the insert and return `DomainError::Conflict`
    /// if it is taken.
    async fn save(&self, appointment: NewAppointment) -> DomainResult<Appointment>;

    /// Find appointment by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Appointment>>;

    /// All appointments in insertion order
    async fn find_all(&self) -> DomainResult<Vec<Appointment>>;

    /// Replace an existing appointment, including its product snapshots.
    ///
    /// Same atomic overlap guarantee as [`save`](Self::save), ignoring the
    /// appointment being replaced.
    async fn update(&self, appointment: Appointment) -> DomainResult<Appointment>;

    /// Remove an appointment and its snapshots
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Stored appointments whose slot overlaps `slot`, skipping `exclude_id`.
    ///
    /// Scans [`find_all`](Self::find_all) unless the backend provides an
    /// indexed range query.
    async fn find_overlapping(
        &self,
        slot: TimeSlot,
        exclude_id: Option<i32>,
    ) -> DomainResult<Vec<Appointment>> {
        let all = self.find_all().await?;
        Ok(all
            .into_iter()
            .filter(|a| Some(a.id) != exclude_id && a.overlaps(&slot))
            .collect())
    }
}
