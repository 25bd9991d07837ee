//! Appointment domain entity

use chrono::{DateTime, Utc};

use crate::domain::product::Product;

/// Interval occupied by an appointment, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Symmetric intersection test. Slots that only touch
    /// (one ends exactly when the other starts) do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Copy of a catalog product taken when the appointment was scheduled.
///
/// Later catalog edits or deletions do not touch it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    /// Catalog id the snapshot was taken from
    pub product_id: i32,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

impl From<&Product> for ProductSnapshot {
    fn from(p: &Product) -> Self {
        Self {
            product_id: p.id,
            name: p.name.clone(),
            price: p.price,
            description: p.description.clone(),
        }
    }
}

/// Client-submitted appointment, product references still unresolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDraft {
    pub client_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Catalog ids, in the order they should appear on the appointment
    pub product_ids: Vec<i32>,
}

impl AppointmentDraft {
    pub fn new(
        client_name: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        product_ids: Vec<i32>,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            start_time,
            end_time,
            product_ids,
        }
    }

    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.start_time, self.end_time)
    }
}

/// Validated appointment with resolved products, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub client_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub products: Vec<ProductSnapshot>,
}

impl NewAppointment {
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.start_time, self.end_time)
    }
}

/// Stored appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: i32,
    pub client_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub products: Vec<ProductSnapshot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.start_time, self.end_time)
    }

    pub fn overlaps(&self, slot: &TimeSlot) -> bool {
        self.slot().overlaps(slot)
    }

    /// Unrounded sum of the snapshot prices
    pub fn total_price(&self) -> f64 {
        self.products.iter().map(|p| p.price).sum()
    }
}

// ── Tests ──────────────────────────────────────────────────────
