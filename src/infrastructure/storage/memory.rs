//! In-memory storage implementation

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::{
    Appointment, AppointmentRepository, DomainError, DomainResult, NewAppointment, Product,
    ProductDraft, ProductRepository, RepositoryProvider,
};

fn slot_taken() -> DomainError {
    DomainError::Conflict("appointment overlaps an existing appointment".to_string())
}

fn name_taken(name: &str) -> DomainError {
    DomainError::Conflict(format!("a product named '{}' already exists", name))
}

// ── Products ────────────────────────────────────────────────────

/// In-memory product catalog.
///
/// `names` maps each product name to its id and is claimed before a row is
/// written, so two racing inserts of the same name cannot both succeed.
pub struct InMemoryProductRepository {
    products: DashMap<i32, Product>,
    names: DashMap<String, i32>,
    counter: AtomicI32,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
            names: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, draft: ProductDraft) -> DomainResult<Product> {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        match self.names.entry(draft.name.clone()) {
            Entry::Occupied(_) => return Err(name_taken(&draft.name)),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let now = Utc::now();
        let product = Product {
            id,
            name: draft.name,
            price: draft.price,
            description: draft.description,
            created_at: now,
            updated_at: now,
        };
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Product>> {
        Ok(self.products.get(&id).map(|p| p.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        // ids are handed out in insertion order
        let mut all: Vec<Product> = self.products.iter().map(|p| p.value().clone()).collect();
        all.sort_by_key(|p| p.id);
        Ok(all)
    }

    async fn update(&self, mut product: Product) -> DomainResult<Product> {
        let mut entry = self
            .products
            .get_mut(&product.id)
            .ok_or_else(|| DomainError::not_found("Product", product.id))?;

        if entry.name != product.name {
            match self.names.entry(product.name.clone()) {
                Entry::Occupied(_) => return Err(name_taken(&product.name)),
                Entry::Vacant(slot) => {
                    slot.insert(product.id);
                }
            }
            self.names.remove(&entry.name);
        }

        product.created_at = entry.created_at;
        product.updated_at = Utc::now();
        *entry = product.clone();
        Ok(product)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let (_, removed) = self
            .products
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Product", id))?;
        self.names.remove_if(&removed.name, |_, owner| *owner == id);
        Ok(())
    }
}

// ── Appointments ────────────────────────────────────────────────

struct AppointmentTable {
    rows: BTreeMap<i32, Appointment>,
    next_id: i32,
}

/// In-memory appointment book.
///
/// A single lock covers the overlap check and the write, so two racing
/// inserts for the same slot cannot both succeed.
pub struct InMemoryAppointmentRepository {
    table: Mutex<AppointmentTable>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(AppointmentTable {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryAppointmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn save(&self, appointment: NewAppointment) -> DomainResult<Appointment> {
        let mut table = self.table.lock().await;

        let slot = appointment.slot();
        if table.rows.values().any(|a| a.overlaps(&slot)) {
            return Err(slot_taken());
        }

        let now = Utc::now();
        let stored = Appointment {
            id: table.next_id,
            client_name: appointment.client_name,
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            products: appointment.products,
            created_at: now,
            updated_at: now,
        };
        table.next_id += 1;
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Appointment>> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<Appointment>> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn update(&self, mut appointment: Appointment) -> DomainResult<Appointment> {
        let mut table = self.table.lock().await;

        let Some(created_at) = table.rows.get(&appointment.id).map(|a| a.created_at) else {
            return Err(DomainError::not_found("Appointment", appointment.id));
        };

        let slot = appointment.slot();
        if table
            .rows
            .values()
            .any(|a| a.id != appointment.id && a.overlaps(&slot))
        {
            return Err(slot_taken());
        }

        appointment.created_at = created_at;
        appointment.updated_at = Utc::now();
        table.rows.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.table
            .lock()
            .await
            .rows
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Appointment", id))?;
        Ok(())
    }
}

// ── Provider ────────────────────────────────────────────────────

/// In-memory storage for development and testing
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    products: InMemoryProductRepository,
    appointments: InMemoryAppointmentRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }

    fn appointments(&self) -> &dyn AppointmentRepository {
        &self.appointments
    }
}
