//! Product snapshot rows embedded in an appointment
//!
//! Deliberately not linked to `products`: a snapshot outlives catalog
//! edits and deletions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointment_products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub appointment_id: i32,

    /// Position of the product on the appointment (0-based)
    pub position: i32,

    /// Catalog product the snapshot was copied from
    pub product_id: i32,

    pub name: String,
    pub price: f64,

    #[sea_orm(nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::appointment::Entity",
        from = "Column::AppointmentId",
        to = "super::appointment::Column::Id"
    )]
    Appointment,
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
