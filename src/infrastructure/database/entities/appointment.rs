//! Appointment entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub client_name: String,

    /// Slot start (inclusive)
    pub start_time: DateTimeUtc,

    /// Slot end (exclusive)
    pub end_time: DateTimeUtc,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::appointment_product::Entity")]
    AppointmentProducts,
}

impl Related<super::appointment_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppointmentProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
