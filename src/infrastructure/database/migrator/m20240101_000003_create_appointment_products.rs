//! Create appointment_products table
//!
//! Holds the product snapshots taken when an appointment is scheduled.
//! There is no foreign key to `products` so catalog deletions leave
//! historical appointments intact.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_appointments::Appointments;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppointmentProducts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppointmentProducts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AppointmentProducts::AppointmentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointmentProducts::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointmentProducts::ProductId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointmentProducts::Name)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointmentProducts::Price)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AppointmentProducts::Description).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_products_appointment")
                            .from(AppointmentProducts::Table, AppointmentProducts::AppointmentId)
                            .to(Appointments::Table, Appointments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_products_appointment")
                    .table(AppointmentProducts::Table)
                    .col(AppointmentProducts::AppointmentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppointmentProducts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum AppointmentProducts {
    Table,
    Id,
    AppointmentId,
    Position,
    ProductId,
    Name,
    Price,
    Description,
}
