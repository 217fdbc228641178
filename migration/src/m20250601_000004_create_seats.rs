use sea_orm_migration::{prelude::*, schema::*};

use super::m20250601_000003_create_sessions::Session;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Seat::Table)
                    .if_not_exists()
                    .col(pk_auto(Seat::Id))
                    .col(integer(Seat::SessionId).not_null())
                    .col(integer(Seat::Number).not_null())
                    // Link to the reservation currently holding the seat.
                    // No FK constraint: reservations are created after seats
                    // and reference them back, so the constraint would be
                    // circular.
                    .col(integer_null(Seat::ReservationId))
                    .col(
                        string_len(Seat::Status, 20)
                            .not_null()
                            .default("available"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seat_session")
                            .from(Seat::Table, Seat::SessionId)
                            .to(Session::Table, Session::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seat_session_number")
                    .table(Seat::Table)
                    .col(Seat::SessionId)
                    .col(Seat::Number)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Seat::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Seat {
    Table,
    Id,
    SessionId,
    Number,
    ReservationId,
    Status,
}
