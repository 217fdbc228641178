use sea_orm_migration::{prelude::*, schema::*};

use super::m20250601_000004_create_seats::Seat;
use super::m20250601_000005_create_bookings::Booking;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(pk_auto(Reservation::Id))
                    .col(integer(Reservation::BookingId).not_null())
                    .col(integer(Reservation::SeatId).not_null())
                    .col(
                        string_len(Reservation::Status, 20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(timestamp_with_time_zone(Reservation::Deadline).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_booking")
                            .from(Reservation::Table, Reservation::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_seat")
                            .from(Reservation::Table, Reservation::SeatId)
                            .to(Seat::Table, Seat::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one confirmed reservation may ever hold a seat. The
        // lifecycle checks this before confirming; the index makes the
        // store reject a racing confirm outright.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_reservation_confirmed_seat \
                 ON reservation (seat_id) \
                 WHERE status = 'confirmed'",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reservation {
    Table,
    Id,
    BookingId,
    SeatId,
    Status,
    Deadline,
}
