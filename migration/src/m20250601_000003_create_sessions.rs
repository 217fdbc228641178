use sea_orm_migration::{prelude::*, schema::*};

use super::m20250601_000002_create_films::Film;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Session::Table)
                    .if_not_exists()
                    .col(pk_auto(Session::Id))
                    .col(integer(Session::FilmId).not_null())
                    .col(timestamp_with_time_zone(Session::StartsAt).not_null())
                    .col(double(Session::Price).not_null())
                    .col(integer(Session::Capacity).not_null())
                    .col(boolean(Session::AutoBooking).not_null().default(false))
                    .col(
                        string_len(Session::Status, 20)
                            .not_null()
                            .default("upcoming"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_film")
                            .from(Session::Table, Session::FilmId)
                            .to(Film::Table, Film::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_session_starts_at")
                    .table(Session::Table)
                    .col(Session::StartsAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Session::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Session {
    Table,
    Id,
    FilmId,
    StartsAt,
    Price,
    Capacity,
    AutoBooking,
    Status,
}
