use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Film::Table)
                    .if_not_exists()
                    .col(pk_auto(Film::Id))
                    .col(string_len(Film::Title, 255).not_null())
                    .col(text(Film::Description).not_null())
                    .col(integer(Film::DurationMinutes).not_null())
                    .col(
                        string_len(Film::Status, 20)
                            .not_null()
                            .default("available"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Film::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Film {
    Table,
    Id,
    Title,
    Description,
    DurationMinutes,
    Status,
}
