pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users;
mod m20250601_000002_create_films;
mod m20250601_000003_create_sessions;
mod m20250601_000004_create_seats;
mod m20250601_000005_create_bookings;
mod m20250601_000006_create_reservations;
mod m20250601_000007_create_payments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users::Migration),
            Box::new(m20250601_000002_create_films::Migration),
            Box::new(m20250601_000003_create_sessions::Migration),
            Box::new(m20250601_000004_create_seats::Migration),
            Box::new(m20250601_000005_create_bookings::Migration),
            Box::new(m20250601_000006_create_reservations::Migration),
            Box::new(m20250601_000007_create_payments::Migration),
        ]
    }
}
