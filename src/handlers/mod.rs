pub mod auth;
pub mod bookings;
pub mod films;
pub mod payments;
pub mod reservations;
pub mod sessions;
pub mod users;
