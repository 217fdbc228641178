pub mod booking;
pub mod film;
pub mod payment;
pub mod reservation;
pub mod seat;
pub mod session;
pub mod user;
