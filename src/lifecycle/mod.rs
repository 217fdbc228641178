//! The lifecycle engine: every status transition of films, sessions, seats,
//! bookings, reservations and payments goes through these modules, including
//! the cascades between them (a session completing cancels its pending
//! bookings, a booking confirming confirms its reservations and evicts
//! competing bookings, and so on).
//!
//! Each public entry point opens one transaction, runs its whole cascade
//! inside it and commits once, so a failure anywhere rolls back everything.
//! The `_in` variants operate on an already-open transaction and are what
//! the modules call into each other.

pub mod bookings;
pub mod films;
pub mod payments;
pub mod reservations;
pub mod seats;
pub mod sessions;
pub mod status;
