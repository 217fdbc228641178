use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use serde::Deserialize;

use crate::entities::reservation::{self, ReservationStatus};
use crate::entities::seat::{self, SeatStatus};
use crate::entities::{booking, session};
use crate::error::{AppError, AppResult};
use crate::lifecycle::seats;

/// How long a pending reservation is meant to be held before its deadline
/// passes. The deadline is persisted but nothing sweeps it yet.
pub const RESERVATION_GRACE_MINUTES: i64 = 15;

#[derive(Debug, Deserialize)]
pub struct CreateReservation {
    pub booking_id: i32,
    pub seat_id: i32,
}

pub async fn create_reservation(
    db: &DatabaseConnection,
    req: CreateReservation,
) -> AppResult<reservation::Model> {
    let txn = db.begin().await?;
    let db_reservation = create_reservation_in(&txn, req).await?;
    txn.commit().await?;
    Ok(db_reservation)
}

pub(crate) async fn create_reservation_in<C: ConnectionTrait>(
    conn: &C,
    req: CreateReservation,
) -> AppResult<reservation::Model> {
    let db_booking = booking::Entity::find_by_id(req.booking_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    // Lock the seat row for the rest of the transaction so two concurrent
    // creations cannot both pass the checks below. SQLite has no FOR UPDATE;
    // there the partial unique index on confirmed reservations is the backstop.
    let mut seat_query = seat::Entity::find_by_id(req.seat_id);
    if conn.get_database_backend() == DbBackend::Postgres {
        seat_query = seat_query.lock_exclusive();
    }
    let db_seat = seat_query
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Seat not found".to_string()))?;

    if db_seat.status != SeatStatus::Available {
        return Err(AppError::Conflict("Seat is already reserved".to_string()));
    }

    let new_reservation = reservation::ActiveModel {
        booking_id: Set(req.booking_id),
        seat_id: Set(req.seat_id),
        status: Set(ReservationStatus::Pending),
        deadline: Set((Utc::now() + Duration::minutes(RESERVATION_GRACE_MINUTES)).into()),
        ..Default::default()
    };
    let mut db_reservation = new_reservation.insert(conn).await?;
    tracing::info!(
        "reservation {} created for booking {} on seat {}",
        db_reservation.id,
        req.booking_id,
        req.seat_id
    );

    let db_session = session::Entity::find_by_id(db_booking.session_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

    if db_session.auto_booking {
        db_reservation =
            update_reservation_status_in(conn, db_reservation.id, ReservationStatus::Confirmed)
                .await?;
    }

    Ok(db_reservation)
}

pub async fn update_reservation_status(
    db: &DatabaseConnection,
    reservation_id: i32,
    new_status: ReservationStatus,
) -> AppResult<reservation::Model> {
    let txn = db.begin().await?;
    let db_reservation = update_reservation_status_in(&txn, reservation_id, new_status).await?;
    txn.commit().await?;
    Ok(db_reservation)
}

pub(crate) async fn update_reservation_status_in<C: ConnectionTrait>(
    conn: &C,
    reservation_id: i32,
    new_status: ReservationStatus,
) -> AppResult<reservation::Model> {
    let db_reservation = get_reservation_in(conn, reservation_id).await?;

    if new_status == ReservationStatus::Pending {
        return Err(AppError::BadRequest(
            "Cannot change reservation status to pending".to_string(),
        ));
    }

    if db_reservation.status == ReservationStatus::Canceled
        && new_status != ReservationStatus::Canceled
    {
        return Err(AppError::BadRequest(
            "Cannot change status of a canceled reservation".to_string(),
        ));
    }

    match (db_reservation.status, new_status) {
        (ReservationStatus::Pending, ReservationStatus::Confirmed) => {
            // First confirmed reservation wins the seat; a later confirm
            // attempt against the same seat fails as a whole.
            let confirmed_holder = reservation::Entity::find()
                .filter(reservation::Column::SeatId.eq(db_reservation.seat_id))
                .filter(reservation::Column::Status.eq(ReservationStatus::Confirmed))
                .one(conn)
                .await?;
            if confirmed_holder.is_some() {
                return Err(AppError::Conflict("Seat is already reserved".to_string()));
            }

            seats::set_seat_status_in(conn, db_reservation.seat_id, SeatStatus::Reserved).await?;
            seats::link_reservation_in(conn, db_reservation.seat_id, Some(db_reservation.id))
                .await?;
        }
        (ReservationStatus::Confirmed, ReservationStatus::Canceled) => {
            seats::set_seat_status_in(conn, db_reservation.seat_id, SeatStatus::Available).await?;
            seats::link_reservation_in(conn, db_reservation.seat_id, None).await?;
        }
        // Pending -> canceled never marked the seat, nothing to release;
        // everything else is an idempotent re-apply.
        _ => {}
    }

    let mut active: reservation::ActiveModel = db_reservation.into();
    active.status = Set(new_status);
    let updated = active.update(conn).await?;
    tracing::info!("reservation {} set to {:?}", reservation_id, new_status);
    Ok(updated)
}

pub async fn delete_reservation(
    db: &DatabaseConnection,
    reservation_id: i32,
) -> AppResult<reservation::Model> {
    let db_reservation = get_reservation_in(db, reservation_id).await?;
    reservation::Entity::delete_by_id(reservation_id)
        .exec(db)
        .await?;
    tracing::info!("reservation {} deleted", reservation_id);
    Ok(db_reservation)
}

pub(crate) async fn get_reservation_in<C: ConnectionTrait>(
    conn: &C,
    reservation_id: i32,
) -> AppResult<reservation::Model> {
    reservation::Entity::find_by_id(reservation_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Reservation not found".to_string()))
}

pub async fn get_reservation<C: ConnectionTrait>(
    conn: &C,
    reservation_id: i32,
) -> AppResult<reservation::Model> {
    get_reservation_in(conn, reservation_id).await
}

#[derive(Debug, Default, Deserialize)]
pub struct ReservationFilter {
    pub user_id: Option<i32>,
    pub booking_id: Option<i32>,
    pub seat_id: Option<i32>,
    pub status: Option<ReservationStatus>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn get_reservations<C: ConnectionTrait>(
    conn: &C,
    filter: ReservationFilter,
) -> AppResult<Vec<reservation::Model>> {
    let mut query = reservation::Entity::find().order_by_asc(reservation::Column::Id);

    if let Some(user_id) = filter.user_id {
        query = query
            .join(JoinType::InnerJoin, reservation::Relation::Booking.def())
            .filter(booking::Column::UserId.eq(user_id));
    }

    if let Some(booking_id) = filter.booking_id {
        query = query.filter(reservation::Column::BookingId.eq(booking_id));
    }

    if let Some(seat_id) = filter.seat_id {
        query = query.filter(reservation::Column::SeatId.eq(seat_id));
    }

    if let Some(status) = filter.status {
        query = query.filter(reservation::Column::Status.eq(status));
    }

    if let Some(skip) = filter.skip {
        query = query.offset(skip);
    }

    if let Some(limit) = filter.limit {
        query = query.limit(limit);
    }

    Ok(query.all(conn).await?)
}
