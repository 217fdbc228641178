use std::collections::VecDeque;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Deserialize;

use crate::entities::booking::{self, BookingStatus};
use crate::entities::reservation::{self, ReservationStatus};
use crate::entities::session::{self, SessionStatus};
use crate::error::{AppError, AppResult};
use crate::lifecycle::reservations;

#[derive(Debug, Deserialize)]
pub struct CreateBooking {
    pub session_id: i32,
}

pub async fn create_booking(
    db: &DatabaseConnection,
    req: CreateBooking,
    user_id: i32,
) -> AppResult<booking::Model> {
    let txn = db.begin().await?;
    let db_booking = create_booking_in(&txn, req, user_id).await?;
    txn.commit().await?;
    Ok(db_booking)
}

pub(crate) async fn create_booking_in<C: ConnectionTrait>(
    conn: &C,
    req: CreateBooking,
    user_id: i32,
) -> AppResult<booking::Model> {
    let db_session = session::Entity::find_by_id(req.session_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

    if db_session.status != SessionStatus::Upcoming {
        return Err(AppError::BadRequest(
            "Cannot create booking for a session that is not upcoming".to_string(),
        ));
    }

    let new_booking = booking::ActiveModel {
        session_id: Set(req.session_id),
        user_id: Set(user_id),
        status: Set(BookingStatus::Pending),
        ..Default::default()
    };
    let mut db_booking = new_booking.insert(conn).await?;
    tracing::info!(
        "booking {} created for session {} by user {}",
        db_booking.id,
        req.session_id,
        user_id
    );

    if db_session.auto_booking {
        db_booking =
            update_booking_status_in(conn, db_booking.id, BookingStatus::Confirmed).await?;
    }

    Ok(db_booking)
}

pub async fn update_booking_status(
    db: &DatabaseConnection,
    booking_id: i32,
    new_status: BookingStatus,
) -> AppResult<booking::Model> {
    let txn = db.begin().await?;
    let db_booking = update_booking_status_in(&txn, booking_id, new_status).await?;
    txn.commit().await?;
    Ok(db_booking)
}

/// Apply a status change to a booking and run its cascades.
///
/// Confirmation confirms every reservation under the booking and then evicts
/// the competition: any pending reservation elsewhere that targets one of
/// the just-confirmed seats gets its owning booking canceled. Evictions are
/// processed through an explicit worklist rather than recursive calls, so
/// the cascade depth is bounded and the whole thing stays inside the
/// caller's transaction.
pub(crate) async fn update_booking_status_in<C: ConnectionTrait>(
    conn: &C,
    booking_id: i32,
    new_status: BookingStatus,
) -> AppResult<booking::Model> {
    if new_status == BookingStatus::Pending {
        return Err(AppError::BadRequest(
            "Cannot change booking status back to pending".to_string(),
        ));
    }

    let mut worklist: VecDeque<(i32, BookingStatus)> = VecDeque::new();
    worklist.push_back((booking_id, new_status));

    while let Some((id, status)) = worklist.pop_front() {
        let db_booking = get_booking_in(conn, id).await?;

        let mut active: booking::ActiveModel = db_booking.into();
        active.status = Set(status);
        active.update(conn).await?;
        tracing::info!("booking {} set to {:?}", id, status);

        let owned = reservation::Entity::find()
            .filter(reservation::Column::BookingId.eq(id))
            .order_by_asc(reservation::Column::Id)
            .all(conn)
            .await?;

        if status == BookingStatus::Confirmed {
            for res in &owned {
                reservations::update_reservation_status_in(
                    conn,
                    res.id,
                    ReservationStatus::Confirmed,
                )
                .await?;

                // Pending reservations of other bookings that wanted the
                // same seat lose it; queue their bookings for cancellation.
                let competitors = reservation::Entity::find()
                    .filter(reservation::Column::SeatId.eq(res.seat_id))
                    .filter(reservation::Column::Status.eq(ReservationStatus::Pending))
                    .filter(reservation::Column::BookingId.ne(id))
                    .all(conn)
                    .await?;
                for competitor in competitors {
                    tracing::debug!(
                        "booking {} loses seat {} to booking {}",
                        competitor.booking_id,
                        res.seat_id,
                        id
                    );
                    worklist.push_back((competitor.booking_id, BookingStatus::Canceled));
                }
            }
        } else {
            for res in &owned {
                reservations::update_reservation_status_in(
                    conn,
                    res.id,
                    ReservationStatus::Canceled,
                )
                .await?;
            }
        }
    }

    get_booking_in(conn, booking_id).await
}

pub async fn delete_booking(db: &DatabaseConnection, booking_id: i32) -> AppResult<booking::Model> {
    let db_booking = get_booking_in(db, booking_id).await?;
    booking::Entity::delete_by_id(booking_id).exec(db).await?;
    tracing::info!("booking {} deleted", booking_id);
    Ok(db_booking)
}

pub(crate) async fn get_booking_in<C: ConnectionTrait>(
    conn: &C,
    booking_id: i32,
) -> AppResult<booking::Model> {
    booking::Entity::find_by_id(booking_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
}

pub async fn get_booking<C: ConnectionTrait>(
    conn: &C,
    booking_id: i32,
) -> AppResult<booking::Model> {
    get_booking_in(conn, booking_id).await
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingFilter {
    pub user_id: Option<i32>,
    pub session_id: Option<i32>,
    pub status: Option<BookingStatus>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn get_bookings<C: ConnectionTrait>(
    conn: &C,
    filter: BookingFilter,
) -> AppResult<Vec<booking::Model>> {
    let mut query = booking::Entity::find().order_by_asc(booking::Column::Id);

    if let Some(user_id) = filter.user_id {
        query = query.filter(booking::Column::UserId.eq(user_id));
    }

    if let Some(session_id) = filter.session_id {
        query = query.filter(booking::Column::SessionId.eq(session_id));
    }

    if let Some(status) = filter.status {
        query = query.filter(booking::Column::Status.eq(status));
    }

    if let Some(skip) = filter.skip {
        query = query.offset(skip);
    }

    if let Some(limit) = filter.limit {
        query = query.limit(limit);
    }

    Ok(query.all(conn).await?)
}
