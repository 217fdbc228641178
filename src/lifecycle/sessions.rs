use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Deserialize;

use crate::entities::booking::{self, BookingStatus};
use crate::entities::film::{self, FilmStatus};
use crate::entities::seat::{self, SeatStatus};
use crate::entities::session::{self, SessionStatus};
use crate::error::{AppError, AppResult};
use crate::lifecycle::bookings;
use crate::lifecycle::seats;
use crate::lifecycle::status::{derived_session_status, is_next_session_status};

#[derive(Debug, Deserialize)]
pub struct CreateSession {
    pub film_id: i32,
    pub starts_at: chrono::DateTime<Utc>,
    pub price: f64,
    pub capacity: i32,
    #[serde(default)]
    pub auto_booking: bool,
}

pub async fn create_session(
    db: &DatabaseConnection,
    req: CreateSession,
) -> AppResult<session::Model> {
    let txn = db.begin().await?;
    let db_session = create_session_in(&txn, req).await?;
    txn.commit().await?;
    Ok(db_session)
}

pub(crate) async fn create_session_in<C: ConnectionTrait>(
    conn: &C,
    req: CreateSession,
) -> AppResult<session::Model> {
    let db_film = film::Entity::find_by_id(req.film_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Film not found".to_string()))?;

    if db_film.status == FilmStatus::NotAvailable {
        return Err(AppError::BadRequest("Film is not available".to_string()));
    }

    if req.capacity <= 0 {
        return Err(AppError::BadRequest(
            "Capacity must be positive".to_string(),
        ));
    }

    let new_session = session::ActiveModel {
        film_id: Set(req.film_id),
        starts_at: Set(req.starts_at.into()),
        price: Set(req.price),
        capacity: Set(req.capacity),
        auto_booking: Set(req.auto_booking),
        status: Set(SessionStatus::Upcoming),
        ..Default::default()
    };
    let db_session = new_session.insert(conn).await?;

    // Seats exist as soon as the session does.
    for number in 1..=req.capacity {
        let new_seat = seat::ActiveModel {
            session_id: Set(db_session.id),
            number: Set(number),
            reservation_id: Set(None),
            status: Set(SeatStatus::Available),
            ..Default::default()
        };
        new_seat.insert(conn).await?;
    }
    tracing::info!(
        "session {} created with {} seats for film {}",
        db_session.id,
        req.capacity,
        req.film_id
    );

    Ok(db_session)
}

/// Cascade applied when a session leaves UPCOMING. Going live or finishing
/// cancels every still-pending booking and marks every seat RESERVED (no
/// further booking possible); a canceled session cancels all its bookings
/// and all its seats.
async fn handle_bookings_and_seats<C: ConnectionTrait>(
    conn: &C,
    db_session: &session::Model,
    new_status: SessionStatus,
) -> AppResult<()> {
    let session_bookings = booking::Entity::find()
        .filter(booking::Column::SessionId.eq(db_session.id))
        .order_by_asc(booking::Column::Id)
        .all(conn)
        .await?;
    let session_seats = seat::Entity::find()
        .filter(seat::Column::SessionId.eq(db_session.id))
        .order_by_asc(seat::Column::Number)
        .all(conn)
        .await?;

    match new_status {
        SessionStatus::NowPlaying | SessionStatus::Completed => {
            for db_booking in &session_bookings {
                if db_booking.status == BookingStatus::Pending {
                    bookings::update_booking_status_in(conn, db_booking.id, BookingStatus::Canceled)
                        .await?;
                }
            }
            for db_seat in &session_seats {
                seats::set_seat_status_in(conn, db_seat.id, SeatStatus::Reserved).await?;
            }
        }
        SessionStatus::Canceled => {
            for db_booking in &session_bookings {
                bookings::update_booking_status_in(conn, db_booking.id, BookingStatus::Canceled)
                    .await?;
            }
            for db_seat in &session_seats {
                seats::set_seat_status_in(conn, db_seat.id, SeatStatus::Canceled).await?;
            }
        }
        SessionStatus::Upcoming => {}
    }

    Ok(())
}

pub async fn update_session_status(
    db: &DatabaseConnection,
    session_id: i32,
    new_status: Option<SessionStatus>,
) -> AppResult<session::Model> {
    let txn = db.begin().await?;
    let db_session = update_session_status_in(&txn, session_id, new_status).await?;
    txn.commit().await?;
    Ok(db_session)
}

/// Dual-mode status update.
///
/// With an explicit target this is the admin state machine: one step forward
/// at a time, CANCELED reachable from any non-terminal state, COMPLETED
/// frozen. Without a target (the scheduler path) the status is derived from
/// the wall clock against the film's duration; the cascade only runs when
/// the derived status actually differs, which makes the periodic sweep
/// idempotent.
pub(crate) async fn update_session_status_in<C: ConnectionTrait>(
    conn: &C,
    session_id: i32,
    new_status: Option<SessionStatus>,
) -> AppResult<session::Model> {
    let db_session = get_session_in(conn, session_id).await?;
    let current_status = db_session.status;

    match new_status {
        Some(new_status) => {
            if current_status == SessionStatus::Completed {
                return Err(AppError::BadRequest(
                    "Cannot change status of a completed session".to_string(),
                ));
            }

            if new_status != SessionStatus::Canceled
                && !is_next_session_status(current_status, new_status)
            {
                return Err(AppError::BadRequest(
                    "Cannot change session status to a non-next status".to_string(),
                ));
            }

            let mut active: session::ActiveModel = db_session.clone().into();
            active.status = Set(new_status);
            let updated = active.update(conn).await?;
            handle_bookings_and_seats(conn, &updated, new_status).await?;
            tracing::info!("session {} set to {:?}", session_id, new_status);
            Ok(updated)
        }
        None => {
            if current_status == SessionStatus::Canceled {
                return Ok(db_session);
            }

            let db_film = film::Entity::find_by_id(db_session.film_id)
                .one(conn)
                .await?
                .ok_or_else(|| AppError::NotFound("Film not found".to_string()))?;

            let natural = derived_session_status(
                db_session.starts_at.with_timezone(&Utc),
                db_film.duration_minutes,
                Utc::now(),
            );
            if natural == current_status {
                return Ok(db_session);
            }

            let mut active: session::ActiveModel = db_session.into();
            active.status = Set(natural);
            let updated = active.update(conn).await?;
            handle_bookings_and_seats(conn, &updated, natural).await?;
            tracing::info!("session {} progressed to {:?}", session_id, natural);
            Ok(updated)
        }
    }
}

pub async fn update_session_price(
    db: &DatabaseConnection,
    session_id: i32,
    new_price: f64,
) -> AppResult<session::Model> {
    let db_session = get_session_in(db, session_id).await?;

    let mut active: session::ActiveModel = db_session.into();
    active.price = Set(new_price);
    let updated = active.update(db).await?;
    tracing::info!("session {} price set to {}", session_id, new_price);
    Ok(updated)
}

pub async fn delete_session(db: &DatabaseConnection, session_id: i32) -> AppResult<session::Model> {
    let db_session = get_session_in(db, session_id).await?;
    session::Entity::delete_by_id(session_id).exec(db).await?;
    tracing::info!("session {} deleted", session_id);
    Ok(db_session)
}

pub(crate) async fn get_session_in<C: ConnectionTrait>(
    conn: &C,
    session_id: i32,
) -> AppResult<session::Model> {
    session::Entity::find_by_id(session_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))
}

pub async fn get_session<C: ConnectionTrait>(
    conn: &C,
    session_id: i32,
) -> AppResult<session::Model> {
    get_session_in(conn, session_id).await
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionFilter {
    pub film_id: Option<i32>,
    pub status: Option<SessionStatus>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn get_sessions<C: ConnectionTrait>(
    conn: &C,
    filter: SessionFilter,
) -> AppResult<Vec<session::Model>> {
    let mut query = session::Entity::find().order_by_asc(session::Column::Id);

    if let Some(film_id) = filter.film_id {
        query = query.filter(session::Column::FilmId.eq(film_id));
    }

    if let Some(status) = filter.status {
        query = query.filter(session::Column::Status.eq(status));
    }

    if let Some(skip) = filter.skip {
        query = query.offset(skip);
    }

    if let Some(limit) = filter.limit {
        query = query.limit(limit);
    }

    Ok(query.all(conn).await?)
}
