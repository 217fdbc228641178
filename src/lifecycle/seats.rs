use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::Deserialize;

use crate::entities::seat::{self, SeatStatus};
use crate::error::{AppError, AppResult};

/// Set a seat's status. CANCELED is a sink: once a seat is canceled every
/// further request is silently ignored. No other validation happens here;
/// the reservation, booking and session lifecycles are responsible for seat
/// exclusivity.
pub(crate) async fn set_seat_status_in<C: ConnectionTrait>(
    conn: &C,
    seat_id: i32,
    new_status: SeatStatus,
) -> AppResult<seat::Model> {
    let db_seat = get_seat_in(conn, seat_id).await?;

    if db_seat.status == SeatStatus::Canceled {
        return Ok(db_seat);
    }

    let mut active: seat::ActiveModel = db_seat.into();
    active.status = Set(new_status);
    let updated = active.update(conn).await?;
    tracing::debug!("seat {} set to {:?}", seat_id, new_status);
    Ok(updated)
}

/// Point the seat at the reservation currently holding it (or clear the
/// link). Kept separate from the status write so session-level cascades can
/// flip seat statuses without touching reservation links.
pub(crate) async fn link_reservation_in<C: ConnectionTrait>(
    conn: &C,
    seat_id: i32,
    reservation_id: Option<i32>,
) -> AppResult<seat::Model> {
    let db_seat = get_seat_in(conn, seat_id).await?;

    let mut active: seat::ActiveModel = db_seat.into();
    active.reservation_id = Set(reservation_id);
    Ok(active.update(conn).await?)
}

pub(crate) async fn get_seat_in<C: ConnectionTrait>(
    conn: &C,
    seat_id: i32,
) -> AppResult<seat::Model> {
    seat::Entity::find_by_id(seat_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Seat not found".to_string()))
}

pub async fn get_seat<C: ConnectionTrait>(conn: &C, seat_id: i32) -> AppResult<seat::Model> {
    get_seat_in(conn, seat_id).await
}

#[derive(Debug, Default, Deserialize)]
pub struct SeatFilter {
    pub session_id: Option<i32>,
    pub status: Option<SeatStatus>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn get_seats<C: ConnectionTrait>(
    conn: &C,
    filter: SeatFilter,
) -> AppResult<Vec<seat::Model>> {
    let mut query = seat::Entity::find().order_by_asc(seat::Column::Id);

    if let Some(session_id) = filter.session_id {
        query = query.filter(seat::Column::SessionId.eq(session_id));
    }

    if let Some(status) = filter.status {
        query = query.filter(seat::Column::Status.eq(status));
    }

    if let Some(skip) = filter.skip {
        query = query.offset(skip);
    }

    if let Some(limit) = filter.limit {
        query = query.limit(limit);
    }

    Ok(query.all(conn).await?)
}
