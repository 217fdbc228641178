use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use crate::entities::reservation::{self, ReservationStatus};
use crate::error::{AppError, AppResult};
use crate::lifecycle::{bookings, reservations};
use crate::utils::jwt::Claims;
use crate::AppState;

/// Reserve a seat under one of the caller's bookings
pub async fn create_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<reservations::CreateReservation>,
) -> AppResult<Json<reservation::Model>> {
    let db_booking = bookings::get_booking(&state.db, payload.booking_id).await?;
    if db_booking.user_id != claims.sub && !claims.is_admin {
        return Err(AppError::Forbidden(
            "You can only reserve seats under your own bookings".to_string(),
        ));
    }

    Ok(Json(
        reservations::create_reservation(&state.db, payload).await?,
    ))
}

/// List reservations; regular users only ever see their own
pub async fn list_reservations(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(mut filter): Query<reservations::ReservationFilter>,
) -> AppResult<Json<Vec<reservation::Model>>> {
    if !claims.is_admin {
        filter.user_id = Some(claims.sub);
    }
    Ok(Json(
        reservations::get_reservations(&state.db, filter).await?,
    ))
}

pub async fn get_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(reservation_id): Path<i32>,
) -> AppResult<Json<reservation::Model>> {
    let db_reservation = reservations::get_reservation(&state.db, reservation_id).await?;
    let db_booking = bookings::get_booking(&state.db, db_reservation.booking_id).await?;
    if db_booking.user_id != claims.sub && !claims.is_admin {
        return Err(AppError::Forbidden(
            "You can only view your own reservations".to_string(),
        ));
    }
    Ok(Json(db_reservation))
}

/// Cancel a reservation (owner or admin)
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(reservation_id): Path<i32>,
) -> AppResult<Json<reservation::Model>> {
    let db_reservation = reservations::get_reservation(&state.db, reservation_id).await?;
    let db_booking = bookings::get_booking(&state.db, db_reservation.booking_id).await?;
    if db_booking.user_id != claims.sub && !claims.is_admin {
        return Err(AppError::Forbidden(
            "You can only cancel your own reservations".to_string(),
        ));
    }

    Ok(Json(
        reservations::update_reservation_status(
            &state.db,
            reservation_id,
            ReservationStatus::Canceled,
        )
        .await?,
    ))
}

/// Admin status override
pub async fn update_reservation_status(
    State(state): State<AppState>,
    Path((reservation_id, status)): Path<(i32, ReservationStatus)>,
) -> AppResult<Json<reservation::Model>> {
    Ok(Json(
        reservations::update_reservation_status(&state.db, reservation_id, status).await?,
    ))
}

pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<i32>,
) -> AppResult<Json<reservation::Model>> {
    Ok(Json(
        reservations::delete_reservation(&state.db, reservation_id).await?,
    ))
}
