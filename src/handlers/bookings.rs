use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use sea_orm::EntityTrait;

use crate::entities::booking::{self, BookingStatus};
use crate::entities::user;
use crate::error::{AppError, AppResult};
use crate::lifecycle::bookings;
use crate::notifier;
use crate::utils::jwt::Claims;
use crate::AppState;

/// Create a booking on an upcoming session
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<bookings::CreateBooking>,
) -> AppResult<Json<booking::Model>> {
    Ok(Json(
        bookings::create_booking(&state.db, payload, claims.sub).await?,
    ))
}

/// List bookings; regular users only ever see their own
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(mut filter): Query<bookings::BookingFilter>,
) -> AppResult<Json<Vec<booking::Model>>> {
    if !claims.is_admin {
        filter.user_id = Some(claims.sub);
    }
    Ok(Json(bookings::get_bookings(&state.db, filter).await?))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(booking_id): Path<i32>,
) -> AppResult<Json<booking::Model>> {
    let db_booking = bookings::get_booking(&state.db, booking_id).await?;
    if db_booking.user_id != claims.sub && !claims.is_admin {
        return Err(AppError::Forbidden(
            "You can only view your own bookings".to_string(),
        ));
    }
    Ok(Json(db_booking))
}

/// Cancel a booking (owner or admin)
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(booking_id): Path<i32>,
) -> AppResult<Json<booking::Model>> {
    let db_booking = bookings::get_booking(&state.db, booking_id).await?;
    if db_booking.user_id != claims.sub && !claims.is_admin {
        return Err(AppError::Forbidden(
            "You can only cancel your own bookings".to_string(),
        ));
    }

    let updated = bookings::update_booking_status(&state.db, booking_id, BookingStatus::Canceled)
        .await?;
    notify_owner(&state, &updated, "Booking canceled").await;
    Ok(Json(updated))
}

/// Admin status override
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path((booking_id, status)): Path<(i32, BookingStatus)>,
) -> AppResult<Json<booking::Model>> {
    let updated = bookings::update_booking_status(&state.db, booking_id, status).await?;
    notify_owner(&state, &updated, "Booking updated").await;
    Ok(Json(updated))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
) -> AppResult<Json<booking::Model>> {
    Ok(Json(bookings::delete_booking(&state.db, booking_id).await?))
}

/// Tell the booking's owner about a status change, if they opted in.
/// Lookup failures are logged, never surfaced to the caller.
pub(crate) async fn notify_owner(state: &AppState, db_booking: &booking::Model, subject: &str) {
    match user::Entity::find_by_id(db_booking.user_id).one(&state.db).await {
        Ok(Some(owner)) if owner.notifications => {
            let body = format!(
                "Your booking {} for session {} is now {:?}.",
                db_booking.id, db_booking.session_id, db_booking.status
            );
            notifier::send_notification(&state.config, &owner.email, subject, &body);
        }
        Ok(_) => {}
        Err(err) => {
            tracing::warn!("could not load owner of booking {}: {err}", db_booking.id);
        }
    }
}
