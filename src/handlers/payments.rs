use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::entities::booking::BookingStatus;
use crate::entities::payment::{self, PaymentStatus};
use crate::error::{AppError, AppResult};
use crate::handlers::bookings::notify_owner;
use crate::lifecycle::{bookings, payments};
use crate::utils::jwt::Claims;
use crate::AppState;

/// Open a payment for one of the caller's bookings
pub async fn create_payment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<payments::CreatePayment>,
) -> AppResult<Json<payment::Model>> {
    let db_booking = bookings::get_booking(&state.db, payload.booking_id).await?;
    if db_booking.user_id != claims.sub && !claims.is_admin {
        return Err(AppError::Forbidden(
            "You can only pay for your own bookings".to_string(),
        ));
    }

    Ok(Json(payments::create_payment(&state.db, payload).await?))
}

#[derive(Debug, Deserialize)]
pub struct PaymentWebhookRequest {
    pub payment_id: i32,
    pub status: PaymentStatus,
}

/// Payment gateway callback. The reported status is applied as-is; a
/// completed payment confirms its booking, which settles the seats.
pub async fn payment_webhook(
    State(state): State<AppState>,
    Json(payload): Json<PaymentWebhookRequest>,
) -> AppResult<Json<payment::Model>> {
    let db_payment =
        payments::update_payment_status(&state.db, payload.payment_id, Some(payload.status))
            .await?;

    if db_payment.status == PaymentStatus::Completed {
        let db_booking = bookings::update_booking_status(
            &state.db,
            db_payment.booking_id,
            BookingStatus::Confirmed,
        )
        .await?;
        notify_owner(&state, &db_booking, "Booking confirmed").await;
    }

    Ok(Json(db_payment))
}

/// List payments; regular users only ever see payments on their own bookings
pub async fn list_payments(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(filter): Query<payments::PaymentFilter>,
) -> AppResult<Json<Vec<payment::Model>>> {
    let found = payments::get_payments(&state.db, filter).await?;
    if claims.is_admin {
        return Ok(Json(found));
    }

    let mut own = Vec::new();
    for db_payment in found {
        let db_booking = bookings::get_booking(&state.db, db_payment.booking_id).await?;
        if db_booking.user_id == claims.sub {
            own.push(db_payment);
        }
    }
    Ok(Json(own))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(payment_id): Path<i32>,
) -> AppResult<Json<payment::Model>> {
    let db_payment = payments::get_payment(&state.db, payment_id).await?;
    let db_booking = bookings::get_booking(&state.db, db_payment.booking_id).await?;
    if db_booking.user_id != claims.sub && !claims.is_admin {
        return Err(AppError::Forbidden(
            "You can only view your own payments".to_string(),
        ));
    }
    Ok(Json(db_payment))
}
