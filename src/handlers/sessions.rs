use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::entities::seat;
use crate::entities::session::{self, SessionStatus};
use crate::error::AppResult;
use crate::lifecycle::{seats, sessions};
use crate::AppState;

pub async fn list_sessions(
    State(state): State<AppState>,
    Query(filter): Query<sessions::SessionFilter>,
) -> AppResult<Json<Vec<session::Model>>> {
    Ok(Json(sessions::get_sessions(&state.db, filter).await?))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<i32>,
) -> AppResult<Json<session::Model>> {
    Ok(Json(sessions::get_session(&state.db, session_id).await?))
}

pub async fn list_seats(
    State(state): State<AppState>,
    Query(filter): Query<seats::SeatFilter>,
) -> AppResult<Json<Vec<seat::Model>>> {
    Ok(Json(seats::get_seats(&state.db, filter).await?))
}

/// Schedule a session; its seats are created with it
pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<sessions::CreateSession>,
) -> AppResult<Json<session::Model>> {
    Ok(Json(sessions::create_session(&state.db, payload).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSessionStatusRequest {
    pub status: Option<SessionStatus>,
}

/// Move a session along its lifecycle. With a status in the body this is an
/// explicit transition; with an empty body the status is derived from the
/// clock, same as the scheduler sweep.
pub async fn update_session_status(
    State(state): State<AppState>,
    Path(session_id): Path<i32>,
    Json(payload): Json<UpdateSessionStatusRequest>,
) -> AppResult<Json<session::Model>> {
    Ok(Json(
        sessions::update_session_status(&state.db, session_id, payload.status).await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct UpdateSessionPriceRequest {
    pub price: f64,
}

pub async fn update_session_price(
    State(state): State<AppState>,
    Path(session_id): Path<i32>,
    Json(payload): Json<UpdateSessionPriceRequest>,
) -> AppResult<Json<session::Model>> {
    Ok(Json(
        sessions::update_session_price(&state.db, session_id, payload.price).await?,
    ))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<i32>,
) -> AppResult<Json<session::Model>> {
    Ok(Json(sessions::delete_session(&state.db, session_id).await?))
}
