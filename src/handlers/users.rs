use axum::{extract::State, Extension, Json};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;

use crate::entities::user;
use crate::error::{AppError, AppResult};
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NotificationsRequest {
    pub enabled: bool,
}

/// Toggle the caller's notification opt-in
pub async fn set_notifications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<NotificationsRequest>,
) -> AppResult<Json<user::Model>> {
    let db_user = user::Entity::find_by_id(claims.sub)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut active: user::ActiveModel = db_user.into();
    active.notifications = Set(payload.enabled);
    let updated = active.update(&state.db).await?;
    tracing::info!(
        "user {} notifications set to {}",
        claims.sub,
        payload.enabled
    );
    Ok(Json(updated))
}
