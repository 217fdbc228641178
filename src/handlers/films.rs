use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::entities::film::{self, FilmStatus};
use crate::error::AppResult;
use crate::lifecycle::films;
use crate::AppState;

/// List films, newest catalog entries last
pub async fn list_films(
    State(state): State<AppState>,
    Query(filter): Query<films::FilmFilter>,
) -> AppResult<Json<Vec<film::Model>>> {
    Ok(Json(films::get_films(&state.db, filter).await?))
}

pub async fn get_film(
    State(state): State<AppState>,
    Path(film_id): Path<i32>,
) -> AppResult<Json<film::Model>> {
    Ok(Json(films::get_film(&state.db, film_id).await?))
}

/// Add a film to the catalog
pub async fn create_film(
    State(state): State<AppState>,
    Json(payload): Json<films::CreateFilm>,
) -> AppResult<Json<film::Model>> {
    Ok(Json(films::create_film(&state.db, payload).await?))
}

/// Flip a film's availability; pulling it cancels its live sessions
pub async fn update_film_status(
    State(state): State<AppState>,
    Path((film_id, status)): Path<(i32, FilmStatus)>,
) -> AppResult<Json<film::Model>> {
    Ok(Json(
        films::update_film_status(&state.db, film_id, status).await?,
    ))
}

pub async fn delete_film(
    State(state): State<AppState>,
    Path(film_id): Path<i32>,
) -> AppResult<Json<film::Model>> {
    Ok(Json(films::delete_film(&state.db, film_id).await?))
}
