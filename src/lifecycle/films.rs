use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Deserialize;

use crate::entities::film::{self, FilmStatus};
use crate::entities::session::{self, SessionStatus};
use crate::error::{AppError, AppResult};
use crate::lifecycle::sessions;

#[derive(Debug, Deserialize)]
pub struct CreateFilm {
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
}

pub async fn create_film(db: &DatabaseConnection, req: CreateFilm) -> AppResult<film::Model> {
    if req.duration_minutes <= 0 {
        return Err(AppError::BadRequest(
            "Duration must be positive".to_string(),
        ));
    }

    let new_film = film::ActiveModel {
        title: Set(req.title),
        description: Set(req.description),
        duration_minutes: Set(req.duration_minutes),
        status: Set(FilmStatus::Available),
        ..Default::default()
    };
    let db_film = new_film.insert(db).await?;
    tracing::info!("film {} created: {}", db_film.id, db_film.title);
    Ok(db_film)
}

pub async fn update_film_status(
    db: &DatabaseConnection,
    film_id: i32,
    new_status: FilmStatus,
) -> AppResult<film::Model> {
    let txn = db.begin().await?;
    let db_film = update_film_status_in(&txn, film_id, new_status).await?;
    txn.commit().await?;
    Ok(db_film)
}

/// Pulling a film from the catalog cancels every session of it that has not
/// already finished or been canceled, which in turn cancels their bookings,
/// reservations and seats.
pub(crate) async fn update_film_status_in<C: ConnectionTrait>(
    conn: &C,
    film_id: i32,
    new_status: FilmStatus,
) -> AppResult<film::Model> {
    let db_film = get_film_in(conn, film_id).await?;

    let mut active: film::ActiveModel = db_film.into();
    active.status = Set(new_status);
    let updated = active.update(conn).await?;
    tracing::info!("film {} set to {:?}", film_id, new_status);

    if new_status == FilmStatus::NotAvailable {
        let film_sessions = session::Entity::find()
            .filter(session::Column::FilmId.eq(film_id))
            .filter(
                session::Column::Status
                    .is_in([SessionStatus::Upcoming, SessionStatus::NowPlaying]),
            )
            .order_by_asc(session::Column::Id)
            .all(conn)
            .await?;
        for db_session in film_sessions {
            sessions::update_session_status_in(conn, db_session.id, Some(SessionStatus::Canceled))
                .await?;
        }
    }

    Ok(updated)
}

pub async fn delete_film(db: &DatabaseConnection, film_id: i32) -> AppResult<film::Model> {
    let db_film = get_film_in(db, film_id).await?;
    film::Entity::delete_by_id(film_id).exec(db).await?;
    tracing::info!("film {} deleted", film_id);
    Ok(db_film)
}

pub(crate) async fn get_film_in<C: ConnectionTrait>(
    conn: &C,
    film_id: i32,
) -> AppResult<film::Model> {
    film::Entity::find_by_id(film_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Film not found".to_string()))
}

pub async fn get_film<C: ConnectionTrait>(conn: &C, film_id: i32) -> AppResult<film::Model> {
    get_film_in(conn, film_id).await
}

#[derive(Debug, Default, Deserialize)]
pub struct FilmFilter {
    pub status: Option<FilmStatus>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn get_films<C: ConnectionTrait>(
    conn: &C,
    filter: FilmFilter,
) -> AppResult<Vec<film::Model>> {
    let mut query = film::Entity::find().order_by_asc(film::Column::Id);

    if let Some(status) = filter.status {
        query = query.filter(film::Column::Status.eq(status));
    }

    if let Some(skip) = filter.skip {
        query = query.offset(skip);
    }

    if let Some(limit) = filter.limit {
        query = query.limit(limit);
    }

    Ok(query.all(conn).await?)
}
