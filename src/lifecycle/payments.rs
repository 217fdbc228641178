use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Deserialize;

use crate::entities::booking;
use crate::entities::payment::{self, PaymentStatus};
use crate::error::{AppError, AppResult};

/// A pending payment older than this is considered abandoned and swept to
/// FAILED by the scheduler.
pub const PAYMENT_TIMEOUT_MINUTES: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct CreatePayment {
    pub booking_id: i32,
    pub amount: f64,
}

pub async fn create_payment(
    db: &DatabaseConnection,
    req: CreatePayment,
) -> AppResult<payment::Model> {
    let txn = db.begin().await?;
    let db_payment = create_payment_in(&txn, req).await?;
    txn.commit().await?;
    Ok(db_payment)
}

pub(crate) async fn create_payment_in<C: ConnectionTrait>(
    conn: &C,
    req: CreatePayment,
) -> AppResult<payment::Model> {
    booking::Entity::find_by_id(req.booking_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let existing = payment::Entity::find()
        .filter(payment::Column::BookingId.eq(req.booking_id))
        .one(conn)
        .await?;
    if existing.is_some() {
        return Err(AppError::BadRequest(
            "Payment already exists for this booking".to_string(),
        ));
    }

    let new_payment = payment::ActiveModel {
        booking_id: Set(req.booking_id),
        amount: Set(req.amount),
        status: Set(PaymentStatus::Pending),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    let db_payment = new_payment.insert(conn).await?;
    tracing::info!(
        "payment {} created for booking {} ({})",
        db_payment.id,
        req.booking_id,
        req.amount
    );
    Ok(db_payment)
}

pub async fn update_payment_status(
    db: &DatabaseConnection,
    payment_id: i32,
    new_status: Option<PaymentStatus>,
) -> AppResult<payment::Model> {
    let txn = db.begin().await?;
    let db_payment = update_payment_status_in(&txn, payment_id, new_status).await?;
    txn.commit().await?;
    Ok(db_payment)
}

/// With an explicit target the status is overwritten as-is (the gateway
/// webhook is trusted). Without one this is the timeout sweep: a payment
/// still pending past its window fails, anything else is left alone.
pub(crate) async fn update_payment_status_in<C: ConnectionTrait>(
    conn: &C,
    payment_id: i32,
    new_status: Option<PaymentStatus>,
) -> AppResult<payment::Model> {
    let db_payment = get_payment_in(conn, payment_id).await?;

    let target = match new_status {
        Some(status) => status,
        None => {
            let expired = db_payment.status == PaymentStatus::Pending
                && Utc::now() - db_payment.created_at.with_timezone(&Utc)
                    > Duration::minutes(PAYMENT_TIMEOUT_MINUTES);
            if !expired {
                return Ok(db_payment);
            }
            PaymentStatus::Failed
        }
    };

    let mut active: payment::ActiveModel = db_payment.into();
    active.status = Set(target);
    let updated = active.update(conn).await?;
    tracing::info!("payment {} set to {:?}", payment_id, target);
    Ok(updated)
}

pub(crate) async fn get_payment_in<C: ConnectionTrait>(
    conn: &C,
    payment_id: i32,
) -> AppResult<payment::Model> {
    payment::Entity::find_by_id(payment_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))
}

pub async fn get_payment<C: ConnectionTrait>(
    conn: &C,
    payment_id: i32,
) -> AppResult<payment::Model> {
    get_payment_in(conn, payment_id).await
}

#[derive(Debug, Default, Deserialize)]
pub struct PaymentFilter {
    pub booking_id: Option<i32>,
    pub status: Option<PaymentStatus>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn get_payments<C: ConnectionTrait>(
    conn: &C,
    filter: PaymentFilter,
) -> AppResult<Vec<payment::Model>> {
    let mut query = payment::Entity::find().order_by_asc(payment::Column::Id);

    if let Some(booking_id) = filter.booking_id {
        query = query.filter(payment::Column::BookingId.eq(booking_id));
    }

    if let Some(status) = filter.status {
        query = query.filter(payment::Column::Status.eq(status));
    }

    if let Some(skip) = filter.skip {
        query = query.offset(skip);
    }

    if let Some(limit) = filter.limit {
        query = query.limit(limit);
    }

    Ok(query.all(conn).await?)
}
