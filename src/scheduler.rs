use std::time::Duration;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::entities::payment::{self, PaymentStatus};
use crate::entities::session::{self, SessionStatus};
use crate::lifecycle::{payments, sessions};

/// Background driver for the time-based parts of the lifecycle: sessions
/// progress from UPCOMING through NOW_PLAYING to COMPLETED as the clock
/// passes their window, and payments left pending past their window fail.
///
/// Each sweep handles entities one at a time; a failure on one entity is
/// logged and the rest of the sweep continues.
pub struct Scheduler {
    handles: Vec<JoinHandle<()>>,
}

impl Scheduler {
    pub fn start(db: DatabaseConnection, config: &Config) -> Self {
        let session_period = Duration::from_secs(config.session_sweep_secs);
        let payment_period = Duration::from_secs(config.payment_sweep_secs);

        let session_db = db.clone();
        let session_handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(session_period);
            loop {
                ticker.tick().await;
                sweep_sessions(&session_db).await;
            }
        });

        let payment_handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(payment_period);
            loop {
                ticker.tick().await;
                sweep_payments(&db).await;
            }
        });

        tracing::info!(
            "scheduler started (sessions every {:?}, payments every {:?})",
            session_period,
            payment_period
        );
        Self {
            handles: vec![session_handle, payment_handle],
        }
    }

    pub fn shutdown(self) {
        for handle in self.handles {
            handle.abort();
        }
        tracing::info!("scheduler stopped");
    }
}

async fn sweep_sessions(db: &DatabaseConnection) {
    let candidates = match session::Entity::find()
        .filter(session::Column::Status.is_in([SessionStatus::Upcoming, SessionStatus::NowPlaying]))
        .order_by_asc(session::Column::Id)
        .all(db)
        .await
    {
        Ok(found) => found,
        Err(err) => {
            tracing::error!("session sweep query failed: {err}");
            return;
        }
    };

    for db_session in candidates {
        if let Err(err) = sessions::update_session_status(db, db_session.id, None).await {
            tracing::error!("session sweep failed for session {}: {err}", db_session.id);
        }
    }
}

async fn sweep_payments(db: &DatabaseConnection) {
    let candidates = match payment::Entity::find()
        .filter(payment::Column::Status.eq(PaymentStatus::Pending))
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await
    {
        Ok(found) => found,
        Err(err) => {
            tracing::error!("payment sweep query failed: {err}");
            return;
        }
    };

    for db_payment in candidates {
        if let Err(err) = payments::update_payment_status(db, db_payment.id, None).await {
            tracing::error!("payment sweep failed for payment {}: {err}", db_payment.id);
        }
    }
}
