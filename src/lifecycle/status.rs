use chrono::{DateTime, Duration, Utc};

use crate::entities::session::SessionStatus;

/// Position of a session status in the forward progression. CANCELED sits
/// past COMPLETED so that no status can legally step "forward" into it; the
/// jump is special-cased by the caller instead.
pub fn session_status_order(status: SessionStatus) -> u8 {
    match status {
        SessionStatus::Upcoming => 1,
        SessionStatus::NowPlaying => 2,
        SessionStatus::Completed => 3,
        SessionStatus::Canceled => 4,
    }
}

/// True if `new` immediately follows `current` in the forward order.
pub fn is_next_session_status(current: SessionStatus, new: SessionStatus) -> bool {
    session_status_order(new) == session_status_order(current) + 1
}

/// The status a session naturally has at `now`, given its start time and the
/// film's duration: UPCOMING before the start, NOW_PLAYING inside
/// `[start, start + duration)`, COMPLETED afterwards.
pub fn derived_session_status(
    starts_at: DateTime<Utc>,
    duration_minutes: i32,
    now: DateTime<Utc>,
) -> SessionStatus {
    let ends_at = starts_at + Duration::minutes(i64::from(duration_minutes));

    if now < starts_at {
        SessionStatus::Upcoming
    } else if now < ends_at {
        SessionStatus::NowPlaying
    } else {
        SessionStatus::Completed
    }
}
