use chrono::{Duration, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, Set,
};

use cinema_booking_backend::entities::booking::BookingStatus;
use cinema_booking_backend::entities::film::FilmStatus;
use cinema_booking_backend::entities::payment::PaymentStatus;
use cinema_booking_backend::entities::reservation::ReservationStatus;
use cinema_booking_backend::entities::seat::SeatStatus;
use cinema_booking_backend::entities::session::SessionStatus;
use cinema_booking_backend::entities::{film, payment, seat, session, user};
use cinema_booking_backend::error::AppError;
use cinema_booking_backend::lifecycle::{
    bookings, films, payments, reservations, seats, sessions,
};

async fn setup() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

async fn seed_user(db: &DatabaseConnection, email: &str) -> user::Model {
    user::ActiveModel {
        email: Set(email.to_string()),
        nickname: Set("Tester".to_string()),
        password_hash: Set("hash".to_string()),
        notifications: Set(false),
        is_active: Set(true),
        is_admin: Set(false),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

async fn seed_film(db: &DatabaseConnection) -> film::Model {
    films::create_film(
        db,
        films::CreateFilm {
            title: "Metropolis".to_string(),
            description: "Restored cut".to_string(),
            duration_minutes: 120,
        },
    )
    .await
    .unwrap()
}

async fn seed_session(
    db: &DatabaseConnection,
    film_id: i32,
    auto_booking: bool,
) -> session::Model {
    sessions::create_session(
        db,
        sessions::CreateSession {
            film_id,
            starts_at: Utc::now() + Duration::hours(2),
            price: 12.5,
            capacity: 3,
            auto_booking,
        },
    )
    .await
    .unwrap()
}

async fn session_seats(db: &DatabaseConnection, session_id: i32) -> Vec<seat::Model> {
    seats::get_seats(
        db,
        seats::SeatFilter {
            session_id: Some(session_id),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

async fn backdate_session(db: &DatabaseConnection, session_id: i32, hours: i64) {
    let db_session = session::Entity::find_by_id(session_id)
        .one(db)
        .await
        .unwrap()
        .unwrap();
    let mut active: session::ActiveModel = db_session.into();
    active.starts_at = Set((Utc::now() - Duration::hours(hours)).into());
    active.update(db).await.unwrap();
}

#[tokio::test]
async fn session_creation_populates_seats() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;

    assert_eq!(session.status, SessionStatus::Upcoming);
    let found = session_seats(&db, session.id).await;
    assert_eq!(found.len(), 3);
    let numbers: Vec<i32> = found.iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(found.iter().all(|s| s.status == SeatStatus::Available));
    assert!(found.iter().all(|s| s.reservation_id.is_none()));
}

#[tokio::test]
async fn session_on_unavailable_film_rejected() {
    let db = setup().await;
    let film = seed_film(&db).await;
    films::update_film_status(&db, film.id, FilmStatus::NotAvailable)
        .await
        .unwrap();

    let err = sessions::create_session(
        &db,
        sessions::CreateSession {
            film_id: film.id,
            starts_at: Utc::now() + Duration::hours(2),
            price: 10.0,
            capacity: 2,
            auto_booking: false,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn booking_requires_upcoming_session() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let user = seed_user(&db, "a@example.com").await;

    sessions::update_session_status(&db, session.id, Some(SessionStatus::NowPlaying))
        .await
        .unwrap();

    let err = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        user.id,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn pending_reservation_leaves_seat_available() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let user = seed_user(&db, "a@example.com").await;
    let seat = session_seats(&db, session.id).await.remove(0);

    let booking = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        user.id,
    )
    .await
    .unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);

    let res = reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: booking.id,
            seat_id: seat.id,
        },
    )
    .await
    .unwrap();
    assert_eq!(res.status, ReservationStatus::Pending);

    let seat = seats::get_seat(&db, seat.id).await.unwrap();
    assert_eq!(seat.status, SeatStatus::Available);
    assert_eq!(seat.reservation_id, None);
}

#[tokio::test]
async fn booking_confirmation_settles_seat_and_evicts_competitors() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let alice = seed_user(&db, "alice@example.com").await;
    let bob = seed_user(&db, "bob@example.com").await;
    let seat = session_seats(&db, session.id).await.remove(0);

    let booking_a = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        alice.id,
    )
    .await
    .unwrap();
    let booking_b = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        bob.id,
    )
    .await
    .unwrap();

    // Two pending reservations may target the same seat.
    let res_a = reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: booking_a.id,
            seat_id: seat.id,
        },
    )
    .await
    .unwrap();
    let res_b = reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: booking_b.id,
            seat_id: seat.id,
        },
    )
    .await
    .unwrap();

    let confirmed =
        bookings::update_booking_status(&db, booking_a.id, BookingStatus::Confirmed)
            .await
            .unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    let res_a = reservations::get_reservation(&db, res_a.id).await.unwrap();
    assert_eq!(res_a.status, ReservationStatus::Confirmed);

    // The loser's whole booking goes down with its reservation.
    let res_b = reservations::get_reservation(&db, res_b.id).await.unwrap();
    assert_eq!(res_b.status, ReservationStatus::Canceled);
    let booking_b = bookings::get_booking(&db, booking_b.id).await.unwrap();
    assert_eq!(booking_b.status, BookingStatus::Canceled);

    let seat = seats::get_seat(&db, seat.id).await.unwrap();
    assert_eq!(seat.status, SeatStatus::Reserved);
    assert_eq!(seat.reservation_id, Some(res_a.id));
}

#[tokio::test]
async fn reservation_on_taken_seat_rejected() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let alice = seed_user(&db, "alice@example.com").await;
    let bob = seed_user(&db, "bob@example.com").await;
    let seat = session_seats(&db, session.id).await.remove(0);

    let booking_a = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        alice.id,
    )
    .await
    .unwrap();
    reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: booking_a.id,
            seat_id: seat.id,
        },
    )
    .await
    .unwrap();
    bookings::update_booking_status(&db, booking_a.id, BookingStatus::Confirmed)
        .await
        .unwrap();

    let booking_b = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        bob.id,
    )
    .await
    .unwrap();
    let err = reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: booking_b.id,
            seat_id: seat.id,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn direct_confirm_loses_to_existing_holder() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let alice = seed_user(&db, "alice@example.com").await;
    let bob = seed_user(&db, "bob@example.com").await;
    let seat = session_seats(&db, session.id).await.remove(0);

    let booking_a = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        alice.id,
    )
    .await
    .unwrap();
    let booking_b = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        bob.id,
    )
    .await
    .unwrap();

    let res_a = reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: booking_a.id,
            seat_id: seat.id,
        },
    )
    .await
    .unwrap();
    let res_b = reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: booking_b.id,
            seat_id: seat.id,
        },
    )
    .await
    .unwrap();

    reservations::update_reservation_status(&db, res_a.id, ReservationStatus::Confirmed)
        .await
        .unwrap();
    let err =
        reservations::update_reservation_status(&db, res_b.id, ReservationStatus::Confirmed)
            .await
            .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn canceling_confirmed_booking_releases_seats() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let user = seed_user(&db, "a@example.com").await;
    let seat = session_seats(&db, session.id).await.remove(0);

    let booking = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        user.id,
    )
    .await
    .unwrap();
    let res = reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: booking.id,
            seat_id: seat.id,
        },
    )
    .await
    .unwrap();
    bookings::update_booking_status(&db, booking.id, BookingStatus::Confirmed)
        .await
        .unwrap();

    bookings::update_booking_status(&db, booking.id, BookingStatus::Canceled)
        .await
        .unwrap();

    let res = reservations::get_reservation(&db, res.id).await.unwrap();
    assert_eq!(res.status, ReservationStatus::Canceled);
    let seat = seats::get_seat(&db, seat.id).await.unwrap();
    assert_eq!(seat.status, SeatStatus::Available);
    assert_eq!(seat.reservation_id, None);

    // A canceled reservation cannot come back.
    let err =
        reservations::update_reservation_status(&db, res.id, ReservationStatus::Confirmed)
            .await
            .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn auto_booking_confirms_immediately() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, true).await;
    let user = seed_user(&db, "a@example.com").await;
    let seat = session_seats(&db, session.id).await.remove(0);

    let booking = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        user.id,
    )
    .await
    .unwrap();
    assert_eq!(booking.status, BookingStatus::Confirmed);

    let res = reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: booking.id,
            seat_id: seat.id,
        },
    )
    .await
    .unwrap();
    assert_eq!(res.status, ReservationStatus::Confirmed);

    let seat = seats::get_seat(&db, seat.id).await.unwrap();
    assert_eq!(seat.status, SeatStatus::Reserved);
    assert_eq!(seat.reservation_id, Some(res.id));
}

#[tokio::test]
async fn session_status_machine_rejects_skips_and_thaws() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;

    // UPCOMING cannot jump straight to COMPLETED.
    let err = sessions::update_session_status(&db, session.id, Some(SessionStatus::Completed))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    sessions::update_session_status(&db, session.id, Some(SessionStatus::NowPlaying))
        .await
        .unwrap();
    sessions::update_session_status(&db, session.id, Some(SessionStatus::Completed))
        .await
        .unwrap();

    // COMPLETED is frozen, even against cancellation.
    let err = sessions::update_session_status(&db, session.id, Some(SessionStatus::Canceled))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn going_live_drops_pending_bookings_and_locks_seats() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let alice = seed_user(&db, "alice@example.com").await;
    let bob = seed_user(&db, "bob@example.com").await;
    let mut found = session_seats(&db, session.id).await;
    let seat_a = found.remove(0);

    let booking_a = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        alice.id,
    )
    .await
    .unwrap();
    reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: booking_a.id,
            seat_id: seat_a.id,
        },
    )
    .await
    .unwrap();
    bookings::update_booking_status(&db, booking_a.id, BookingStatus::Confirmed)
        .await
        .unwrap();
    let booking_b = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        bob.id,
    )
    .await
    .unwrap();

    sessions::update_session_status(&db, session.id, Some(SessionStatus::NowPlaying))
        .await
        .unwrap();

    let booking_a = bookings::get_booking(&db, booking_a.id).await.unwrap();
    assert_eq!(booking_a.status, BookingStatus::Confirmed);
    let booking_b = bookings::get_booking(&db, booking_b.id).await.unwrap();
    assert_eq!(booking_b.status, BookingStatus::Canceled);

    let found = session_seats(&db, session.id).await;
    assert!(found.iter().all(|s| s.status == SeatStatus::Reserved));
}

#[tokio::test]
async fn session_cancellation_takes_everything_down() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let user = seed_user(&db, "a@example.com").await;
    let seat = session_seats(&db, session.id).await.remove(0);

    let booking = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        user.id,
    )
    .await
    .unwrap();
    let res = reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: booking.id,
            seat_id: seat.id,
        },
    )
    .await
    .unwrap();
    bookings::update_booking_status(&db, booking.id, BookingStatus::Confirmed)
        .await
        .unwrap();

    sessions::update_session_status(&db, session.id, Some(SessionStatus::Canceled))
        .await
        .unwrap();

    let booking = bookings::get_booking(&db, booking.id).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Canceled);
    let res = reservations::get_reservation(&db, res.id).await.unwrap();
    assert_eq!(res.status, ReservationStatus::Canceled);
    let found = session_seats(&db, session.id).await;
    assert!(found.iter().all(|s| s.status == SeatStatus::Canceled));
}

#[tokio::test]
async fn derived_status_follows_the_clock_and_is_idempotent() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;

    // Still two hours out: nothing changes.
    let same = sessions::update_session_status(&db, session.id, None)
        .await
        .unwrap();
    assert_eq!(same.status, SessionStatus::Upcoming);

    // One hour into a two-hour film.
    backdate_session(&db, session.id, 1).await;
    let live = sessions::update_session_status(&db, session.id, None)
        .await
        .unwrap();
    assert_eq!(live.status, SessionStatus::NowPlaying);
    let live = sessions::update_session_status(&db, session.id, None)
        .await
        .unwrap();
    assert_eq!(live.status, SessionStatus::NowPlaying);

    // Three hours in: over.
    backdate_session(&db, session.id, 3).await;
    let done = sessions::update_session_status(&db, session.id, None)
        .await
        .unwrap();
    assert_eq!(done.status, SessionStatus::Completed);
}

#[tokio::test]
async fn derived_status_leaves_canceled_sessions_alone() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    sessions::update_session_status(&db, session.id, Some(SessionStatus::Canceled))
        .await
        .unwrap();

    backdate_session(&db, session.id, 1).await;
    let still = sessions::update_session_status(&db, session.id, None)
        .await
        .unwrap();
    assert_eq!(still.status, SessionStatus::Canceled);
}

#[tokio::test]
async fn film_withdrawal_cancels_live_sessions() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let upcoming = seed_session(&db, film.id, false).await;
    let finished = seed_session(&db, film.id, false).await;
    sessions::update_session_status(&db, finished.id, Some(SessionStatus::NowPlaying))
        .await
        .unwrap();
    sessions::update_session_status(&db, finished.id, Some(SessionStatus::Completed))
        .await
        .unwrap();

    films::update_film_status(&db, film.id, FilmStatus::NotAvailable)
        .await
        .unwrap();

    let upcoming = sessions::get_session(&db, upcoming.id).await.unwrap();
    assert_eq!(upcoming.status, SessionStatus::Canceled);
    // A finished run of the film stays in the books.
    let finished = sessions::get_session(&db, finished.id).await.unwrap();
    assert_eq!(finished.status, SessionStatus::Completed);
}

#[tokio::test]
async fn one_payment_per_booking() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let user = seed_user(&db, "a@example.com").await;

    let booking = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        user.id,
    )
    .await
    .unwrap();

    let payment = payments::create_payment(
        &db,
        payments::CreatePayment {
            booking_id: booking.id,
            amount: 12.5,
        },
    )
    .await
    .unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);

    let err = payments::create_payment(
        &db,
        payments::CreatePayment {
            booking_id: booking.id,
            amount: 12.5,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn payment_timeout_only_fails_stale_pending() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let user = seed_user(&db, "a@example.com").await;
    let booking = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        user.id,
    )
    .await
    .unwrap();
    let payment = payments::create_payment(
        &db,
        payments::CreatePayment {
            booking_id: booking.id,
            amount: 12.5,
        },
    )
    .await
    .unwrap();

    // Fresh pending payment is untouched by the sweep.
    let fresh = payments::update_payment_status(&db, payment.id, None)
        .await
        .unwrap();
    assert_eq!(fresh.status, PaymentStatus::Pending);

    // Backdate past the timeout window.
    let db_payment = payment::Entity::find_by_id(payment.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let mut active: payment::ActiveModel = db_payment.into();
    active.created_at = Set((Utc::now() - Duration::minutes(11)).into());
    active.update(&db).await.unwrap();

    let failed = payments::update_payment_status(&db, payment.id, None)
        .await
        .unwrap();
    assert_eq!(failed.status, PaymentStatus::Failed);
}

#[tokio::test]
async fn completed_payment_survives_the_sweep() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let user = seed_user(&db, "a@example.com").await;
    let booking = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        user.id,
    )
    .await
    .unwrap();
    let payment = payments::create_payment(
        &db,
        payments::CreatePayment {
            booking_id: booking.id,
            amount: 12.5,
        },
    )
    .await
    .unwrap();

    payments::update_payment_status(&db, payment.id, Some(PaymentStatus::Completed))
        .await
        .unwrap();

    let db_payment = payment::Entity::find_by_id(payment.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let mut active: payment::ActiveModel = db_payment.into();
    active.created_at = Set((Utc::now() - Duration::minutes(30)).into());
    active.update(&db).await.unwrap();

    let still = payments::update_payment_status(&db, payment.id, None)
        .await
        .unwrap();
    assert_eq!(still.status, PaymentStatus::Completed);
}

#[tokio::test]
async fn statuses_never_regress_to_pending() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let user = seed_user(&db, "a@example.com").await;
    let seat = session_seats(&db, session.id).await.remove(0);

    let booking = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        user.id,
    )
    .await
    .unwrap();
    let res = reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: booking.id,
            seat_id: seat.id,
        },
    )
    .await
    .unwrap();

    let err = bookings::update_booking_status(&db, booking.id, BookingStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = reservations::update_reservation_status(&db, res.id, ReservationStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn reservation_deadline_is_persisted() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let user = seed_user(&db, "a@example.com").await;
    let seat = session_seats(&db, session.id).await.remove(0);

    let booking = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        user.id,
    )
    .await
    .unwrap();
    let before = Utc::now();
    let res = reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: booking.id,
            seat_id: seat.id,
        },
    )
    .await
    .unwrap();

    let deadline = res.deadline.with_timezone(&Utc);
    let expected = before + Duration::minutes(reservations::RESERVATION_GRACE_MINUTES);
    assert!(deadline >= expected - Duration::seconds(5));
    assert!(deadline <= expected + Duration::seconds(5));
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let db = setup().await;
    let user = seed_user(&db, "a@example.com").await;

    let err = bookings::create_booking(&db, bookings::CreateBooking { session_id: 999 }, user.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = reservations::create_reservation(
        &db,
        reservations::CreateReservation {
            booking_id: 999,
            seat_id: 1,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = payments::create_payment(
        &db,
        payments::CreatePayment {
            booking_id: 999,
            amount: 1.0,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = sessions::update_session_status(&db, 999, None).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn listing_filters_by_owner_and_status() {
    let db = setup().await;
    let film = seed_film(&db).await;
    let session = seed_session(&db, film.id, false).await;
    let alice = seed_user(&db, "alice@example.com").await;
    let bob = seed_user(&db, "bob@example.com").await;

    bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        alice.id,
    )
    .await
    .unwrap();
    let booking_b = bookings::create_booking(
        &db,
        bookings::CreateBooking {
            session_id: session.id,
        },
        bob.id,
    )
    .await
    .unwrap();
    bookings::update_booking_status(&db, booking_b.id, BookingStatus::Canceled)
        .await
        .unwrap();

    let mine = bookings::get_bookings(
        &db,
        bookings::BookingFilter {
            user_id: Some(alice.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user_id, alice.id);

    let canceled = bookings::get_bookings(
        &db,
        bookings::BookingFilter {
            status: Some(BookingStatus::Canceled),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(canceled.len(), 1);
    assert_eq!(canceled[0].id, booking_b.id);

    let paged = bookings::get_bookings(
        &db,
        bookings::BookingFilter {
            skip: Some(1),
            limit: Some(1),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].id, booking_b.id);
}
