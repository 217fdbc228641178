use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, bookings, films, payments, reservations, sessions, users};
use crate::middleware::auth::{auth_middleware, require_admin};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Read-only catalog plus the payment gateway callback
    let public_routes = Router::new()
        .route("/films", get(films::list_films))
        .route("/films/{id}", get(films::get_film))
        .route("/sessions", get(sessions::list_sessions))
        .route("/sessions/{id}", get(sessions::get_session))
        .route("/seats", get(sessions::list_seats))
        .route("/payments/webhook", post(payments::payment_webhook));

    // Routes for any authenticated account; handlers enforce ownership
    let user_routes = Router::new()
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings/{id}", get(bookings::get_booking))
        .route("/bookings/{id}/cancel", post(bookings::cancel_booking))
        .route("/reservations", post(reservations::create_reservation))
        .route("/reservations", get(reservations::list_reservations))
        .route("/reservations/{id}", get(reservations::get_reservation))
        .route(
            "/reservations/{id}/cancel",
            post(reservations::cancel_reservation),
        )
        .route("/payments", post(payments::create_payment))
        .route("/payments", get(payments::list_payments))
        .route("/payments/{id}", get(payments::get_payment))
        .route("/users/notifications", post(users::set_notifications))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Catalog management and lifecycle overrides
    let admin_routes = Router::new()
        .route("/films", post(films::create_film))
        .route(
            "/films/{id}/status/{status}",
            post(films::update_film_status),
        )
        .route("/films/{id}", delete(films::delete_film))
        .route("/sessions", post(sessions::create_session))
        .route(
            "/sessions/{id}/status",
            post(sessions::update_session_status),
        )
        .route("/sessions/{id}/price", put(sessions::update_session_price))
        .route("/sessions/{id}", delete(sessions::delete_session))
        .route(
            "/bookings/{id}/status/{status}",
            post(bookings::update_booking_status),
        )
        .route("/bookings/{id}", delete(bookings::delete_booking))
        .route(
            "/reservations/{id}/status/{status}",
            post(reservations::update_reservation_status),
        )
        .route(
            "/reservations/{id}",
            delete(reservations::delete_reservation),
        )
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api", public_routes)
        .nest("/api", user_routes)
        .nest("/api/admin", admin_routes)
        .with_state(state)
}
